use axum::{Router, handler::Handler, response::Redirect, routing::get};

/// Maps the base path to `main_view` and redirects every other path back to
/// the base path.
pub fn routes<S, H, T>(base_path: &str, main_view: H) -> Router<S>
where
    H: Handler<T, S>,
    S: Clone + Send + Sync + 'static,
    T: 'static,
{
    let root = normalize_base_path(base_path);
    let target = root.clone();

    Router::new()
        .route(&root, get(main_view))
        .fallback(move || {
            let target = target.clone();
            async move {
                tracing::debug!("Redirecting unmatched path to {}", target);
                Redirect::to(&target)
            }
        })
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
