//! The notes main view: search box, note list and the selected note.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_macros::debug_handler;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use std::sync::Arc;

use crate::{
    client::{ApiError, NotesApiClient},
    dto::Note,
    handlers::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    #[serde(default)]
    pub search: String,
    pub note: Option<String>,
}

#[derive(Debug, Default)]
struct MainViewModel {
    notes: Vec<Note>,
    selected: Option<Note>,
}

#[debug_handler]
pub async fn notes_main_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    let api = state.notes_api();

    match load(&api, &params).await {
        Ok(model) => (StatusCode::OK, Html(render(&model, &params.search, None))).into_response(),
        Err(e) => {
            tracing::error!("failed to load notes main view: {}", e);
            let message = api.status().error.unwrap_or_else(|| e.message());
            (
                StatusCode::BAD_GATEWAY,
                Html(render(
                    &MainViewModel::default(),
                    &params.search,
                    Some(&message),
                )),
            )
                .into_response()
        }
    }
}

async fn load(api: &NotesApiClient, params: &ViewParams) -> Result<MainViewModel, ApiError> {
    let notes = api.list_notes(&params.search).await?;

    let selected = match params.note.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Some(api.get_note(id).await?),
        None => None,
    };

    Ok(MainViewModel { notes, selected })
}

fn render(model: &MainViewModel, search: &str, error: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Notes</title></head>\n<body>\n",
    );

    html.push_str(&format!(
        "<form method=\"get\"><input type=\"search\" name=\"search\" value=\"{}\"><button>Search</button></form>\n",
        escape_html(search)
    ));

    if let Some(error) = error {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
    }

    html.push_str("<ul class=\"notes\">\n");
    for note in &model.notes {
        let mut href = format!("?note={}", urlencoding::encode(&note.id));
        if !search.is_empty() {
            href.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <small>{}</small></li>\n",
            escape_html(&href),
            escape_html(&note.title),
            escape_html(&display_time(&note.updated_at))
        ));
    }
    html.push_str("</ul>\n");

    if model.notes.is_empty() && error.is_none() {
        html.push_str("<p class=\"empty\">No notes yet.</p>\n");
    }

    if let Some(note) = &model.selected {
        html.push_str(&format!(
            "<article><h1>{}</h1><p><small>Created {} &middot; Updated {}</small></p><pre>{}</pre></article>\n",
            escape_html(&note.title),
            escape_html(&display_time(&note.created_at)),
            escape_html(&display_time(&note.updated_at)),
            escape_html(&note.content)
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// RFC 3339 timestamps are shown in UTC, anything else as sent.
fn display_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |time| {
            time.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        },
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
