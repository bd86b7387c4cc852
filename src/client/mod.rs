//! HTTP client for the notes backend.
//!
//! Every operation goes through the same policy: the status pair is reset
//! before the request is issued, a non-success status turns the raw response
//! text into the error, a success body is decoded as JSON, and `loading` is
//! released once the call settles. Overlapping calls on one client share the
//! status pair, so the last one to settle wins. Build one client per usage
//! context when that matters.

mod error;
mod status;


pub use error::ApiError;
pub use status::ApiStatus;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::dto::{Note, NoteDraft};

use status::StatusCell;

#[derive(Debug)]
pub struct NotesApiClient {
    http: reqwest::Client,
    base_url: String,
    status: StatusCell,
}

impl NotesApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Builds a client on top of an existing connection pool. The status
    /// pair is never shared between clients.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            status: StatusCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status(&self) -> ApiStatus {
        self.status.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ApiStatus> {
        self.status.subscribe()
    }

    /// Lists all notes, or the ones matching `search` when it is non-empty.
    pub async fn list_notes(&self, search: &str) -> Result<Vec<Note>, ApiError> {
        let path = if search.is_empty() {
            String::new()
        } else {
            format!("?search={}", urlencoding::encode(search))
        };

        // A `null` body means no notes.
        let notes: Option<Vec<Note>> = self.fetch_json(self.request(Method::GET, &path)).await?;
        Ok(notes.unwrap_or_default())
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.fetch_json(self.request(Method::POST, "").json(draft)).await
    }

    /// Replaces the note identified by `note.id` with the full `note`.
    pub async fn update_note(&self, note: &Note) -> Result<Note, ApiError> {
        self.fetch_json(self.request(Method::PUT, &note_path(&note.id)).json(note))
            .await
    }

    /// Deletes a note. The response body is ignored.
    pub async fn delete_note(&self, id: &str) -> Result<(), ApiError> {
        self.tracked(async {
            send(self.request(Method::DELETE, &note_path(id))).await?;
            Ok(())
        })
        .await
    }

    pub async fn get_note(&self, id: &str) -> Result<Note, ApiError> {
        self.fetch_json(self.request(Method::GET, &note_path(id))).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.tracked(async {
            let body = send(request).await?.text().await?;
            Ok(serde_json::from_str(&body)?)
        })
        .await
    }

    async fn tracked<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let _loading = self.status.begin();

        let result = call.await;
        if let Err(e) = &result {
            tracing::error!("notes api call failed: {}", e);
            self.status.fail(e.message());
        }

        result
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(ApiError::Status { status, body })
}

/// `/{id}` with the id percent-encoded, so an id containing `/` stays one
/// path segment (`a/b` is sent as `a%2Fb`, not as two segments).
fn note_path(id: &str) -> String {
    format!("/{}", urlencoding::encode(id))
}
