pub mod view;

use crate::client::NotesApiClient;

/// Shared by all requests. Only the connection pool is shared, each request
/// gets its own client and status pair.
#[derive(Debug, Clone)]
pub struct AppState {
    http: reqwest::Client,
    api_base_url: String,
}

impl AppState {
    pub fn new(http: reqwest::Client, api_base_url: String) -> Self {
        Self { http, api_base_url }
    }

    pub fn notes_api(&self) -> NotesApiClient {
        NotesApiClient::with_http(self.http.clone(), self.api_base_url.clone())
    }
}
