//! Notes web frontend: a client for the notes REST API and the router that
//! serves the notes main view.

pub mod client;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod router;
