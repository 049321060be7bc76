//! Request handler module
//!
//! Responsible for request routing dispatch and the two application
//! endpoints: the welcome page and the chat event endpoint.

pub mod chat;
pub mod router;
pub mod welcome;

// Re-export main entry point
pub use router::handle_request;
