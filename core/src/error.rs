//! Error types for the todo client and state manager.
//!
//! # Design
//! `ApiError` is what the resource layer returns. `NotFound` gets a dedicated
//! variant because the service answers unknown ids with 404; every other
//! non-2xx response lands in `HttpError` with the raw status and body for
//! logging.
//!
//! `StoreError` is what the state manager exposes. It carries no transport
//! detail, only which user action failed, and its `Display` output is the
//! message shown to the user.

use thiserror::Error;

/// Errors returned by the resource client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// A mutating user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Toggle,
    Delete,
    ClearCompleted,
}

impl Mutation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Mutation::Add => "Failed to add todo",
            Mutation::Toggle => "Failed to update todo",
            Mutation::Delete => "Failed to delete todo",
            Mutation::ClearCompleted => "Failed to clear completed todos",
        }
    }
}

/// The failure recorded in the store's `last_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Failed to load todos")]
    LoadFailure,

    #[error("{}", .0.failure_message())]
    MutationFailure(Mutation),
}
