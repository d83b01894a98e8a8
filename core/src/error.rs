//! Error types for the SmartClass client core.
//!
//! # Design
//! Errors are layered. `TransportError` is what the HTTP adapter returns and
//! never escapes a resource module. Resource operations surface a
//! `DomainError` whose message is fixed per operation; the transport detail
//! is logged at the boundary and dropped. Failed logins are not errors at all
//! (see `LoginOutcome`).

use thiserror::Error;

/// Failures of a single HTTP round-trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response was obtained (DNS, connect, timeout, broken body stream).
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Status { status: 404, .. })
    }
}

/// Every resource operation, each carrying its user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    GetPost,
    CreatePost,
    UpdatePost,
    DeletePost,
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl Operation {
    pub fn message(self) -> &'static str {
        match self {
            Operation::ListPosts => "could not load posts",
            Operation::GetPost => "post not found",
            Operation::CreatePost => "could not create post",
            Operation::UpdatePost => "could not update post",
            Operation::DeletePost => "could not delete post",
            Operation::ListUsers => "could not load users",
            Operation::GetUser => "user not found",
            Operation::CreateUser => "could not create user",
            Operation::UpdateUser => "could not update user",
            Operation::DeleteUser => "could not delete user",
        }
    }
}

/// Errors observed by callers of the resource modules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The operation failed remotely. Only the fixed message is exposed.
    #[error("{}", .0.message())]
    Operation(Operation),

    /// Input was rejected before any request was issued.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures of the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded for storage.
    #[error("encode error: {0}")]
    Encode(String),

    #[error("could not determine application data directory")]
    NoDataDir,
}

/// Failures raised by the session manager.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity could not be persisted; the session was left unchanged.
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),

    #[error("not signed in")]
    NotAuthenticated,

    #[error("only instructors may {0}")]
    Forbidden(&'static str),
}

/// Errors returned by the `Classroom` facade.
#[derive(Debug, Error)]
pub enum ClassroomError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
