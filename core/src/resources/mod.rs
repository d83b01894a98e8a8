//! Typed access to the backend resources.
//!
//! Each module wraps `ApiClient` and unwraps the backend's response
//! envelopes. CRUD operations never leak `TransportError`: the failure is
//! logged and replaced with `DomainError::Operation`, whose message is fixed
//! per operation.

pub mod auth;
pub mod posts;
pub mod users;

use tracing::{error, warn};

use crate::error::{DomainError, Operation, TransportError};

pub use auth::{validate_credentials, AuthApi, LoginOutcome};
pub use posts::{validate_post_input, PostsApi};
pub use users::UsersApi;

/// Log a transport failure and replace it with the operation's domain error.
/// A 404 is an expected outcome and is logged below error level.
pub(crate) fn wrap(operation: Operation) -> impl FnOnce(TransportError) -> DomainError {
    move |err| {
        if err.is_not_found() {
            warn!(?operation, error = %err, "{}", operation.message());
        } else {
            error!(?operation, error = %err, "{}", operation.message());
        }
        DomainError::Operation(operation)
    }
}

/// `{collection}/{id}` with the id escaped as a single path segment.
/// Empty and dot-segment ids are rejected before any request is built.
pub(crate) fn item_path(collection: &str, id: &str) -> Result<String, DomainError> {
    if matches!(id, "" | "." | "..") {
        return Err(DomainError::validation(
            "id",
            format!("{id:?} is not a resource identifier"),
        ));
    }
    Ok(format!("{collection}/{}", urlencoding::encode(id)))
}
