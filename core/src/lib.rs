//! Client core for the SmartClass class-content service.
//!
//! # Overview
//! Users sign in, browse classes (posts), and, when they hold the instructor
//! role, create, edit, and delete them through the SmartClass REST backend.
//! This crate is everything below the UI: the HTTP adapter, typed resource
//! modules, and the session manager that persists who is signed in.
//!
//! # Design
//! - `ApiClient` splits every call into a pure `build_request` and a pure
//!   `parse_json`; a `Transport` performs the single round-trip in between.
//! - Resource modules (`resources::*`) unwrap the backend's envelopes and
//!   replace transport failures with one fixed `DomainError` per operation.
//! - Login failures are values (`LoginOutcome`), never errors.
//! - `SessionManager` is an owned value over a `KeyValueStore`; identity
//!   mutations are serialized behind a single lock.
//! - `Classroom` applies role checks and creation defaults on top.

pub mod classroom;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
mod testing;

pub use classroom::Classroom;
pub use client::ApiClient;
pub use config::{ClientConfig, DeletePolicy};
pub use error::{
    ClassroomError, ConfigError, DomainError, Operation, SessionError, StorageError, TransportError,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use resources::{AuthApi, LoginOutcome, PostsApi, UsersApi};
pub use session::{SessionManager, SessionState, IDENTITY_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Identity, Post, PostInput, PostPatch, Role, UserInput, UserPatch, UserProfile};
