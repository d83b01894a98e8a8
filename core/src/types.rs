//! Domain DTOs for the SmartClass API.
//!
//! # Design
//! Field names follow the backend's camelCase wire format through serde
//! renames. These types are defined independently from the mock-server's
//! records; the integration tests catch schema drift between the two crates.
//! Identifiers are opaque strings assigned by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "professor")]
    Instructor,
    #[serde(rename = "aluno")]
    Student,
}

impl Role {
    /// Only instructors may create, edit, or delete content items.
    pub fn can_manage_content(self) -> bool {
        matches!(self, Role::Instructor)
    }
}

/// The authenticated principal held by the session manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    /// Subject tag, meaningful only for instructors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matter: Option<String>,
}

/// A published unit of class material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "urlImage", default)]
    pub url_image: String,
    #[serde(default)]
    pub posted: bool,
    #[serde(default)]
    pub excluded: bool,
}

/// Request payload for creating a post. Every field is sent verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "urlImage")]
    pub url_image: String,
    pub posted: bool,
    pub excluded: bool,
}

/// Partial update for a post. Only the fields present are serialized;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "urlImage", skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<bool>,
}

/// A user record in the administrative sense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matter: Option<String>,
}

impl From<UserProfile> for Identity {
    fn from(profile: UserProfile) -> Self {
        Identity {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: profile.role,
            matter: profile.matter,
        }
    }
}

/// Request payload for creating an account.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matter: Option<String>,
}

impl fmt::Debug for UserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInput")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("matter", &self.matter)
            .finish()
    }
}

/// Partial update for an account.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matter: Option<String>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .field("matter", &self.matter)
            .finish()
    }
}
