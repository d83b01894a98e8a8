//! Role-aware entry point tying the session to the resource modules.
//!
//! Reads are open to anyone. Creating, editing, and removing classes requires
//! an instructor session; the check happens before any request is built.

use tracing::info;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClassroomError, SessionError, TransportError};
use crate::resources::{validate_credentials, AuthApi, LoginOutcome, PostsApi, UsersApi};
use crate::session::SessionManager;
use crate::storage::KeyValueStore;
use crate::types::{Post, PostInput, PostPatch, Role};

pub const DEFAULT_HEADING: &str = "My Classes";

pub struct Classroom<S> {
    posts: PostsApi,
    users: UsersApi,
    session: SessionManager<S>,
    placeholder_image: String,
}

impl<S: KeyValueStore> Classroom<S> {
    /// Wire every component from `config` over a reqwest transport.
    pub fn from_config(config: &ClientConfig, store: S) -> Result<Self, TransportError> {
        let client = ApiClient::from_config(config)?;
        Ok(Self::with_client(client, config, store))
    }

    pub fn with_client(client: ApiClient, config: &ClientConfig, store: S) -> Self {
        Self {
            posts: PostsApi::new(client.clone(), config.delete_policy),
            users: UsersApi::new(client.clone(), config.delete_policy),
            session: SessionManager::new(AuthApi::new(client), store),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn posts(&self) -> &PostsApi {
        &self.posts
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Login with the form-level shape check applied first.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        if let Err(reason) = validate_credentials(email, password) {
            return Ok(LoginOutcome::Rejected(reason));
        }
        self.session.login(email, password).await
    }

    pub async fn sign_out(&self) {
        self.session.logout().await;
    }

    /// The instructor's subject tag, or the default heading.
    pub async fn heading(&self) -> String {
        match self.session.identity().await {
            Some(identity) if identity.role == Role::Instructor => identity
                .matter
                .unwrap_or_else(|| DEFAULT_HEADING.to_string()),
            _ => DEFAULT_HEADING.to_string(),
        }
    }

    pub async fn classes(&self) -> Result<Vec<Post>, ClassroomError> {
        Ok(self.posts.list(false).await?)
    }

    pub async fn class_detail(&self, id: &str) -> Result<Post, ClassroomError> {
        Ok(self.posts.get_by_id(id).await?)
    }

    /// Visible classes whose title contains `term`, ignoring case.
    /// Soft-deleted classes are never shown here.
    pub async fn search_classes(&self, term: &str) -> Result<Vec<Post>, ClassroomError> {
        let posts = self.posts.list(false).await?;
        Ok(filter_by_title(posts, term))
    }

    /// Publish a new class owned by the signed-in instructor.
    pub async fn publish_class(&self, title: &str, content: &str) -> Result<Post, ClassroomError> {
        let identity = self.session.require_instructor("publish classes").await?;
        let input = PostInput {
            title: title.to_string(),
            content: content.to_string(),
            user_id: identity.id,
            url_image: self.placeholder_image.clone(),
            posted: true,
            excluded: false,
        };
        let post = self.posts.create(&input).await?;
        info!(post_id = %post.id, "class published");
        Ok(post)
    }

    pub async fn edit_class(&self, id: &str, patch: &PostPatch) -> Result<Post, ClassroomError> {
        self.session.require_instructor("edit classes").await?;
        Ok(self.posts.update(id, patch).await?)
    }

    pub async fn remove_class(&self, id: &str) -> Result<(), ClassroomError> {
        self.session.require_instructor("remove classes").await?;
        self.posts.delete(id).await?;
        info!(post_id = id, "class removed");
        Ok(())
    }
}

fn filter_by_title(posts: Vec<Post>, term: &str) -> Vec<Post> {
    let needle = term.trim().to_lowercase();
    posts
        .into_iter()
        .filter(|post| !post.excluded)
        .filter(|post| needle.is_empty() || post.title.to_lowercase().contains(&needle))
        .collect()
}
