//! Content items ("classes") under `/api/posts`.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::config::DeletePolicy;
use crate::error::{DomainError, Operation};
use crate::resources::{item_path, wrap};
use crate::types::{Post, PostInput, PostPatch};

const MIN_TITLE_LEN: usize = 3;
const MIN_CONTENT_LEN: usize = 10;

#[derive(Deserialize)]
struct PostList {
    #[serde(default)]
    posts: Option<Vec<Post>>,
}

#[derive(Deserialize)]
struct PostCreated {
    #[serde(rename = "postCreated")]
    post_created: Post,
}

#[derive(Deserialize)]
struct PostUpdated {
    post: Post,
}

/// Gate applied before `create` issues any request. Lengths are counted in
/// characters after trimming.
pub fn validate_post_input(input: &PostInput) -> Result<(), DomainError> {
    if input.title.trim().chars().count() < MIN_TITLE_LEN {
        return Err(DomainError::validation(
            "title",
            format!("must have at least {MIN_TITLE_LEN} characters"),
        ));
    }
    if input.content.trim().chars().count() < MIN_CONTENT_LEN {
        return Err(DomainError::validation(
            "content",
            format!("must have at least {MIN_CONTENT_LEN} characters"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PostsApi {
    client: ApiClient,
    delete_policy: DeletePolicy,
}

impl PostsApi {
    pub fn new(client: ApiClient, delete_policy: DeletePolicy) -> Self {
        Self {
            client,
            delete_policy,
        }
    }

    /// All posts, or only soft-deleted ones when `excluded_only` is set.
    /// A payload without a `posts` field yields an empty list.
    pub async fn list(&self, excluded_only: bool) -> Result<Vec<Post>, DomainError> {
        let query: &[(&str, &str)] = if excluded_only {
            &[("excluded", "true")]
        } else {
            &[]
        };
        let list: PostList = self
            .client
            .get("/api/posts", query)
            .await
            .map_err(wrap(Operation::ListPosts))?;
        Ok(list.posts.unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Post, DomainError> {
        let path = item_path("/api/posts", id)?;
        self.client
            .get(&path, &[])
            .await
            .map_err(wrap(Operation::GetPost))
    }

    pub async fn create(&self, input: &PostInput) -> Result<Post, DomainError> {
        validate_post_input(input)?;
        let created: PostCreated = self
            .client
            .post("/api/posts", input)
            .await
            .map_err(wrap(Operation::CreatePost))?;
        Ok(created.post_created)
    }

    pub async fn update(&self, id: &str, patch: &PostPatch) -> Result<Post, DomainError> {
        let path = item_path("/api/posts", id)?;
        let updated: PostUpdated = self
            .client
            .put(&path, patch)
            .await
            .map_err(wrap(Operation::UpdatePost))?;
        Ok(updated.post)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let path = item_path("/api/posts", id)?;
        let result = match self.delete_policy {
            DeletePolicy::Hard => self.client.delete(&path).await,
            DeletePolicy::Soft => {
                let patch = PostPatch {
                    excluded: Some(true),
                    ..PostPatch::default()
                };
                self.client.put_unit(&path, &patch).await
            }
        };
        result.map_err(wrap(Operation::DeletePost))
    }
}
