//! Account administration under `/api/users`.

use serde::Deserialize;
use tracing::warn;

use crate::client::ApiClient;
use crate::config::DeletePolicy;
use crate::error::{DomainError, Operation};
use crate::resources::{item_path, wrap};
use crate::types::{UserInput, UserPatch, UserProfile};

#[derive(Deserialize)]
struct UserCreated {
    #[serde(rename = "userCreated")]
    user_created: UserProfile,
}

#[derive(Deserialize)]
struct UserUpdated {
    user: UserProfile,
}

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
    delete_policy: DeletePolicy,
}

impl UsersApi {
    pub fn new(client: ApiClient, delete_policy: DeletePolicy) -> Self {
        Self {
            client,
            delete_policy,
        }
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<UserProfile>, DomainError> {
        let query: &[(&str, &str)] = if active_only {
            &[("isActive", "true")]
        } else {
            &[]
        };
        self.client
            .get("/api/users", query)
            .await
            .map_err(wrap(Operation::ListUsers))
    }

    /// The backend answers with an array; its first element is the account.
    pub async fn get_by_id(&self, id: &str) -> Result<UserProfile, DomainError> {
        let path = item_path("/api/users", id)?;
        let users: Vec<UserProfile> = self
            .client
            .get(&path, &[])
            .await
            .map_err(wrap(Operation::GetUser))?;
        users.into_iter().next().ok_or_else(|| {
            warn!(user_id = id, "backend returned no record");
            DomainError::Operation(Operation::GetUser)
        })
    }

    pub async fn create(&self, input: &UserInput) -> Result<UserProfile, DomainError> {
        let created: UserCreated = self
            .client
            .post("/api/users", input)
            .await
            .map_err(wrap(Operation::CreateUser))?;
        Ok(created.user_created)
    }

    pub async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserProfile, DomainError> {
        let path = item_path("/api/users", id)?;
        let updated: UserUpdated = self
            .client
            .put(&path, patch)
            .await
            .map_err(wrap(Operation::UpdateUser))?;
        Ok(updated.user)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let path = item_path("/api/users", id)?;
        let result = match self.delete_policy {
            DeletePolicy::Hard => self.client.delete(&path).await,
            DeletePolicy::Soft => {
                let deactivate = serde_json::json!({ "isActive": false });
                self.client.put_unit(&path, &deactivate).await
            }
        };
        result.map_err(wrap(Operation::DeleteUser))
    }
}
