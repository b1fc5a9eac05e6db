//! Profile management for the logged-in user.

use eventdesk_model::{Identity, UpdatePassword, UpdateUser};
use tracing::info;

use crate::client::ApiClient;
use crate::error::CliError;

#[derive(Clone)]
pub struct UsersService {
    client: ApiClient,
}

impl UsersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: &str) -> Result<Identity, CliError> {
        self.client.get(&format!("users/{user_id}")).await
    }

    /// Fetch the logged-in user's profile and refresh the session snapshot.
    pub async fn reload_profile(&self) -> Result<Identity, CliError> {
        let current = self
            .client
            .session()
            .identity()
            .ok_or(CliError::NotAuthenticated)?;
        let fresh = self.get(&current.id).await?;
        self.client.session().replace_identity(&fresh);
        Ok(fresh)
    }

    pub async fn update(&self, update: &UpdateUser) -> Result<serde_json::Value, CliError> {
        self.client.put("users/", update).await
    }

    pub async fn update_password(
        &self,
        password: &UpdatePassword,
    ) -> Result<serde_json::Value, CliError> {
        self.client.patch("users/", password).await
    }

    /// Delete the account. The session ends with it.
    pub async fn delete_account(&self) -> Result<(), CliError> {
        self.client.delete("users/").await?;
        self.client.session().clear_session();
        info!("Account deleted; session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{identity, test_client};
    use eventdesk_model::Role;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reload_refreshes_session_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "12",
                "name": "Rafael L.",
                "email": "rafael@example.com",
                "telephone_number": "(21) 99876-5432",
                "type": "REGULAR",
                "department": "Computação"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.session().set_session("tok", &identity(Role::Regular));
        let users = UsersService::new(client.clone());

        let fresh = users.reload_profile().await.unwrap();
        assert_eq!(fresh.name, "Rafael L.");
        assert_eq!(client.session().identity(), Some(fresh));
        assert_eq!(client.session().token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn reload_without_session_is_unauthenticated() {
        let server = MockServer::start().await;
        let users = UsersService::new(test_client(&server));
        assert!(matches!(
            users.reload_profile().await,
            Err(CliError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn password_change_uses_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/"))
            .and(body_json(serde_json::json!({
                "current_password": "antiga1",
                "new_password": "nova123"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        UsersService::new(test_client(&server))
            .update_password(&UpdatePassword {
                current_password: "antiga1".to_string(),
                new_password: "nova123".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deleting_account_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.session().set_session("tok", &identity(Role::Organizer));
        UsersService::new(client.clone()).delete_account().await.unwrap();

        assert_eq!(client.session().token(), None);
        assert_eq!(client.session().identity(), None);
    }

    #[tokio::test]
    async fn failed_delete_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.session().set_session("tok", &identity(Role::Organizer));
        assert!(UsersService::new(client.clone()).delete_account().await.is_err());
        assert!(client.session().is_authenticated());
    }
}
