//! Identity service: login, registration, password reset.

use eventdesk_model::{Identity, LoginRequest, LoginResponse, MessageResponse, NewUser};
use eventdesk_session::SessionStore;
use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyResetRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Authenticate and start a session.
    ///
    /// The session store is written only after the response has been fully
    /// decoded; a failed or abandoned call leaves it untouched.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Identity, CliError> {
        let response: LoginResponse = self.client.post("auth/login", credentials).await?;
        if response.token.trim().is_empty() {
            return Err(CliError::Decode(serde::de::Error::custom(
                "login response carried an empty token",
            )));
        }
        self.session().set_session(&response.token, &response.user);
        info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// End the session locally. The backend keeps no session to invalidate.
    pub fn logout(&self) {
        self.session().clear_session();
    }

    pub async fn register(&self, user: &NewUser) -> Result<serde_json::Value, CliError> {
        self.client.post("users/", user).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse, CliError> {
        self.client
            .post("auth/reset-password", &ResetRequest { email })
            .await
    }

    pub async fn verify_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, CliError> {
        self.client
            .post(
                "auth/verify-reset-password",
                &VerifyResetRequest {
                    token,
                    new_password,
                },
            )
            .await
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.session().identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
