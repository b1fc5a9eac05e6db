//! HTTP client for API communication.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use eventdesk_session::SessionStore;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::CliError;
use crate::interceptor::{BaseUrl, RequestAugmenter};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// API client: request augmentation, transport, and response decoding.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    augmenter: RequestAugmenter,
}

impl ApiClient {
    /// Create a client over HTTP from config and the session store.
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_transport(
            Arc::new(transport),
            RequestAugmenter::new(BaseUrl::new(config.api_url()), session),
        ))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, augmenter: RequestAugmenter) -> Self {
        Self {
            transport,
            augmenter,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.augmenter.session()
    }

    pub fn base_url(&self) -> &BaseUrl {
        self.augmenter.base_url()
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.execute(ApiRequest::new(Method::GET, path)).await?;
        decode(&response)
    }

    /// Make a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let request = ApiRequest::new(Method::POST, path).json(body)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Make a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let request = ApiRequest::new(Method::PUT, path).json(body)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Make a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let request = ApiRequest::new(Method::PATCH, path).json(body)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Make a DELETE request. Any success status (usually 204) is accepted.
    pub async fn delete(&self, path: &str) -> Result<(), CliError> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Augment, send, and turn non-success statuses into errors.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, CliError> {
        let request = self.augmenter.augment(request)?;
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self.transport.send(request).await?;
        debug!(%method, %url, status = response.status.as_u16(), "API response");

        if response.status.is_success() {
            Ok(response)
        } else {
            Err(CliError::api(response.status.as_u16(), &response.body))
        }
    }
}

/// Decode a JSON body; an empty body decodes as `null`.
fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, CliError> {
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use eventdesk_model::{Identity, MessageResponse, Role};
    use reqwest::header::AUTHORIZATION;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Client pointed at a mock server with an in-memory session.
    pub(crate) fn test_client(server: &MockServer) -> ApiClient {
        let config = Config {
            api_url: format!("{}/", server.uri()),
            ..Config::default()
        };
        ApiClient::new(&config, SessionStore::in_memory()).unwrap()
    }

    pub(crate) fn identity(role: Role) -> Identity {
        Identity {
            id: "12".to_string(),
            name: "Rafael Lima".to_string(),
            email: "rafael@example.com".to_string(),
            phone: "(21) 99876-5432".to_string(),
            role,
            department: None,
        }
    }

    #[tokio::test]
    async fn sends_bearer_token_to_prefixed_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.session().set_session("abc", &identity(Role::Organizer));

        let events: Vec<serde_json::Value> = client.get("/events/").await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/reset-password"))
            .and(body_json(serde_json::json!({ "email": "a@b.com" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response: MessageResponse = client
            .post("auth/reset-password", &serde_json::json!({ "email": "a@b.com" }))
            .await
            .unwrap();
        assert_eq!(response.message, "ok");
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "message": "Evento não encontrado" })),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get::<serde_json::Value>("events/99")
            .await
            .unwrap_err();
        match err {
            CliError::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body.message.as_deref(), Some("Evento não encontrado"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/events/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server).delete("events/3").await.unwrap();
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/available"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let _: Vec<serde_json::Value> = client.get("events/available").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get(AUTHORIZATION.as_str()).is_none());
    }
}
