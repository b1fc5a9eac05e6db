//! Organizer-side event management.

use eventdesk_model::{Event, EventInput, EventReceipt};

use crate::client::ApiClient;
use crate::error::CliError;

#[derive(Clone)]
pub struct EventsService {
    client: ApiClient,
}

impl EventsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Events created by the authenticated organizer.
    pub async fn list(&self) -> Result<Vec<Event>, CliError> {
        self.client.get("events/").await
    }

    pub async fn create(&self, event: &EventInput) -> Result<EventReceipt, CliError> {
        self.client.post("events/", event).await
    }

    pub async fn get(&self, event_id: i64) -> Result<Event, CliError> {
        self.client.get(&format!("events/{event_id}")).await
    }

    pub async fn update(&self, event_id: i64, event: &EventInput) -> Result<EventReceipt, CliError> {
        self.client.put(&format!("events/{event_id}"), event).await
    }

    pub async fn delete(&self, event_id: i64) -> Result<(), CliError> {
        self.client.delete(&format!("events/{event_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{identity, test_client};
    use eventdesk_model::{EventType, Role};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> EventInput {
        EventInput {
            title: "RustConf BR".to_string(),
            description: "Conferência anual".to_string(),
            date: "2025-12-25T00:00:00".to_string(),
            time: "14:30".to_string(),
            location: "Centro de Convenções".to_string(),
            capacity: Some(200),
            event_type: EventType::Conference,
            speaker: "Ferris".to_string(),
            institution_organizer: "Comunidade Rust".to_string(),
        }
    }

    #[tokio::test]
    async fn create_sends_backend_vocabulary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events/"))
            .and(header("authorization", "Bearer org-token"))
            .and(body_partial_json(serde_json::json!({
                "type": "CONFERENCE",
                "capacity": 200,
                "institution_organizer": "Comunidade Rust"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 7,
                "message": "Evento criado",
                "url": "/events/7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.session().set_session("org-token", &identity(Role::Organizer));

        let receipt = EventsService::new(client).create(&input()).await.unwrap();
        assert_eq!(receipt.id, 7);
        assert_eq!(receipt.message, "Evento criado");
    }

    #[tokio::test]
    async fn list_update_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 7,
                "title": "RustConf BR",
                "description": "",
                "date": "2025-12-25T00:00:00",
                "time": "14:30",
                "location": "Centro de Convenções",
                "capacity": null,
                "type": "CONFERENCE",
                "speaker": "Ferris",
                "institution_organizer": "Comunidade Rust",
                "created_by": 12
            }])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/events/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "message": "Evento atualizado",
                "url": "/events/7"
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/events/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let service = EventsService::new(test_client(&server));
        let events = service.list().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Conference);

        let receipt = service.update(7, &input()).await.unwrap();
        assert_eq!(receipt.message, "Evento atualizado");
        service.delete(7).await.unwrap();
    }
}
