//! Participant-side browsing and enrollment.

use eventdesk_model::{AvailableEvent, Enrollment, EnrollmentReceipt, PublicEventDetail};

use crate::client::ApiClient;
use crate::error::CliError;

#[derive(Clone)]
pub struct ParticipationService {
    client: ApiClient,
}

impl ParticipationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn available(&self) -> Result<Vec<AvailableEvent>, CliError> {
        self.client.get("events/available").await
    }

    pub async fn my_enrollments(&self) -> Result<Vec<Enrollment>, CliError> {
        self.client.get("events/my-enrollments").await
    }

    pub async fn public_detail(&self, event_id: i64) -> Result<PublicEventDetail, CliError> {
        self.client.get(&format!("events/{event_id}/public")).await
    }

    pub async fn enroll(&self, event_id: i64) -> Result<EnrollmentReceipt, CliError> {
        self.client
            .post(&format!("events/{event_id}/enrollments"), &serde_json::json!({}))
            .await
    }

    pub async fn cancel(&self, event_id: i64) -> Result<(), CliError> {
        self.client
            .delete(&format!("events/{event_id}/enrollments"))
            .await
    }
}
