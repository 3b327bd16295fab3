// File: quartermaster-common/src/traits/collaborator_traits.rs
//
// Seams for the external collaborators this core depends on but does not
// implement. Production implementations live outside this repository; tests
// supply fakes.

use async_trait::async_trait;

use crate::error::Error;
use crate::models::report::{NotificationType, RecommendationPrompt, ReportRequest};
use crate::models::user::UserRole;

/// Password hashing and verification.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, Error>;
    fn verify(&self, plain: &str, hashed: &str) -> Result<bool, Error>;
}

/// Signed-token issuance for authenticated sessions.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &str, role: UserRole) -> Result<String, Error>;
}

/// Outbound mail transport.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
        kind: NotificationType,
    ) -> Result<(), Error>;
}

/// Renders a report request into a document and returns its download URL.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, request: &ReportRequest) -> Result<String, Error>;
}

/// Produces advisory lines for an asset from a structured prompt.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(&self, prompt: &RecommendationPrompt) -> Result<Vec<String>, Error>;
}
