use async_trait::async_trait;

use crate::domain::errors::ProfileError;
use crate::domain::models::ProfileRecord;

/// Remote service producing fame-index profiles and name suggestions.
///
/// Calls are expected to take seconds. Implementations must be cheap to
/// share across tasks (`Arc<dyn ProfileService>`).
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Candidate names for a partial input.
    ///
    /// Best effort: any failure yields an empty list, never an error.
    async fn suggest(&self, partial: &str) -> Vec<String>;

    /// Full profile for a subject name.
    ///
    /// # Returns
    /// * `Ok(ProfileRecord)` - validated record
    /// * `Err(ProfileError)` - transport failure, invalid payload, or the
    ///   backend declined to rate the subject
    async fn fetch_profile(&self, name: &str) -> Result<ProfileRecord, ProfileError>;
}
