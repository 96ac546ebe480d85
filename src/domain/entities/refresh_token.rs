use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted, opaque refresh token.
///
/// Revoked rows are kept; only the cleanup job ever removes them, and only
/// once they have expired.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// A token is usable iff it was never revoked and `now` is before its expiry.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}
