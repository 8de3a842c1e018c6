//! Session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session entity for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID (token)
    pub id: String,
    /// Associated user ID
    pub user_id: i64,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let live = Session {
            id: "tok".to_string(),
            user_id: 1,
            expires_at: now + Duration::days(7),
            created_at: now,
        };
        let stale = Session {
            id: "tok".to_string(),
            user_id: 1,
            expires_at: now - Duration::minutes(1),
            created_at: now - Duration::days(8),
        };

        assert!(!live.is_expired());
        assert!(stale.is_expired());
    }
}
