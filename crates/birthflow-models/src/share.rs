//! Manual shares: ad-hoc, possibly time-limited grants on single records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::access::RecordAccessLevel;
use crate::rule::ShareWithType;

/// An ad-hoc grant of access to one record for a user or role.
///
/// Created from the record's sharing dialog; expired shares grant nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManualShare {
    /// Unique identifier for this share
    pub id: String,

    /// Record the share applies to
    pub record_id: String,

    /// Kind of principal shared with
    pub share_with_type: ShareWithType,

    /// Id of the user or role shared with
    pub share_with_id: String,

    /// Level the share grants
    pub access_level: RecordAccessLevel,

    /// When the share stops granting access; `None` means it never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Free-text reason shown in the sharing dialog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// User who created the share
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,

    /// When the share was created
    pub created_at: DateTime<Utc>,
}

impl ManualShare {
    /// Create a non-expiring share with a fresh id.
    pub fn new(
        record_id: impl Into<String>,
        share_with_type: ShareWithType,
        share_with_id: impl Into<String>,
        access_level: RecordAccessLevel,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            record_id: record_id.into(),
            share_with_type,
            share_with_id: share_with_id.into(),
            access_level,
            expires_at: None,
            reason: None,
            granted_by: None,
            created_at: Utc::now(),
        }
    }

    /// Set when the share expires.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Attach a free-text reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Record who created the share.
    pub fn with_granted_by(mut self, granted_by: impl Into<String>) -> Self {
        self.granted_by = Some(granted_by.into());
        self
    }

    /// Whether the share has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the share has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_manual_share_new() {
        let share = ManualShare::new(
            "record-1",
            ShareWithType::User,
            "user-2",
            RecordAccessLevel::Read,
        );
        assert!(!share.id.is_empty());
        assert_eq!(share.record_id, "record-1");
        assert_eq!(share.expires_at, None);
        assert!(!share.is_expired());
    }

    #[test]
    fn test_manual_share_builders() {
        let expires_at = Utc::now() + Duration::days(7);
        let share = ManualShare::new(
            "record-1",
            ShareWithType::Role,
            "role-backup",
            RecordAccessLevel::ReadWrite,
        )
        .with_expiry(expires_at)
        .with_reason("Covering during leave")
        .with_granted_by("user-1");
        assert_eq!(share.expires_at, Some(expires_at));
        assert_eq!(share.reason.as_deref(), Some("Covering during leave"));
        assert_eq!(share.granted_by.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc::now();
        let share = ManualShare::new(
            "record-1",
            ShareWithType::User,
            "user-2",
            RecordAccessLevel::Read,
        );

        let expired = share.clone().with_expiry(now - Duration::hours(1));
        assert!(expired.is_expired_at(now));

        let live = share.clone().with_expiry(now + Duration::hours(1));
        assert!(!live.is_expired_at(now));

        assert!(!share.is_expired_at(now));
    }

    #[test]
    fn test_manual_share_round_trip() {
        let share = ManualShare::new(
            "record-1",
            ShareWithType::User,
            "user-2",
            RecordAccessLevel::FullAccess,
        )
        .with_reason("Second doula on this birth");
        let json = serde_json::to_string(&share).unwrap();
        let parsed: ManualShare = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, share);
    }
}
