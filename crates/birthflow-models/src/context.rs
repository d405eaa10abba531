//! Record and user context supplied to the evaluation engine.
//!
//! The data layer assembles these from storage; the engine never queries
//! storage itself.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::value::FieldValues;

/// The record an access check is about.
///
/// A record belongs to exactly one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordContext {
    /// Record id
    pub record_id: String,

    /// Object type of the record (e.g. "client", "booking")
    pub object_api_name: String,

    /// Owning user, if the record has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// Organization the record belongs to
    pub organization_id: String,

    /// Field values for criteria evaluation; criteria-type rules
    /// contribute nothing when this is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_values: Option<FieldValues>,
}

impl RecordContext {
    /// Create a record context with no owner and no field values.
    pub fn new(
        record_id: impl Into<String>,
        object_api_name: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            object_api_name: object_api_name.into(),
            owner_id: None,
            organization_id: organization_id.into(),
            field_values: None,
        }
    }

    /// Set the owning user.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Attach field values for criteria evaluation.
    pub fn with_field_values(mut self, field_values: FieldValues) -> Self {
        self.field_values = Some(field_values);
        self
    }
}

/// The user requesting access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserContext {
    /// User id
    pub user_id: String,

    /// The user's role, if assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    /// Organization the user belongs to
    pub organization_id: String,

    /// Position in the role hierarchy; lower is more senior (0 = top)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<i32>,
}

impl UserContext {
    /// Create a user context with no role and no hierarchy position.
    pub fn new(user_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role_id: None,
            organization_id: organization_id.into(),
            hierarchy_level: None,
        }
    }

    /// Set the user's role.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Set the user's position in the role hierarchy.
    pub fn with_hierarchy_level(mut self, hierarchy_level: i32) -> Self {
        self.hierarchy_level = Some(hierarchy_level);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    #[test]
    fn test_record_context_builders() {
        let record = RecordContext::new("record-1", "client", "org-1")
            .with_owner("user-1")
            .with_field_values([("status".to_string(), FieldValue::from("active"))].into());
        assert_eq!(record.owner_id.as_deref(), Some("user-1"));
        assert_eq!(
            record
                .field_values
                .as_ref()
                .and_then(|values| values.get("status")),
            Some(&FieldValue::from("active"))
        );
    }

    #[test]
    fn test_user_context_builders() {
        let user = UserContext::new("user-1", "org-1")
            .with_role("role-doula")
            .with_hierarchy_level(2);
        assert_eq!(user.role_id.as_deref(), Some("role-doula"));
        assert_eq!(user.hierarchy_level, Some(2));
    }

    #[test]
    fn test_record_context_optional_fields_omitted_from_json() {
        let record = RecordContext::new("record-1", "client", "org-1");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("owner_id"));
        assert!(!json.contains("field_values"));
    }
}
