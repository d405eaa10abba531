//! Sharing rules and the criteria they match records against.
//!
//! Rules are authored by organization admins in the dashboard, stored as
//! JSON by the data layer, and read-only to the evaluation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::access::RecordAccessLevel;
use crate::value::FieldValue;

/// Kind of principal a rule or share grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShareWithType {
    /// A single user, matched by user id
    User,
    /// Every user holding a role, matched by role id
    Role,
    /// A public group; group membership is not implemented, so these
    /// targets never match
    PublicGroup,
}

/// How a sharing rule selects the records it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SharingRuleType {
    /// Records whose field values match the rule's criteria
    Criteria,
    /// Records owned by users in a given role
    OwnerBased,
}

/// Comparison operator for one criteria condition.
///
/// `Unknown` absorbs operator strings this schema does not know about, so
/// rule data written by a newer dashboard deserializes instead of erroring;
/// unknown operators always evaluate to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TS)]
#[ts(export)]
#[ts(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    GreaterThan,
    LessThan,
    IsNull,
    IsNotNull,
    In,
    Unknown,
}

impl ConditionOperator {
    /// Wire-format name of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::NotContains => "not_contains",
            ConditionOperator::StartsWith => "starts_with",
            ConditionOperator::GreaterThan => "greater_than",
            ConditionOperator::LessThan => "less_than",
            ConditionOperator::IsNull => "is_null",
            ConditionOperator::IsNotNull => "is_not_null",
            ConditionOperator::In => "in",
            ConditionOperator::Unknown => "unknown",
        }
    }

    /// Parse a wire-format operator name, rejecting unsupported strings.
    ///
    /// Unlike deserialization, which folds unsupported names into
    /// `Unknown`, this returns `None` for them; authoring-time validation
    /// uses it to refuse operators the engine cannot evaluate.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "equals" => Some(ConditionOperator::Equals),
            "not_equals" => Some(ConditionOperator::NotEquals),
            "contains" => Some(ConditionOperator::Contains),
            "not_contains" => Some(ConditionOperator::NotContains),
            "starts_with" => Some(ConditionOperator::StartsWith),
            "greater_than" => Some(ConditionOperator::GreaterThan),
            "less_than" => Some(ConditionOperator::LessThan),
            "is_null" => Some(ConditionOperator::IsNull),
            "is_not_null" => Some(ConditionOperator::IsNotNull),
            "in" => Some(ConditionOperator::In),
            _ => None,
        }
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ConditionOperator::parse(&name).unwrap_or(ConditionOperator::Unknown))
    }
}

/// Whether all conditions must match, or any one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaMatchType {
    /// Logical AND over the conditions
    #[default]
    All,
    /// Logical OR over the conditions
    Any,
}

/// One field comparison inside a criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SharingCriteriaCondition {
    /// Record field the condition reads
    pub field: String,

    /// Comparison to apply
    pub operator: ConditionOperator,

    /// Comparison operand; ignored by `is_null` / `is_not_null`
    #[serde(default)]
    pub value: FieldValue,
}

impl SharingCriteriaCondition {
    /// Create a condition comparing a field with an operand.
    pub fn new(
        field: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Record-matching criteria for a criteria-type sharing rule.
///
/// An empty conditions list matches every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SharingCriteria {
    /// AND or OR over the conditions
    pub match_type: CriteriaMatchType,

    /// The conditions to evaluate
    #[serde(default)]
    pub conditions: Vec<SharingCriteriaCondition>,
}

impl SharingCriteria {
    /// Criteria requiring every condition to match.
    pub fn all(conditions: Vec<SharingCriteriaCondition>) -> Self {
        Self {
            match_type: CriteriaMatchType::All,
            conditions,
        }
    }

    /// Criteria requiring at least one condition to match.
    pub fn any(conditions: Vec<SharingCriteriaCondition>) -> Self {
        Self {
            match_type: CriteriaMatchType::Any,
            conditions,
        }
    }
}

/// An admin-authored rule granting access to matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SharingRule {
    /// Unique identifier for this rule
    pub id: String,

    /// Admin-facing rule name
    pub name: String,

    /// Object type the rule applies to (e.g. "client", "booking")
    pub object_api_name: String,

    /// Deactivated rules are kept for audit but grant nothing
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Kind of principal the rule shares with
    pub share_with_type: ShareWithType,

    /// Id of the user, role, or group shared with
    pub share_with_id: String,

    /// How the rule selects records
    pub rule_type: SharingRuleType,

    /// Record-matching criteria (criteria-type rules)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<SharingCriteria>,

    /// Role whose users' records are shared (owner-based rules)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role_id: Option<String>,

    /// Level the rule grants on matching records
    pub access_level: RecordAccessLevel,

    /// When the rule was created
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl SharingRule {
    /// Create an active rule with a fresh id.
    pub fn new(
        name: impl Into<String>,
        object_api_name: impl Into<String>,
        rule_type: SharingRuleType,
        share_with_type: ShareWithType,
        share_with_id: impl Into<String>,
        access_level: RecordAccessLevel,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            object_api_name: object_api_name.into(),
            is_active: true,
            share_with_type,
            share_with_id: share_with_id.into(),
            rule_type,
            criteria: None,
            owner_role_id: None,
            access_level,
            created_at: Utc::now(),
        }
    }

    /// Attach record-matching criteria.
    pub fn with_criteria(mut self, criteria: SharingCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Attach the owner role for an owner-based rule.
    pub fn with_owner_role(mut self, owner_role_id: impl Into<String>) -> Self {
        self.owner_role_id = Some(owner_role_id.into());
        self
    }

    /// Mark the rule inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
