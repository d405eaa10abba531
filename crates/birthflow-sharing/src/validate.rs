//! Authoring-time validation for untrusted sharing payloads.
//!
//! The dashboard posts criteria and rules as raw JSON. These validators
//! check the structure before anything is persisted, returning a
//! field-addressed [`ValidationError`] instead of panicking or surfacing a
//! deserialization error to the admin.

use serde_json::Value;

use birthflow_models::{ConditionOperator, ValidationError};

const SHARE_WITH_TYPES: [&str; 3] = ["user", "role", "public_group"];
const ACCESS_LEVELS: [&str; 3] = ["read", "read_write", "full_access"];

/// Validate an untrusted criteria payload.
///
/// Requires `match_type` of `"all"` or `"any"`, a `conditions` array, and
/// for every condition a non-empty string `field` plus an operator the
/// engine can evaluate. Condition values are unconstrained; type
/// mismatches are resolved at evaluation time.
pub fn validate_sharing_criteria(candidate: &Value) -> Result<(), ValidationError> {
    let Some(criteria) = candidate.as_object() else {
        return Err(ValidationError::new("criteria", "must be a JSON object"));
    };

    match criteria.get("match_type").and_then(Value::as_str) {
        Some("all") | Some("any") => {}
        _ => {
            return Err(ValidationError::new(
                "match_type",
                "must be \"all\" or \"any\"",
            ));
        }
    }

    let Some(conditions) = criteria.get("conditions").and_then(Value::as_array) else {
        return Err(ValidationError::new("conditions", "must be an array"));
    };

    for (index, condition) in conditions.iter().enumerate() {
        let Some(condition) = condition.as_object() else {
            return Err(ValidationError::new(
                format!("conditions[{index}]"),
                "must be an object",
            ));
        };

        let field_ok = condition
            .get("field")
            .and_then(Value::as_str)
            .is_some_and(|field| !field.is_empty());
        if !field_ok {
            return Err(ValidationError::new(
                format!("conditions[{index}].field"),
                "must be a non-empty string",
            ));
        }

        let operator_ok = condition
            .get("operator")
            .and_then(Value::as_str)
            .and_then(ConditionOperator::parse)
            .is_some();
        if !operator_ok {
            return Err(ValidationError::new(
                format!("conditions[{index}].operator"),
                "is not a supported operator",
            ));
        }
    }

    Ok(())
}

/// Validate an untrusted sharing-rule payload.
///
/// Checks the shared fields every rule needs, then the per-type payload:
/// criteria rules must carry valid criteria, owner-based rules an
/// `owner_role_id`.
pub fn validate_sharing_rule(candidate: &Value) -> Result<(), ValidationError> {
    let Some(rule) = candidate.as_object() else {
        return Err(ValidationError::new("rule", "must be a JSON object"));
    };

    for field in ["name", "object_api_name", "share_with_id"] {
        let present = rule
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| !value.is_empty());
        if !present {
            return Err(ValidationError::new(field, "must be a non-empty string"));
        }
    }

    let share_with_type = rule.get("share_with_type").and_then(Value::as_str);
    if !share_with_type.is_some_and(|value| SHARE_WITH_TYPES.contains(&value)) {
        return Err(ValidationError::new(
            "share_with_type",
            "must be \"user\", \"role\", or \"public_group\"",
        ));
    }

    let access_level = rule.get("access_level").and_then(Value::as_str);
    if !access_level.is_some_and(|value| ACCESS_LEVELS.contains(&value)) {
        return Err(ValidationError::new(
            "access_level",
            "must be \"read\", \"read_write\", or \"full_access\"",
        ));
    }

    match rule.get("rule_type").and_then(Value::as_str) {
        Some("criteria") => {
            let Some(criteria) = rule.get("criteria") else {
                return Err(ValidationError::new(
                    "criteria",
                    "is required for criteria rules",
                ));
            };
            validate_sharing_criteria(criteria)?;
        }
        Some("owner_based") => {
            let owner_role_ok = rule
                .get("owner_role_id")
                .and_then(Value::as_str)
                .is_some_and(|value| !value.is_empty());
            if !owner_role_ok {
                return Err(ValidationError::new(
                    "owner_role_id",
                    "is required for owner-based rules",
                ));
            }
        }
        _ => {
            return Err(ValidationError::new(
                "rule_type",
                "must be \"criteria\" or \"owner_based\"",
            ));
        }
    }

    Ok(())
}
