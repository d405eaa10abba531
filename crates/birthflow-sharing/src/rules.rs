//! Per-source grant evaluation: sharing rules, manual shares, and the role
//! hierarchy.
//!
//! Each function contributes at most one grant; `None` means the source
//! grants nothing. Malformed or partial inputs fail closed.

use chrono::{DateTime, Utc};

use birthflow_models::{
    AccessGrant, AccessSource, ManualShare, RecordAccessLevel, RecordContext, ShareWithType,
    SharingRule, SharingRuleType, UserContext,
};

use crate::criteria::evaluate_criteria;

/// Whether a rule's share target matches the requesting user.
pub fn sharing_rule_applies_to_user(rule: &SharingRule, user: &UserContext) -> bool {
    share_target_matches_user(rule.share_with_type, &rule.share_with_id, user)
}

/// Manual shares address users the same way rules do.
fn share_target_matches_user(target: ShareWithType, target_id: &str, user: &UserContext) -> bool {
    match target {
        ShareWithType::User => target_id == user.user_id,
        ShareWithType::Role => user.role_id.as_deref() == Some(target_id),
        // Group membership is not implemented yet; public_group targets
        // never match. Completing this is a deliberate future change.
        ShareWithType::PublicGroup => false,
    }
}

/// The grant a sharing rule contributes for this record and user, if any.
///
/// Inactive rules grant nothing. Criteria-type rules additionally require
/// the record's field values to be present and to match; a criteria rule
/// with no criteria payload, or a record with no field values, grants
/// nothing.
pub fn evaluate_sharing_rule(
    rule: &SharingRule,
    record: &RecordContext,
    user: &UserContext,
) -> Option<AccessGrant> {
    if !rule.is_active {
        return None;
    }
    if !sharing_rule_applies_to_user(rule, user) {
        return None;
    }

    match rule.rule_type {
        SharingRuleType::Criteria => {
            let criteria = rule.criteria.as_ref()?;
            let field_values = record.field_values.as_ref()?;
            if !evaluate_criteria(criteria, field_values) {
                return None;
            }
        }
        // Owner-role verification is not implemented yet; an owner-based
        // rule whose share target matches is accepted as-is.
        SharingRuleType::OwnerBased => {}
    }

    Some(
        AccessGrant::new(AccessSource::SharingRule, rule.access_level)
            .with_source_id(&rule.id)
            .with_source_name(&rule.name),
    )
}

/// The grant a manual share contributes for this user as of `now`, if any.
///
/// Expired shares grant nothing.
pub fn evaluate_manual_share(
    share: &ManualShare,
    user: &UserContext,
    now: DateTime<Utc>,
) -> Option<AccessGrant> {
    if share.is_expired_at(now) {
        return None;
    }
    if !share_target_matches_user(share.share_with_type, &share.share_with_id, user) {
        return None;
    }

    Some(AccessGrant::new(AccessSource::ManualShare, share.access_level).with_source_id(&share.id))
}

/// Whether the user outranks the record owner in the role hierarchy.
///
/// Lower level = more senior. Either level missing means no hierarchy
/// access.
pub fn has_hierarchy_access(user_level: Option<i32>, owner_level: Option<i32>) -> bool {
    match (user_level, owner_level) {
        (Some(user), Some(owner)) => user < owner,
        _ => false,
    }
}

/// The grant the role hierarchy contributes, if any.
///
/// Hierarchy access is capped at read/write; it never confers full access.
pub fn hierarchy_grant(user_level: Option<i32>, owner_level: Option<i32>) -> Option<AccessGrant> {
    if has_hierarchy_access(user_level, owner_level) {
        Some(AccessGrant::new(
            AccessSource::RoleHierarchy,
            RecordAccessLevel::ReadWrite,
        ))
    } else {
        None
    }
}
