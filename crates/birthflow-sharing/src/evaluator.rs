//! The record access evaluator.
//!
//! Combines the organization-wide default, ownership, the role hierarchy,
//! sharing rules, and manual shares into one access decision with a full
//! audit trail of contributing grants.
//!
//! Grants are collected in a fixed order: owner, org-wide default, role
//! hierarchy, sharing rules, manual shares. The order never changes the
//! resulting level — the highest grant wins — but it decides which source
//! is reported when two grants tie at the highest level.

use chrono::{DateTime, Utc};

use birthflow_models::{
    AccessGrant, AccessSource, ManualShare, RecordAccessLevel, RecordContext,
    SharingEvaluationResult, SharingModel, SharingRule, UserContext,
};

use crate::rules::{evaluate_manual_share, evaluate_sharing_rule, hierarchy_grant};

/// Evaluate a user's access to a record, with share expiry checked against
/// the current time.
///
/// `sharing_rules` must be pre-filtered to the record's object type and
/// `manual_shares` to the record's id; `owner_hierarchy_level` is the
/// record owner's hierarchy level as looked up by the caller.
pub fn evaluate_record_access(
    record: &RecordContext,
    user: &UserContext,
    sharing_model: SharingModel,
    sharing_rules: &[SharingRule],
    manual_shares: &[ManualShare],
    owner_hierarchy_level: Option<i32>,
) -> SharingEvaluationResult {
    evaluate_record_access_at(
        record,
        user,
        sharing_model,
        sharing_rules,
        manual_shares,
        owner_hierarchy_level,
        Utc::now(),
    )
}

/// Evaluate a user's access to a record as of an explicit point in time.
///
/// Pure and deterministic: same inputs, same result.
pub fn evaluate_record_access_at(
    record: &RecordContext,
    user: &UserContext,
    sharing_model: SharingModel,
    sharing_rules: &[SharingRule],
    manual_shares: &[ManualShare],
    owner_hierarchy_level: Option<i32>,
    now: DateTime<Utc>,
) -> SharingEvaluationResult {
    // The organization boundary is absolute; nothing below can override it.
    if user.organization_id != record.organization_id {
        return SharingEvaluationResult::denied();
    }

    let mut grants = Vec::new();

    if record.owner_id.as_deref() == Some(user.user_id.as_str()) {
        grants.push(AccessGrant::new(
            AccessSource::Owner,
            RecordAccessLevel::FullAccess,
        ));
    }

    if let Some(level) = sharing_model.access_level() {
        grants.push(AccessGrant::new(AccessSource::OrgWideDefault, level));
    }

    if let Some(grant) = hierarchy_grant(user.hierarchy_level, owner_hierarchy_level) {
        grants.push(grant);
    }

    for rule in sharing_rules {
        if let Some(grant) = evaluate_sharing_rule(rule, record, user) {
            grants.push(grant);
        }
    }

    for share in manual_shares {
        if let Some(grant) = evaluate_manual_share(share, user, now) {
            grants.push(grant);
        }
    }

    SharingEvaluationResult::from_grants(grants)
}
