//! Birthflow Sharing - record-level access evaluation.
//!
//! This crate decides whether a user may access a record and at what
//! level, Salesforce-style: the organization-wide default, record
//! ownership, the role hierarchy, admin-authored sharing rules, and
//! ad-hoc manual shares each contribute grants, and the highest grant
//! wins. The result carries every contributing grant so the UI can
//! explain the decision.
//!
//! The evaluator is a pure function over data supplied by the caller; it
//! performs no I/O. The [`service`] module provides the async seam the
//! web backend implements to feed it.
//!
//! # Example
//!
//! ```rust
//! use birthflow_models::{AccessSource, RecordContext, SharingModel, UserContext};
//! use birthflow_sharing::evaluate_record_access;
//!
//! let record = RecordContext::new("client-1", "client", "org-1").with_owner("user-owner");
//! let user = UserContext::new("user-2", "org-1");
//!
//! let result = evaluate_record_access(&record, &user, SharingModel::Read, &[], &[], None);
//! assert!(result.has_access);
//! assert_eq!(result.access_source, Some(AccessSource::OrgWideDefault));
//! ```

pub mod criteria;
pub mod evaluator;
pub mod rules;
pub mod service;
pub mod validate;

// ── Top-level re-exports ─────────────────────────────────────────────

// Model vocabulary, so engine callers need only this crate
pub use birthflow_models::{
    AccessGrant, AccessRequirement, AccessSource, ConditionOperator, CriteriaMatchType,
    FieldValue, FieldValues, ManualShare, RecordAccessLevel, RecordContext, ShareWithType,
    SharingCriteria, SharingCriteriaCondition, SharingEvaluationResult, SharingModel,
    SharingRule, SharingRuleType, UserContext, ValidationError, compare_access_levels,
    satisfies_access,
};

pub use criteria::{evaluate_condition, evaluate_criteria};
pub use evaluator::{evaluate_record_access, evaluate_record_access_at};
pub use rules::{
    evaluate_manual_share, evaluate_sharing_rule, has_hierarchy_access, hierarchy_grant,
    sharing_rule_applies_to_user,
};
pub use service::{RecordSharingService, SharingDataSource, SharingError};
pub use validate::{validate_sharing_criteria, validate_sharing_rule};
