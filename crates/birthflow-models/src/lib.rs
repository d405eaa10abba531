//! Birthflow Models - Shared model and validation primitives.
//!
//! This crate provides the model types shared across the Birthflow
//! workspace and exported to the web frontend as TypeScript bindings:
//! - Access levels, grant sources, and sharing evaluation results
//! - Sharing rules, criteria, and manual shares
//! - Record/user context supplied by the data layer
//! - Typed record field values and validation primitives

pub mod access;
pub mod context;
pub mod rule;
pub mod share;
pub mod validation;
pub mod value;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use access::{
    AccessGrant, AccessRequirement, AccessSource, RecordAccessLevel, SharingEvaluationResult,
    SharingModel, compare_access_levels, satisfies_access,
};
pub use context::{RecordContext, UserContext};
pub use rule::{
    ConditionOperator, CriteriaMatchType, ShareWithType, SharingCriteria,
    SharingCriteriaCondition, SharingRule, SharingRuleType,
};
pub use share::ManualShare;
pub use validation::ValidationError;
pub use value::{FieldValue, FieldValues};
