//! Access levels, grant sources, and evaluation results for record sharing.
//!
//! These types are the vocabulary of the sharing engine: how much access a
//! grant confers, where a grant came from, and the aggregated decision
//! returned to callers.
//!
//! # Example
//!
//! ```rust
//! use birthflow_models::{AccessGrant, AccessSource, RecordAccessLevel, SharingEvaluationResult};
//!
//! let result = SharingEvaluationResult::from_grants(vec![
//!     AccessGrant::new(AccessSource::OrgWideDefault, RecordAccessLevel::Read),
//!     AccessGrant::new(AccessSource::ManualShare, RecordAccessLevel::ReadWrite),
//! ]);
//! assert!(result.has_access);
//! assert_eq!(result.access_level, Some(RecordAccessLevel::ReadWrite));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Privilege level a grant confers on a record.
///
/// Variant order is the privilege order, so `Ord` gives the total order
/// used for conflict resolution: `Read < ReadWrite < FullAccess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecordAccessLevel {
    /// View the record
    Read,
    /// View and edit the record
    ReadWrite,
    /// View, edit, delete, and re-share the record
    FullAccess,
}

impl RecordAccessLevel {
    /// Human-readable label for this level.
    pub fn description(&self) -> &'static str {
        match self {
            RecordAccessLevel::Read => "Read Only",
            RecordAccessLevel::ReadWrite => "Read/Write",
            RecordAccessLevel::FullAccess => "Full Access",
        }
    }
}

/// Organization-wide default (OWD) sharing model for an object type.
///
/// The baseline access every same-organization user gets absent any other
/// grant. `Private` grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SharingModel {
    /// Only the owner and explicit grants
    #[default]
    Private,
    /// Everyone in the organization can view
    Read,
    /// Everyone in the organization can view and edit
    ReadWrite,
    /// Everyone in the organization has full access
    FullAccess,
}

impl SharingModel {
    /// The access level this model grants, if any.
    ///
    /// Total mapping: `Private` grants nothing, the other three models map
    /// to their same-named level.
    pub fn access_level(&self) -> Option<RecordAccessLevel> {
        match self {
            SharingModel::Private => None,
            SharingModel::Read => Some(RecordAccessLevel::Read),
            SharingModel::ReadWrite => Some(RecordAccessLevel::ReadWrite),
            SharingModel::FullAccess => Some(RecordAccessLevel::FullAccess),
        }
    }

    /// Short label for settings screens.
    pub fn display_name(&self) -> &'static str {
        match self {
            SharingModel::Private => "Private",
            SharingModel::Read => "Public Read Only",
            SharingModel::ReadWrite => "Public Read/Write",
            SharingModel::FullAccess => "Public Full Access",
        }
    }

    /// Longer explanation for settings screens.
    pub fn description(&self) -> &'static str {
        match self {
            SharingModel::Private => {
                "Only the record owner, and users granted access by rule or share, can see the record"
            }
            SharingModel::Read => "All users in the organization can view the record",
            SharingModel::ReadWrite => "All users in the organization can view and edit the record",
            SharingModel::FullAccess => {
                "All users in the organization can view, edit, delete, and share the record"
            }
        }
    }
}

/// Where an access grant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// The requesting user owns the record
    Owner,
    /// The organization-wide default for the object type
    OrgWideDefault,
    /// The requesting user outranks the record owner in the role hierarchy
    RoleHierarchy,
    /// An admin-authored sharing rule matched
    SharingRule,
    /// An ad-hoc share on this specific record matched
    ManualShare,
}

impl AccessSource {
    /// Human-readable label for this source.
    pub fn description(&self) -> &'static str {
        match self {
            AccessSource::Owner => "Record owner",
            AccessSource::OrgWideDefault => "Organization-wide default",
            AccessSource::RoleHierarchy => "Role hierarchy",
            AccessSource::SharingRule => "Sharing rule",
            AccessSource::ManualShare => "Manual share",
        }
    }
}

/// Kind of access an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    /// Viewing the record
    Read,
    /// Editing the record
    Write,
}

/// The higher of two optional access levels.
///
/// `None` (no access) is lower than every level.
pub fn compare_access_levels(
    a: Option<RecordAccessLevel>,
    b: Option<RecordAccessLevel>,
) -> Option<RecordAccessLevel> {
    a.max(b)
}

/// Whether a granted level satisfies a required kind of access.
///
/// Any level satisfies `Read`; only `ReadWrite` and `FullAccess` satisfy
/// `Write`.
pub fn satisfies_access(granted: Option<RecordAccessLevel>, required: AccessRequirement) -> bool {
    match required {
        AccessRequirement::Read => granted.is_some(),
        AccessRequirement::Write => matches!(
            granted,
            Some(RecordAccessLevel::ReadWrite | RecordAccessLevel::FullAccess)
        ),
    }
}

/// One access grant contributed during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccessGrant {
    /// Where the grant came from
    pub source: AccessSource,

    /// Level the grant confers
    pub level: RecordAccessLevel,

    /// Id of the granting rule or share (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Name of the granting rule (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl AccessGrant {
    /// Create a grant from a source at a level.
    pub fn new(source: AccessSource, level: RecordAccessLevel) -> Self {
        Self {
            source,
            level,
            source_id: None,
            source_name: None,
        }
    }

    /// Attach the id of the granting rule or share.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Attach the name of the granting rule.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }
}

/// Aggregated result of evaluating a user's access to one record.
///
/// Computed fresh per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SharingEvaluationResult {
    /// Whether the user may access the record at all
    pub has_access: bool,

    /// Highest level among all contributing grants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<RecordAccessLevel>,

    /// Source of the winning grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_source: Option<AccessSource>,

    /// Every grant that contributed, in evaluation order
    pub all_access_grants: Vec<AccessGrant>,
}

impl SharingEvaluationResult {
    /// A full denial with no contributing grants.
    pub fn denied() -> Self {
        Self {
            has_access: false,
            access_level: None,
            access_source: None,
            all_access_grants: Vec::new(),
        }
    }

    /// Aggregate contributed grants into a decision.
    ///
    /// The highest level wins. An equal level does not displace the grant
    /// already tracked, so on ties the first grant in evaluation order is
    /// the one reported.
    pub fn from_grants(grants: Vec<AccessGrant>) -> Self {
        let mut access_level: Option<RecordAccessLevel> = None;
        let mut access_source: Option<AccessSource> = None;

        for grant in &grants {
            if access_level.is_none_or(|current| grant.level > current) {
                access_level = Some(grant.level);
                access_source = Some(grant.source);
            }
        }

        Self {
            has_access: access_level.is_some(),
            access_level,
            access_source,
            all_access_grants: grants,
        }
    }
}
