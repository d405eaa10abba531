//! Data-source seam and orchestration for record access checks.
//!
//! The `SharingDataSource` trait is the engine's only view of storage;
//! implementations are provided by downstream crates (the web backend's
//! data layer). `RecordSharingService` fetches the sharing configuration
//! through the trait and hands it to the pure evaluator.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use birthflow_models::{
    AccessRequirement, ManualShare, RecordContext, SharingEvaluationResult, SharingModel,
    SharingRule, UserContext, satisfies_access,
};

use crate::evaluator::evaluate_record_access_at;

/// Errors from evaluating access through a data source.
#[derive(Debug, thiserror::Error)]
pub enum SharingError {
    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("sharing data source error: {0}")]
    DataSource(String),
}

/// Storage interface supplying sharing configuration to the engine.
///
/// Every method returns already-scoped data: rules for one organization
/// and object type, shares for one record. The engine itself never
/// queries storage.
#[async_trait]
pub trait SharingDataSource: Send + Sync {
    /// The record being checked, or `None` if it does not exist.
    async fn record_context(&self, record_id: &str)
    -> Result<Option<RecordContext>, SharingError>;

    /// The requesting user, or `None` if they do not exist.
    async fn user_context(&self, user_id: &str) -> Result<Option<UserContext>, SharingError>;

    /// The organization-wide default for an object type.
    async fn org_wide_default(
        &self,
        organization_id: &str,
        object_api_name: &str,
    ) -> Result<SharingModel, SharingError>;

    /// Active and inactive sharing rules for an object type.
    async fn sharing_rules(
        &self,
        organization_id: &str,
        object_api_name: &str,
    ) -> Result<Vec<SharingRule>, SharingError>;

    /// Manual shares on one record.
    async fn manual_shares(&self, record_id: &str) -> Result<Vec<ManualShare>, SharingError>;

    /// A user's role hierarchy level, if they have one.
    async fn hierarchy_level(&self, user_id: &str) -> Result<Option<i32>, SharingError>;
}

/// Convenience orchestration over a [`SharingDataSource`].
pub struct RecordSharingService<S> {
    source: S,
}

impl<S: SharingDataSource> RecordSharingService<S> {
    /// Create a service over a data source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Evaluate a user's access to a record.
    pub async fn evaluate(
        &self,
        record_id: &str,
        user_id: &str,
    ) -> Result<SharingEvaluationResult, SharingError> {
        let record = self
            .source
            .record_context(record_id)
            .await?
            .ok_or_else(|| SharingError::RecordNotFound(record_id.to_string()))?;
        let user = self
            .source
            .user_context(user_id)
            .await?
            .ok_or_else(|| SharingError::UserNotFound(user_id.to_string()))?;

        // Cross-organization requests skip the configuration lookups; the
        // denial is unconditional either way.
        if user.organization_id != record.organization_id {
            debug!(record_id, user_id, "cross-organization access denied");
            return Ok(SharingEvaluationResult::denied());
        }

        let sharing_model = self
            .source
            .org_wide_default(&record.organization_id, &record.object_api_name)
            .await?;
        let rules = self
            .source
            .sharing_rules(&record.organization_id, &record.object_api_name)
            .await?;
        let shares = self.source.manual_shares(record_id).await?;
        let owner_hierarchy_level = match record.owner_id.as_deref() {
            Some(owner_id) => self.source.hierarchy_level(owner_id).await?,
            None => None,
        };

        let result = evaluate_record_access_at(
            &record,
            &user,
            sharing_model,
            &rules,
            &shares,
            owner_hierarchy_level,
            Utc::now(),
        );
        debug!(
            record_id,
            user_id,
            has_access = result.has_access,
            access_level = ?result.access_level,
            access_source = ?result.access_source,
            "record access evaluated"
        );
        Ok(result)
    }

    /// Whether a user has the required kind of access to a record.
    pub async fn can_access(
        &self,
        record_id: &str,
        user_id: &str,
        required: AccessRequirement,
    ) -> Result<bool, SharingError> {
        let result = self.evaluate(record_id, user_id).await?;
        Ok(satisfies_access(result.access_level, required))
    }

    /// The subset of `record_ids` the user can access at the required
    /// level, in input order.
    ///
    /// Records deleted between listing and evaluation are dropped, not an
    /// error.
    pub async fn filter_accessible(
        &self,
        record_ids: &[String],
        user_id: &str,
        required: AccessRequirement,
    ) -> Result<Vec<String>, SharingError> {
        let mut accessible = Vec::new();
        for record_id in record_ids {
            match self.evaluate(record_id, user_id).await {
                Ok(result) if satisfies_access(result.access_level, required) => {
                    accessible.push(record_id.clone());
                }
                Ok(_) | Err(SharingError::RecordNotFound(_)) => {}
                Err(error) => return Err(error),
            }
        }
        Ok(accessible)
    }
}
