use super::PipelineStage;
use crate::access::FieldError;
use crate::collection::CollectionError;
use crate::config::ConfigError;
use crate::env::RejectReason;
use crate::error::{BakeryError, ErrorSeverity};
use crate::registry::RegistryError;

/// Errors raised while augmenting one entity.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("template item {original_id} not found")]
    TemplateNotFound { original_id: i32 },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("registration of item {id} failed: {reason}")]
    RegistrationFailed { id: i32, reason: RejectReason },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("failed to assign item id {id}: {source}")]
    Identity { id: i32, source: FieldError },

    #[error("reward pool entry {index} needs a positive item id and weight (item {item_id}, weight {weight})")]
    InvalidRewardPool {
        index: usize,
        item_id: i32,
        weight: f32,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl PatchError {
    /// Pipeline stage the error is raised from.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::InvalidConfig(_) | Self::TemplateNotFound { .. } => PipelineStage::FetchTemplate,
            Self::Field(_) | Self::Collection(_) | Self::InvalidRewardPool { .. } => {
                PipelineStage::FeatureBlocks
            }
            Self::Identity { .. } => PipelineStage::AssignIdentity,
            Self::RegistrationFailed { .. } => PipelineStage::Register,
            Self::Registry(_) => PipelineStage::PublishArtifacts,
        }
    }
}

impl BakeryError for PatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TemplateNotFound { .. } => ErrorSeverity::LookupMiss,
            Self::InvalidConfig(e) => e.severity(),
            Self::RegistrationFailed { .. } => ErrorSeverity::Registration,
            Self::Field(e) => e.severity(),
            Self::Collection(e) => e.severity(),
            Self::Identity { source, .. } => source.severity(),
            Self::InvalidRewardPool { .. } => ErrorSeverity::MalformedConfig,
            Self::Registry(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "PATCH_TEMPLATE_NOT_FOUND",
            Self::InvalidConfig(e) => e.error_code(),
            Self::RegistrationFailed { .. } => "PATCH_REGISTRATION_FAILED",
            Self::Field(e) => e.error_code(),
            Self::Collection(e) => e.error_code(),
            Self::Identity { .. } => "PATCH_IDENTITY_FAILED",
            Self::InvalidRewardPool { .. } => "PATCH_INVALID_REWARD_POOL",
            Self::Registry(e) => e.error_code(),
        }
    }
}
