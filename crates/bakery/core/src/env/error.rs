use crate::error::{BakeryError, ErrorSeverity};
use crate::item::Item;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    InvalidId,
    DuplicateId,
}

/// Registration refused by the catalog. Carries the item back so the caller
/// decides how to release it.
#[derive(Debug, thiserror::Error)]
#[error("catalog rejected item {id}: {reason}")]
pub struct RegistrationRejected {
    pub id: i32,
    pub reason: RejectReason,
    pub item: Box<Item>,
}

impl BakeryError for RegistrationRejected {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Registration
    }

    fn error_code(&self) -> &'static str {
        match self.reason {
            RejectReason::InvalidId => "CATALOG_INVALID_ID",
            RejectReason::DuplicateId => "CATALOG_DUPLICATE_ID",
        }
    }
}
