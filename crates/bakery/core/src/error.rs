//! Common error infrastructure for bakery-core.
//!
//! Domain-specific errors (`FieldError`, `CollectionError`, `PatchError`,
//! `RegistryError`, `ConfigError`) live next to the components that raise
//! them. This module provides the shared classification they all report.
//!
//! # Design Principles
//!
//! - **Never fatal**: no error kind stops a whole run; the worst outcome is
//!   that a single entity is skipped.
//! - **Reported, not thrown**: lookup misses and malformed fields are logged
//!   by the caller, which then carries on with the next field or block.
//! - **Structural vs transient**: unsupported collection operations are a
//!   distinct severity so callers can never mistake them for a soft miss.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// A template, tag, module, field or stat could not be found.
    ///
    /// The operation is skipped and processing continues.
    LookupMiss,

    /// The config itself is invalid (missing required field, invalid id).
    ///
    /// The whole config (or the whole feature block) is skipped; siblings are
    /// unaffected.
    MalformedConfig,

    /// The requested operation is structurally impossible on the target.
    ///
    /// Raised by the collection adapter for index-based writes. Never
    /// approximated, never retried.
    Unsupported,

    /// The external catalog refused the derived entity.
    ///
    /// Aborts derived-artifact publication for that entity only.
    Registration,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LookupMiss => "lookup_miss",
            Self::MalformedConfig => "malformed_config",
            Self::Unsupported => "unsupported",
            Self::Registration => "registration",
        }
    }

    /// Returns true if retrying with different input could succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::LookupMiss | Self::MalformedConfig)
    }

    /// Returns true if this error reflects a structural limitation of the target.
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

/// Common trait for all bakery-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by how the caller should recover, not by impact
/// - Give every variant a stable `error_code` for log filtering and tests
pub trait BakeryError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
