// ABOUTME: Goal engine error taxonomy plus validation and calculation error types
// ABOUTME: Stable error kinds surfaced to the presentation layer and their ErrorCode mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Error Types
//!
//! - [`GoalErrorKind`] - the stable, exhaustively matched kinds returned by the
//!   goal use cases inside their result values
//! - [`GoalValidationError`] - a goal set violates its domain bounds
//! - [`InputValidationError`] - biometric input is missing or out of range
//! - [`CalculationError`] - a calculator could not produce a value

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ErrorCode;

/// Stable error categories produced by the goal use cases.
///
/// Translating these into supportive user-facing language is a presentation
/// concern; the kinds themselves never change meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalErrorKind {
    /// No profile is stored for the owner
    ProfileNotFound,
    /// Goal calculation kept failing after all retry attempts
    CalculationFailed,
    /// Input or calculated goals violated domain bounds
    ValidationFailed,
    /// Reading from or persisting to a repository failed
    StorageFailed,
    /// Another update for the same owner is already in flight
    ConcurrentUpdate,
    /// Persisting the profile edit failed
    ProfileUpdateFailed,
    /// Anything not covered by the other kinds
    UnexpectedError,
}

impl GoalErrorKind {
    /// Map the kind onto the workspace-wide error code
    #[must_use]
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::ProfileNotFound => ErrorCode::ResourceNotFound,
            Self::CalculationFailed | Self::UnexpectedError => ErrorCode::InternalError,
            Self::ValidationFailed => ErrorCode::ValueOutOfRange,
            Self::StorageFailed | Self::ProfileUpdateFailed => ErrorCode::StorageError,
            Self::ConcurrentUpdate => ErrorCode::ResourceLocked,
        }
    }

    /// Whether retrying the whole operation later may succeed
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::CalculationFailed
                | Self::StorageFailed
                | Self::ConcurrentUpdate
                | Self::ProfileUpdateFailed
        )
    }

    /// Stable identifier for logs and analytics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProfileNotFound => "profile_not_found",
            Self::CalculationFailed => "calculation_failed",
            Self::ValidationFailed => "validation_failed",
            Self::StorageFailed => "storage_failed",
            Self::ConcurrentUpdate => "concurrent_update",
            Self::ProfileUpdateFailed => "profile_update_failed",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

impl fmt::Display for GoalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A goal set violates the bounds of the domain it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalValidationError {
    /// Steps goal outside its accepted range
    #[error("steps goal {value} outside [{min}, {max}]")]
    StepsOutOfRange {
        /// Offending value
        value: u32,
        /// Lower bound (inclusive)
        min: u32,
        /// Upper bound (inclusive)
        max: u32,
    },
    /// Calories goal outside its accepted range
    #[error("calories goal {value} outside [{min}, {max}]")]
    CaloriesOutOfRange {
        /// Offending value
        value: u32,
        /// Lower bound (inclusive)
        min: u32,
        /// Upper bound (inclusive)
        max: u32,
    },
    /// Heart points goal outside its accepted range
    #[error("heart points goal {value} outside [{min}, {max}]")]
    HeartPointsOutOfRange {
        /// Offending value
        value: u32,
        /// Lower bound (inclusive)
        min: u32,
        /// Upper bound (inclusive)
        max: u32,
    },
    /// Goals carry a source tag other than the one required
    #[error("expected calculation source {expected}, found {actual}")]
    UnexpectedSource {
        /// Required source tag
        expected: &'static str,
        /// Actual source tag
        actual: &'static str,
    },
}

/// Biometric input rejected before any calculator runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    /// A field needed for calculation is absent from the profile
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Age outside the supported range
    #[error("age {0} outside supported range [13, 120]")]
    AgeOutOfRange(u32),
    /// Height outside the supported range
    #[error("height {0} cm outside supported range [100, 250]")]
    HeightOutOfRange(u32),
    /// Weight outside the supported range (or not a finite number)
    #[error("weight {0} kg outside supported range [30.0, 300.0]")]
    WeightOutOfRange(f64),
    /// Birth date lies in the future relative to the evaluation date
    #[error("birth date is in the future")]
    BirthDateInFuture,
}

impl InputValidationError {
    /// Name of the field the error refers to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::AgeOutOfRange(_) | Self::BirthDateInFuture => "birth_date",
            Self::HeightOutOfRange(_) => "height_cm",
            Self::WeightOutOfRange(_) => "weight_kg",
        }
    }
}

/// A calculator failed to produce a value for one goal dimension
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Intermediate arithmetic produced a non-finite or negative value
    #[error("{calculator} produced a non-finite intermediate value: {details}")]
    NonFinite {
        /// Calculator that failed
        calculator: &'static str,
        /// What went wrong
        details: String,
    },
    /// The calculator panicked and was contained by the service
    #[error("{calculator} aborted unexpectedly")]
    Aborted {
        /// Calculator that failed
        calculator: &'static str,
    },
    /// Any other calculator-specific failure
    #[error("{calculator} failed: {details}")]
    Failed {
        /// Calculator that failed
        calculator: &'static str,
        /// What went wrong
        details: String,
    },
    /// Fallback goals did not satisfy their own safety band
    #[error("fallback goals failed validation: {0}")]
    InvalidFallback(#[from] GoalValidationError),
}

impl CalculationError {
    /// Create a generic calculator failure
    pub fn failed(calculator: &'static str, details: impl Into<String>) -> Self {
        Self::Failed {
            calculator,
            details: details.into(),
        }
    }

    /// Create a non-finite intermediate value failure
    pub fn non_finite(calculator: &'static str, details: impl Into<String>) -> Self {
        Self::NonFinite {
            calculator,
            details: details.into(),
        }
    }
}
