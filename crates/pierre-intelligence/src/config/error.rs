// ABOUTME: Configuration error types for goal formula validation
// ABOUTME: Defines error variants for invalid ranges, non-finite values and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for goal formula validation.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Numeric value is NaN or infinite
    #[error("Value is not finite: {0}")]
    NotFinite(&'static str),

    /// Tiered values are not in ascending order
    #[error("Values out of order: {0}")]
    NotAscending(&'static str),
}
