// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports formula configuration and its validation error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration validation errors
pub mod error;
/// Formula coefficients for the goal calculators
pub mod formula;

pub use error::ConfigError;
pub use formula::{ActivityFactorsConfig, BmrConfig, GoalFormulaConfig};
