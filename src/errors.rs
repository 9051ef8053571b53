// ABOUTME: Error types for the goal engine, re-exported from pierre-core
// ABOUTME: Unified AppError for repository boundaries and the goal error taxonomy for use case results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Repository traits return [`AppResult`]. Use cases never return raw errors:
//! they fold every failure into a [`GoalErrorKind`] carried inside their
//! result values.

pub use pierre_core::errors::{
    AppError, AppResult, CalculationError, ErrorCode, ErrorContext, GoalErrorKind,
    GoalValidationError, InputValidationError,
};
