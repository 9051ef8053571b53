// ABOUTME: Goal calculation algorithms for the Pierre daily goal engine
// ABOUTME: Pure steps, calories and heart points calculators plus the fallback goal generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Stateless algorithms behind the daily goals. Nothing in this crate performs
//! I/O or holds mutable state, so every type here can be shared freely between
//! concurrent calculations.
//!
//! ## Modules
//!
//! - **calculators**: Steps, calories and heart points calculators with auditable breakdowns
//! - **fallback**: Conservative goals for incomplete profiles and failed calculations
//! - **config**: Mifflin-St Jeor coefficients and activity factors
//! - **`physiological_constants`**: Published baselines and multipliers

/// Daily goal calculators
pub mod calculators;

/// Formula configuration and validation
pub mod config;

/// Fallback goal generation
pub mod fallback;

/// Physiological baselines and multipliers used by the calculators
pub mod physiological_constants;

pub use calculators::{
    CaloriesGoalCalculator, GoalCalculator, GoalDimension, HeartPointsGoalCalculator,
    StepsGoalCalculator,
};
pub use fallback::{FallbackGoalGenerator, FALLBACK_BOUNDS};
