// ABOUTME: Pure daily goal calculators and the trait the calculation service composes them through
// ABOUTME: Shared age/gender multipliers and the floor-then-clamp finalization step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily goal calculators
//!
//! Every calculator is a pure function of a [`GoalCalculationInput`]: the same
//! input always yields the same goal, no calculator holds mutable state, and all
//! of them can be shared across concurrent calculations behind an `Arc`.

/// Calories goal from BMR and activity level
pub mod calories;
/// Heart points goal from weekly moderate-activity minutes
pub mod heart_points;
/// Steps goal from the daily step baseline
pub mod steps;

pub use calories::{BmrFormula, CaloriesBreakdown, CaloriesGoalCalculator};
pub use heart_points::{HeartPointsBreakdown, HeartPointsGoalCalculator};
pub use steps::{StepsBreakdown, StepsGoalCalculator};

use pierre_core::errors::CalculationError;
use pierre_core::models::{AgeGroup, Gender, GoalCalculationInput};
use serde::Serialize;

use crate::physiological_constants::{age, rounding::FLOOR_TOLERANCE, steps as step_constants};

/// The goal dimension a calculator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDimension {
    /// Daily steps
    Steps,
    /// Daily calories
    Calories,
    /// Daily heart points
    HeartPoints,
}

/// A stateless calculator for one goal dimension
pub trait GoalCalculator: Send + Sync {
    /// Dimension this calculator produces
    fn dimension(&self) -> GoalDimension;

    /// Calculator name for logs and error reports
    fn name(&self) -> &'static str;

    /// Calculate the clamped goal for the input
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] when the formula cannot produce a finite value.
    fn calculate(&self, input: &GoalCalculationInput) -> Result<u32, CalculationError>;
}

/// Age multiplier shared by steps and heart points (more for youth, less for older adults)
#[must_use]
pub const fn age_multiplier(group: AgeGroup) -> f64 {
    match group {
        AgeGroup::Youth => age::YOUTH_MULTIPLIER,
        AgeGroup::Adult => age::ADULT_MULTIPLIER,
        AgeGroup::OlderAdult => age::OLDER_ADULT_MULTIPLIER,
    }
}

/// Steps multiplier by gender
#[must_use]
pub const fn steps_gender_multiplier(gender: Gender) -> f64 {
    match gender {
        Gender::Male => step_constants::MALE_MULTIPLIER,
        Gender::Female => step_constants::FEMALE_MULTIPLIER,
        Gender::Other | Gender::Unspecified => step_constants::NEUTRAL_MULTIPLIER,
    }
}

/// A raw formula value after flooring and clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedGoal {
    /// Final goal value
    pub value: u32,
    /// Whether the floored value had to be moved into range
    pub was_clamped: bool,
}

/// Floor a raw formula value and clamp it into `[min, max]`
///
/// # Errors
///
/// Returns [`CalculationError::NonFinite`] for NaN, infinite or negative values.
pub fn floor_and_clamp(
    calculator: &'static str,
    raw: f64,
    min: u32,
    max: u32,
) -> Result<ClampedGoal, CalculationError> {
    if !raw.is_finite() || raw < 0.0 {
        return Err(CalculationError::non_finite(
            calculator,
            format!("raw value {raw}"),
        ));
    }

    let floored = (raw + FLOOR_TOLERANCE).floor();
    let clamped = floored.clamp(f64::from(min), f64::from(max));

    Ok(ClampedGoal {
        value: clamped as u32,
        was_clamped: (clamped - floored).abs() > f64::EPSILON,
    })
}
