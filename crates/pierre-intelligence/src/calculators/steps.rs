// ABOUTME: Daily steps goal calculator based on the 10,000 steps/day baseline
// ABOUTME: Scales the baseline by age group and gender, then clamps to [5000, 20000]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::goal_bounds::{STEPS_MAX, STEPS_MIN};
use pierre_core::errors::CalculationError;
use pierre_core::models::GoalCalculationInput;
use serde::Serialize;

use super::{age_multiplier, floor_and_clamp, steps_gender_multiplier, GoalCalculator, GoalDimension};
use crate::physiological_constants::steps::BASELINE_DAILY_STEPS;

const CALCULATOR_NAME: &str = "steps_goal_calculator";

/// Auditable intermediate values of a steps calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepsBreakdown {
    /// Baseline daily steps before adjustment
    pub baseline_steps: f64,
    /// Age multiplier applied
    pub age_multiplier: f64,
    /// Gender multiplier applied
    pub gender_multiplier: f64,
    /// Unclamped steps value
    pub raw_steps: f64,
    /// Final steps goal
    pub steps_goal: u32,
    /// Whether clamping changed the value
    pub was_clamped: bool,
}

/// Steps goal: `10000 x age multiplier x gender multiplier`, floored and clamped
#[derive(Debug, Clone, Copy, Default)]
pub struct StepsGoalCalculator;

impl StepsGoalCalculator {
    /// Create the calculator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Calculate with every intermediate value exposed
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] if the arithmetic produces a non-finite value.
    pub fn breakdown(&self, input: &GoalCalculationInput) -> Result<StepsBreakdown, CalculationError> {
        let age_multiplier = age_multiplier(input.age_group());
        let gender_multiplier = steps_gender_multiplier(input.gender());
        let raw_steps = BASELINE_DAILY_STEPS * age_multiplier * gender_multiplier;
        let goal = floor_and_clamp(CALCULATOR_NAME, raw_steps, STEPS_MIN, STEPS_MAX)?;

        Ok(StepsBreakdown {
            baseline_steps: BASELINE_DAILY_STEPS,
            age_multiplier,
            gender_multiplier,
            raw_steps,
            steps_goal: goal.value,
            was_clamped: goal.was_clamped,
        })
    }
}

impl GoalCalculator for StepsGoalCalculator {
    fn dimension(&self) -> GoalDimension {
        GoalDimension::Steps
    }

    fn name(&self) -> &'static str {
        CALCULATOR_NAME
    }

    fn calculate(&self, input: &GoalCalculationInput) -> Result<u32, CalculationError> {
        self.breakdown(input).map(|breakdown| breakdown.steps_goal)
    }
}
