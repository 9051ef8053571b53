// ABOUTME: Daily heart points goal calculator based on 150 weekly moderate-activity minutes
// ABOUTME: Scales the daily baseline by age group and activity level, clamped to [15, 50]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::goal_bounds::{HEART_POINTS_MAX, HEART_POINTS_MIN};
use pierre_core::errors::CalculationError;
use pierre_core::models::GoalCalculationInput;
use serde::Serialize;

use super::{age_multiplier, floor_and_clamp, GoalCalculator, GoalDimension};
use crate::physiological_constants::heart_points::{
    DAYS_PER_WEEK, POINTS_PER_MODERATE_MINUTE, WEEKLY_MODERATE_MINUTES,
};

const CALCULATOR_NAME: &str = "heart_points_goal_calculator";

/// Auditable intermediate values of a heart points calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartPointsBreakdown {
    /// Daily baseline: weekly minutes / 7 x points per minute
    pub daily_baseline: f64,
    /// Age multiplier applied
    pub age_multiplier: f64,
    /// Activity multiplier applied
    pub activity_multiplier: f64,
    /// Unclamped heart points value
    pub raw_heart_points: f64,
    /// Final heart points goal
    pub heart_points_goal: u32,
    /// Whether clamping changed the value
    pub was_clamped: bool,
}

/// Heart points goal calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct HeartPointsGoalCalculator;

impl HeartPointsGoalCalculator {
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
    pub fn breakdown(
        &self,
        input: &GoalCalculationInput,
    ) -> Result<HeartPointsBreakdown, CalculationError> {
        let daily_baseline = WEEKLY_MODERATE_MINUTES / DAYS_PER_WEEK * POINTS_PER_MODERATE_MINUTE;
        let age_multiplier = age_multiplier(input.age_group());
        let activity_multiplier = input.activity_level().heart_points_multiplier();
        let raw_heart_points = daily_baseline * age_multiplier * activity_multiplier;
        let goal = floor_and_clamp(
            CALCULATOR_NAME,
            raw_heart_points,
            HEART_POINTS_MIN,
            HEART_POINTS_MAX,
        )?;

        Ok(HeartPointsBreakdown {
            daily_baseline,
            age_multiplier,
            activity_multiplier,
            raw_heart_points,
            heart_points_goal: goal.value,
            was_clamped: goal.was_clamped,
        })
    }
}

impl GoalCalculator for HeartPointsGoalCalculator {
    fn dimension(&self) -> GoalDimension {
        GoalDimension::HeartPoints
    }

    fn name(&self) -> &'static str {
        CALCULATOR_NAME
    }

    fn calculate(&self, input: &GoalCalculationInput) -> Result<u32, CalculationError> {
        self.breakdown(input)
            .map(|breakdown| breakdown.heart_points_goal)
    }
}
