// ABOUTME: Daily calories goal calculator using Mifflin-St Jeor BMR and activity factors
// ABOUTME: Exposes the BMR, formula variant and activity factor through an auditable breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calories goal calculation
//!
//! `BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + c` where `c` is +5 for
//! men, -161 for women and -78 (the midpoint) when gender is other or
//! unspecified. The goal is `BMR x activity factor`, floored and clamped to
//! `[1200, 4000]`.

use pierre_core::constants::goal_bounds::{CALORIES_MAX, CALORIES_MIN};
use pierre_core::errors::CalculationError;
use pierre_core::models::{Gender, GoalCalculationInput};
use serde::Serialize;

use super::{floor_and_clamp, GoalCalculator, GoalDimension};
use crate::config::GoalFormulaConfig;

const CALCULATOR_NAME: &str = "calories_goal_calculator";

/// Which BMR equation variant was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor with the male constant
    MifflinStJeorMale,
    /// Mifflin-St Jeor with the female constant
    MifflinStJeorFemale,
    /// Mifflin-St Jeor with the midpoint constant
    GenderNeutral,
}

impl BmrFormula {
    /// Formula variant for a gender
    #[must_use]
    pub const fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::MifflinStJeorMale,
            Gender::Female => Self::MifflinStJeorFemale,
            Gender::Other | Gender::Unspecified => Self::GenderNeutral,
        }
    }
}

/// Auditable intermediate values of a calories calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaloriesBreakdown {
    /// Equation variant used
    pub formula: BmrFormula,
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Activity factor applied to the BMR
    pub activity_factor: f64,
    /// Unclamped total daily energy expenditure
    pub raw_calories: f64,
    /// Final calories goal
    pub calories_goal: u32,
    /// Whether clamping changed the value
    pub was_clamped: bool,
}

/// Calories goal from BMR and activity level
#[derive(Debug, Clone, Default)]
pub struct CaloriesGoalCalculator {
    config: GoalFormulaConfig,
}

impl CaloriesGoalCalculator {
    /// Create a calculator with the published coefficients
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom coefficients
    #[must_use]
    pub const fn with_config(config: GoalFormulaConfig) -> Self {
        Self { config }
    }

    /// Coefficients in use
    #[must_use]
    pub const fn config(&self) -> &GoalFormulaConfig {
        &self.config
    }

    /// Basal metabolic rate for the input
    #[must_use]
    pub fn bmr(&self, input: &GoalCalculationInput) -> f64 {
        let bmr = &self.config.bmr;
        bmr.msj_weight_coef.mul_add(
            input.weight_kg(),
            bmr.msj_height_coef.mul_add(
                f64::from(input.height_cm()),
                bmr.msj_age_coef * f64::from(input.age()),
            ),
        ) + bmr.constant_for(input.gender())
    }

    /// Calculate with every intermediate value exposed
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] if the coefficients produce a non-finite
    /// or negative energy expenditure.
    pub fn breakdown(
        &self,
        input: &GoalCalculationInput,
    ) -> Result<CaloriesBreakdown, CalculationError> {
        let bmr = self.bmr(input);
        let activity_factor = self
            .config
            .activity_factors
            .factor_for(input.activity_level());
        let raw_calories = bmr * activity_factor;
        let goal = floor_and_clamp(CALCULATOR_NAME, raw_calories, CALORIES_MIN, CALORIES_MAX)?;

        Ok(CaloriesBreakdown {
            formula: BmrFormula::for_gender(input.gender()),
            bmr,
            activity_factor,
            raw_calories,
            calories_goal: goal.value,
            was_clamped: goal.was_clamped,
        })
    }
}

impl GoalCalculator for CaloriesGoalCalculator {
    fn dimension(&self) -> GoalDimension {
        GoalDimension::Calories
    }

    fn name(&self) -> &'static str {
        CALCULATOR_NAME
    }

    fn calculate(&self, input: &GoalCalculationInput) -> Result<u32, CalculationError> {
        self.breakdown(input).map(|breakdown| breakdown.calories_goal)
    }
}
