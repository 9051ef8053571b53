// ABOUTME: Goal calculation service composing the steps, calories and heart points calculators
// ABOUTME: Any calculator failure or panic replaces the whole result with validated fallback goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Calculation Service
//!
//! Runs the three calculators against one validated input. Results are all or
//! nothing: if any calculator fails, the steps, calories and heart points goals
//! all come from the fallback generator so a goal set never mixes sources.
//!
//! The service holds no mutable state and can be shared behind an `Arc`
//! between any number of concurrent callers.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pierre_core::constants::goal_engine::CALCULATION_BUDGET_MS;
use pierre_core::models::{CalculationSource, DailyGoals, GoalCalculationInput};
use pierre_intelligence::calculators::{
    CaloriesGoalCalculator, GoalCalculator, GoalDimension, HeartPointsGoalCalculator,
    StepsGoalCalculator,
};
use pierre_intelligence::config::GoalFormulaConfig;
use pierre_intelligence::FallbackGoalGenerator;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, CalculationError, ErrorCode};

/// Produces a complete goal set from validated input
pub trait GoalCalculationEngine: Send + Sync {
    /// Calculate goals for an owner
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] when no valid goal set, not even a
    /// fallback one, could be produced.
    fn calculate_goals(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> Result<DailyGoals, CalculationError>;
}

/// Standard implementation of [`GoalCalculationEngine`]
#[derive(Clone)]
pub struct GoalCalculationService {
    steps: Arc<dyn GoalCalculator>,
    calories: Arc<dyn GoalCalculator>,
    heart_points: Arc<dyn GoalCalculator>,
    fallback: FallbackGoalGenerator,
    calculation_budget: Duration,
}

impl Default for GoalCalculationService {
    fn default() -> Self {
        Self::with_formula_config(GoalFormulaConfig::default())
    }
}

impl GoalCalculationService {
    /// Create the service with the published formulas
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the service with custom calories coefficients
    #[must_use]
    pub fn with_formula_config(config: GoalFormulaConfig) -> Self {
        Self {
            steps: Arc::new(StepsGoalCalculator::new()),
            calories: Arc::new(CaloriesGoalCalculator::with_config(config)),
            heart_points: Arc::new(HeartPointsGoalCalculator::new()),
            fallback: FallbackGoalGenerator::new(),
            calculation_budget: Duration::from_millis(CALCULATION_BUDGET_MS),
        }
    }

    /// Create the service with substitute calculators
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if a calculator is passed in the wrong slot.
    pub fn with_calculators(
        steps: Arc<dyn GoalCalculator>,
        calories: Arc<dyn GoalCalculator>,
        heart_points: Arc<dyn GoalCalculator>,
    ) -> AppResult<Self> {
        for (calculator, expected) in [
            (&steps, GoalDimension::Steps),
            (&calories, GoalDimension::Calories),
            (&heart_points, GoalDimension::HeartPoints),
        ] {
            if calculator.dimension() != expected {
                return Err(AppError::new(
                    ErrorCode::ConfigInvalid,
                    format!(
                        "calculator {} produces {:?}, expected {expected:?}",
                        calculator.name(),
                        calculator.dimension()
                    ),
                ));
            }
        }

        Ok(Self {
            steps,
            calories,
            heart_points,
            fallback: FallbackGoalGenerator::new(),
            calculation_budget: Duration::from_millis(CALCULATION_BUDGET_MS),
        })
    }

    /// Override the latency budget above which a calculation is logged as slow
    #[must_use]
    pub const fn with_calculation_budget(mut self, budget: Duration) -> Self {
        self.calculation_budget = budget;
        self
    }

    fn run_calculators(&self, input: &GoalCalculationInput) -> Result<[u32; 3], CalculationError> {
        Ok([
            invoke(self.steps.as_ref(), input)?,
            invoke(self.calories.as_ref(), input)?,
            invoke(self.heart_points.as_ref(), input)?,
        ])
    }
}

impl GoalCalculationEngine for GoalCalculationService {
    fn calculate_goals(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> Result<DailyGoals, CalculationError> {
        let started = Instant::now();

        let goals = match self.run_calculators(input) {
            Ok([steps, calories, heart_points]) => DailyGoals::new(
                owner_id,
                steps,
                calories,
                heart_points,
                CalculationSource::StandardFormula,
            ),
            Err(e) => {
                warn!(
                    user.id = %owner_id,
                    error = %e,
                    "Calculator failed, substituting fallback goals for every dimension"
                );
                let fallback = self.fallback.generate_fallback_goals_for_input(owner_id, input);
                self.fallback.validate_fallback_goals(&fallback)?;
                fallback
            }
        };

        let elapsed = started.elapsed();
        if elapsed > self.calculation_budget {
            warn!(
                user.id = %owner_id,
                duration_ms = elapsed.as_millis(),
                budget_ms = self.calculation_budget.as_millis(),
                "Goal calculation exceeded latency budget"
            );
        }
        debug!(
            user.id = %owner_id,
            goals.source = %goals.calculation_source,
            goals.steps = goals.steps_goal,
            goals.calories = goals.calories_goal,
            goals.heart_points = goals.heart_points_goal,
            "Calculated daily goals"
        );

        Ok(goals)
    }
}

// A panicking calculator is treated like one that returned an error
fn invoke(
    calculator: &dyn GoalCalculator,
    input: &GoalCalculationInput,
) -> Result<u32, CalculationError> {
    panic::catch_unwind(AssertUnwindSafe(|| calculator.calculate(input))).unwrap_or_else(|_| {
        Err(CalculationError::Aborted {
            calculator: calculator.name(),
        })
    })
}

#[cfg(test)]
mod tests {
    use pierre_core::models::{ActivityLevel, Gender};

    use super::*;

    struct WrongDimension;

    impl GoalCalculator for WrongDimension {
        fn dimension(&self) -> GoalDimension {
            GoalDimension::Calories
        }

        fn name(&self) -> &'static str {
            "wrong_dimension"
        }

        fn calculate(&self, _input: &GoalCalculationInput) -> Result<u32, CalculationError> {
            Ok(0)
        }
    }

    #[test]
    fn test_rejects_calculator_in_wrong_slot() {
        let result = GoalCalculationService::with_calculators(
            Arc::new(WrongDimension),
            Arc::new(CaloriesGoalCalculator::new()),
            Arc::new(HeartPointsGoalCalculator::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_standard_source_on_success() {
        let input =
            GoalCalculationInput::new(30, Gender::Male, 175, 70.0, ActivityLevel::ModeratelyActive)
                .unwrap();
        let owner = Uuid::new_v4();

        let goals = GoalCalculationService::new().calculate_goals(owner, &input).unwrap();

        assert_eq!(goals.owner_id, owner);
        assert_eq!(goals.calculation_source, CalculationSource::StandardFormula);
        assert_eq!(goals.steps_goal, 10_500);
        assert_eq!(goals.heart_points_goal, 21);
    }
}
