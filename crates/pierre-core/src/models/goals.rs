// ABOUTME: Daily goal set model with bounds validation and freshness rules
// ABOUTME: DailyGoals is immutable once produced; a new calculation supersedes it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::goal_bounds::{
    CALORIES_MAX, CALORIES_MIN, HEART_POINTS_MAX, HEART_POINTS_MIN, STEPS_MAX, STEPS_MIN,
};
use crate::constants::goal_freshness::FRESHNESS_WINDOW_HOURS;
use crate::errors::GoalValidationError;

/// How a goal set was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationSource {
    /// Personalized result of the published formulas
    StandardFormula,
    /// Safe defaults used because personalized calculation was impossible or failed
    FallbackDefault,
    /// Targets edited by the user
    UserAdjusted,
}

impl CalculationSource {
    /// Stable identifier for logs and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StandardFormula => "standard_formula",
            Self::FallbackDefault => "fallback_default",
            Self::UserAdjusted => "user_adjusted",
        }
    }
}

impl fmt::Display for CalculationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three daily targets for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    /// Owner of the goal set
    pub owner_id: Uuid,
    /// Daily steps target
    pub steps_goal: u32,
    /// Daily calories target (kcal)
    pub calories_goal: u32,
    /// Daily heart points target
    pub heart_points_goal: u32,
    /// When the goal set was produced
    pub calculated_at: DateTime<Utc>,
    /// How the goal set was produced
    pub calculation_source: CalculationSource,
}

impl DailyGoals {
    /// Create a goal set stamped with the current time
    #[must_use]
    pub fn new(
        owner_id: Uuid,
        steps_goal: u32,
        calories_goal: u32,
        heart_points_goal: u32,
        calculation_source: CalculationSource,
    ) -> Self {
        Self {
            owner_id,
            steps_goal,
            calories_goal,
            heart_points_goal,
            calculated_at: Utc::now(),
            calculation_source,
        }
    }

    /// Replace the calculation timestamp
    #[must_use]
    pub const fn with_calculated_at(mut self, calculated_at: DateTime<Utc>) -> Self {
        self.calculated_at = calculated_at;
        self
    }

    /// Check all three targets against the personalized goal bounds
    ///
    /// # Errors
    ///
    /// Returns the first dimension found outside its range.
    pub const fn validate(&self) -> Result<(), GoalValidationError> {
        self.validate_within(&GoalBounds::PERSONALIZED)
    }

    /// Check all three targets against arbitrary bounds
    ///
    /// # Errors
    ///
    /// Returns the first dimension found outside its range.
    pub const fn validate_within(&self, bounds: &GoalBounds) -> Result<(), GoalValidationError> {
        if self.steps_goal < bounds.steps_min || self.steps_goal > bounds.steps_max {
            return Err(GoalValidationError::StepsOutOfRange {
                value: self.steps_goal,
                min: bounds.steps_min,
                max: bounds.steps_max,
            });
        }
        if self.calories_goal < bounds.calories_min || self.calories_goal > bounds.calories_max {
            return Err(GoalValidationError::CaloriesOutOfRange {
                value: self.calories_goal,
                min: bounds.calories_min,
                max: bounds.calories_max,
            });
        }
        if self.heart_points_goal < bounds.heart_points_min
            || self.heart_points_goal > bounds.heart_points_max
        {
            return Err(GoalValidationError::HeartPointsOutOfRange {
                value: self.heart_points_goal,
                min: bounds.heart_points_min,
                max: bounds.heart_points_max,
            });
        }
        Ok(())
    }

    /// Whether the goal set is still fresh at `now` using the default 24h window
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        is_within_freshness_window(
            self.calculated_at,
            now,
            Duration::hours(FRESHNESS_WINDOW_HOURS),
        )
    }

    /// Whether the goal set is still fresh right now
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// Freshness rule shared by every staleness decision: strictly less than `window` old
///
/// Timestamps in the future (clock skew between devices) count as fresh.
#[must_use]
pub fn is_within_freshness_window(
    calculated_at: DateTime<Utc>,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    now.signed_duration_since(calculated_at) < window
}

/// Inclusive bounds for the three goal dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalBounds {
    /// Steps lower bound
    pub steps_min: u32,
    /// Steps upper bound
    pub steps_max: u32,
    /// Calories lower bound
    pub calories_min: u32,
    /// Calories upper bound
    pub calories_max: u32,
    /// Heart points lower bound
    pub heart_points_min: u32,
    /// Heart points upper bound
    pub heart_points_max: u32,
}

impl GoalBounds {
    /// Bounds for personalized goals
    pub const PERSONALIZED: Self = Self {
        steps_min: STEPS_MIN,
        steps_max: STEPS_MAX,
        calories_min: CALORIES_MIN,
        calories_max: CALORIES_MAX,
        heart_points_min: HEART_POINTS_MIN,
        heart_points_max: HEART_POINTS_MAX,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals_at(calculated_at: DateTime<Utc>) -> DailyGoals {
        DailyGoals::new(
            Uuid::new_v4(),
            10_000,
            2_000,
            21,
            CalculationSource::StandardFormula,
        )
        .with_calculated_at(calculated_at)
    }

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        let almost_a_day = goals_at(now - Duration::hours(23) - Duration::minutes(59));
        let exactly_a_day = goals_at(now - Duration::hours(24));

        assert!(almost_a_day.is_fresh_at(now));
        assert!(!exactly_a_day.is_fresh_at(now));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let now = Utc::now();
        assert!(goals_at(now + Duration::minutes(5)).is_fresh_at(now));
    }

    #[test]
    fn test_validate_reports_out_of_range_dimension() {
        let mut goals = goals_at(Utc::now());
        assert!(goals.validate().is_ok());

        goals.heart_points_goal = 51;
        assert_eq!(
            goals.validate(),
            Err(GoalValidationError::HeartPointsOutOfRange {
                value: 51,
                min: 15,
                max: 50
            })
        );

        goals.heart_points_goal = 30;
        goals.steps_goal = 4_999;
        assert!(matches!(
            goals.validate(),
            Err(GoalValidationError::StepsOutOfRange { value: 4_999, .. })
        ));
    }
}
