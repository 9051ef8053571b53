// ABOUTME: Conservative fallback goal generation when personalized calculation is unavailable
// ABOUTME: Applies partial-profile adjustments inside a tighter safety band than the calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback goals
//!
//! Fallback goals start from 7500 steps, 1800 kcal and 21 heart points. When
//! some profile data is known the same adjustment directions as the
//! calculators are applied, and the result is clamped into the fallback band
//! (steps `[6000, 9000]`, calories `[1400, 2400]`, heart points `[17, 25]`),
//! which is always inside the personalized bounds.
//!
//! Output is deterministic: the same owner and profile data always produce
//! the same triple. Only `calculated_at` differs between calls.

use std::error::Error;

use chrono::{NaiveDate, Utc};
use pierre_core::constants::fallback_goals::{
    CALORIES_MAX, CALORIES_MIN, DEFAULT_CALORIES, DEFAULT_HEART_POINTS, DEFAULT_STEPS,
    EMERGENCY_CALORIES, EMERGENCY_HEART_POINTS, EMERGENCY_STEPS, HEART_POINTS_MAX,
    HEART_POINTS_MIN, STEPS_MAX, STEPS_MIN,
};
use pierre_core::errors::GoalValidationError;
use pierre_core::models::{
    AgeGroup, CalculationSource, DailyGoals, Gender, GoalBounds, GoalCalculationInput, UserProfile,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculators::{age_multiplier, steps_gender_multiplier};
use crate::physiological_constants::fallback_adjustments::{
    CALORIES_FEMALE_MULTIPLIER, CALORIES_MALE_MULTIPLIER, CALORIES_OLDER_ADULT_MULTIPLIER,
    CALORIES_YOUTH_MULTIPLIER,
};
use crate::physiological_constants::rounding::FLOOR_TOLERANCE;

/// Safety band every fallback goal set must satisfy
pub const FALLBACK_BOUNDS: GoalBounds = GoalBounds {
    steps_min: STEPS_MIN,
    steps_max: STEPS_MAX,
    calories_min: CALORIES_MIN,
    calories_max: CALORIES_MAX,
    heart_points_min: HEART_POINTS_MIN,
    heart_points_max: HEART_POINTS_MAX,
};

/// Whatever biometric context survived for a fallback calculation
#[derive(Debug, Clone, Copy, Default)]
struct FallbackContext {
    age_group: Option<AgeGroup>,
    gender: Gender,
}

impl FallbackContext {
    fn from_profile(profile: Option<&UserProfile>, today: NaiveDate) -> Self {
        profile.map_or_else(Self::default, |profile| Self {
            age_group: profile.age_on(today).map(AgeGroup::from_age),
            gender: profile.gender.unwrap_or_default(),
        })
    }

    fn from_input(input: &GoalCalculationInput) -> Self {
        Self {
            age_group: Some(input.age_group()),
            gender: input.gender(),
        }
    }

    fn age_multiplier(self) -> f64 {
        self.age_group.map_or(1.0, age_multiplier)
    }

    fn calories_age_multiplier(self) -> f64 {
        match self.age_group {
            Some(AgeGroup::Youth) => CALORIES_YOUTH_MULTIPLIER,
            Some(AgeGroup::OlderAdult) => CALORIES_OLDER_ADULT_MULTIPLIER,
            Some(AgeGroup::Adult) | None => 1.0,
        }
    }

    const fn calories_gender_multiplier(self) -> f64 {
        match self.gender {
            Gender::Male => CALORIES_MALE_MULTIPLIER,
            Gender::Female => CALORIES_FEMALE_MULTIPLIER,
            Gender::Other | Gender::Unspecified => 1.0,
        }
    }
}

/// Stateless generator of safe, bounded default goals
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGoalGenerator;

impl FallbackGoalGenerator {
    /// Create the generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fallback goals adjusted by whatever profile data is available
    #[must_use]
    pub fn generate_fallback_goals(&self, owner_id: Uuid, profile: Option<&UserProfile>) -> DailyGoals {
        self.generate_fallback_goals_on(owner_id, profile, Utc::now().date_naive())
    }

    /// Same as [`Self::generate_fallback_goals`] with an explicit calendar date for age
    #[must_use]
    pub fn generate_fallback_goals_on(
        &self,
        owner_id: Uuid,
        profile: Option<&UserProfile>,
        today: NaiveDate,
    ) -> DailyGoals {
        Self::build(owner_id, FallbackContext::from_profile(profile, today))
    }

    /// Fallback goals for a validated input whose personalized calculation failed
    #[must_use]
    pub fn generate_fallback_goals_for_input(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> DailyGoals {
        Self::build(owner_id, FallbackContext::from_input(input))
    }

    /// Fallback goals keyed by the failure that made them necessary
    ///
    /// The error only affects logging; bounds are identical for every cause.
    #[must_use]
    pub fn generate_fallback_goals_for_error(
        &self,
        owner_id: Uuid,
        error: &dyn Error,
        profile: Option<&UserProfile>,
    ) -> DailyGoals {
        warn!(
            user.id = %owner_id,
            error = %error,
            has_profile = profile.is_some(),
            "Generating fallback goals after failure"
        );
        self.generate_fallback_goals(owner_id, profile)
    }

    /// Fixed ultra-conservative goals for when no context is available at all
    #[must_use]
    pub fn create_emergency_fallback_goals(&self, owner_id: Uuid) -> DailyGoals {
        warn!(user.id = %owner_id, "Using emergency fallback goals");
        DailyGoals::new(
            owner_id,
            EMERGENCY_STEPS,
            EMERGENCY_CALORIES,
            EMERGENCY_HEART_POINTS,
            CalculationSource::FallbackDefault,
        )
    }

    /// Check fallback bounds and the fallback source tag
    ///
    /// # Errors
    ///
    /// Returns [`GoalValidationError::UnexpectedSource`] when the goals are not
    /// tagged as fallback, or the first out-of-band dimension.
    pub fn validate_fallback_goals(&self, goals: &DailyGoals) -> Result<(), GoalValidationError> {
        if goals.calculation_source != CalculationSource::FallbackDefault {
            return Err(GoalValidationError::UnexpectedSource {
                expected: CalculationSource::FallbackDefault.as_str(),
                actual: goals.calculation_source.as_str(),
            });
        }
        goals.validate_within(&FALLBACK_BOUNDS)
    }

    fn build(owner_id: Uuid, context: FallbackContext) -> DailyGoals {
        let age = context.age_multiplier();
        let steps = clamp_floor(
            f64::from(DEFAULT_STEPS) * age * steps_gender_multiplier(context.gender),
            STEPS_MIN,
            STEPS_MAX,
        );
        let calories = clamp_floor(
            f64::from(DEFAULT_CALORIES)
                * context.calories_gender_multiplier()
                * context.calories_age_multiplier(),
            CALORIES_MIN,
            CALORIES_MAX,
        );
        let heart_points = clamp_floor(
            f64::from(DEFAULT_HEART_POINTS) * age,
            HEART_POINTS_MIN,
            HEART_POINTS_MAX,
        );

        debug!(
            user.id = %owner_id,
            goals.steps = steps,
            goals.calories = calories,
            goals.heart_points = heart_points,
            "Generated fallback goals"
        );

        DailyGoals::new(
            owner_id,
            steps,
            calories,
            heart_points,
            CalculationSource::FallbackDefault,
        )
    }
}

// Fallback multipliers are all positive constants, so the raw value is always finite
fn clamp_floor(raw: f64, min: u32, max: u32) -> u32 {
    (raw + FLOOR_TOLERANCE)
        .floor()
        .clamp(f64::from(min), f64::from(max)) as u32
}
