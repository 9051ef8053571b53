// ABOUTME: Validated biometric parameters consumed by every goal calculator
// ABOUTME: Construction rejects out-of-range values so calculators never see bad input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use super::biometrics::{ActivityLevel, Gender};
use crate::constants::input_bounds::{
    ADULT_AGE, AGE_MAX, AGE_MIN, HEIGHT_CM_MAX, HEIGHT_CM_MIN, OLDER_ADULT_AGE, WEIGHT_KG_MAX,
    WEIGHT_KG_MIN,
};
use crate::errors::InputValidationError;

/// Life stage derived from age, selecting the age multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// Younger than 18
    Youth,
    /// 18 to 64
    Adult,
    /// 65 and older
    OlderAdult,
}

impl AgeGroup {
    /// Classify an age in years
    #[must_use]
    pub const fn from_age(age: u32) -> Self {
        if age < ADULT_AGE {
            Self::Youth
        } else if age >= OLDER_ADULT_AGE {
            Self::OlderAdult
        } else {
            Self::Adult
        }
    }
}

/// Biometric parameters with every field inside its supported range
///
/// Fields are private: the only way to obtain a value is [`GoalCalculationInput::new`],
/// so holding one proves the input is usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalCalculationInput {
    age: u32,
    gender: Gender,
    height_cm: u32,
    weight_kg: f64,
    activity_level: ActivityLevel,
}

impl GoalCalculationInput {
    /// Validate and build a calculation input
    ///
    /// # Errors
    ///
    /// Returns an [`InputValidationError`] naming the first out-of-range field.
    pub fn new(
        age: u32,
        gender: Gender,
        height_cm: u32,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> Result<Self, InputValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(InputValidationError::AgeOutOfRange(age));
        }
        if !(HEIGHT_CM_MIN..=HEIGHT_CM_MAX).contains(&height_cm) {
            return Err(InputValidationError::HeightOutOfRange(height_cm));
        }
        // NaN fails the range check as well
        if !(WEIGHT_KG_MIN..=WEIGHT_KG_MAX).contains(&weight_kg) {
            return Err(InputValidationError::WeightOutOfRange(weight_kg));
        }

        Ok(Self {
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
        })
    }

    /// Build an input using the default (lightly active) activity level
    ///
    /// # Errors
    ///
    /// Returns an [`InputValidationError`] naming the first out-of-range field.
    pub fn with_default_activity(
        age: u32,
        gender: Gender,
        height_cm: u32,
        weight_kg: f64,
    ) -> Result<Self, InputValidationError> {
        Self::new(age, gender, height_cm, weight_kg, ActivityLevel::default())
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Gender
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> u32 {
        self.height_cm
    }

    /// Weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Activity level
    #[must_use]
    pub const fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    /// Life stage for the age multipliers
    #[must_use]
    pub const fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_boundaries() {
        assert!(GoalCalculationInput::with_default_activity(13, Gender::Male, 100, 30.0).is_ok());
        assert!(
            GoalCalculationInput::with_default_activity(120, Gender::Female, 250, 300.0).is_ok()
        );
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        assert_eq!(
            GoalCalculationInput::with_default_activity(12, Gender::Male, 170, 70.0),
            Err(InputValidationError::AgeOutOfRange(12))
        );
        assert_eq!(
            GoalCalculationInput::with_default_activity(30, Gender::Male, 251, 70.0),
            Err(InputValidationError::HeightOutOfRange(251))
        );
        assert!(matches!(
            GoalCalculationInput::with_default_activity(30, Gender::Male, 170, 29.9),
            Err(InputValidationError::WeightOutOfRange(_))
        ));
        assert!(
            GoalCalculationInput::with_default_activity(30, Gender::Male, 170, f64::NAN).is_err()
        );
    }

    #[test]
    fn test_default_activity_is_light() {
        let input = GoalCalculationInput::with_default_activity(40, Gender::Other, 165, 62.5).unwrap();
        assert_eq!(input.activity_level(), ActivityLevel::LightlyActive);
    }

    #[test]
    fn test_age_groups() {
        assert_eq!(AgeGroup::from_age(17), AgeGroup::Youth);
        assert_eq!(AgeGroup::from_age(18), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(64), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(65), AgeGroup::OlderAdult);
    }
}
