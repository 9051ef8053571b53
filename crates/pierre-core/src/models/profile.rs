// ABOUTME: User profile model holding biometric and preference fields
// ABOUTME: Derives validated calculation input and reports validity for goal calculation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::biometrics::{ActivityLevel, Gender, UnitSystem};
use super::calculation_input::GoalCalculationInput;
use crate::errors::InputValidationError;

/// A user's wellness profile as stored by the profile repository
///
/// Only `birth_date`, `gender`, `height_cm` and `weight_kg` affect goals.
/// Everything else is presentation preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owner identifier
    pub owner_id: Uuid,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Birth date (required for calculation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Gender (absent means unspecified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Height in centimeters (required for calculation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    /// Weight in kilograms (required for calculation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Habitual activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Preferred display units
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Whether onboarding has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile for an owner
    pub fn new(owner_id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            email: email.into(),
            birth_date: None,
            gender: None,
            height_cm: None,
            weight_kg: None,
            activity_level: ActivityLevel::default(),
            unit_system: UnitSystem::default(),
            onboarding_completed: false,
            updated_at: Utc::now(),
        }
    }

    /// Age in whole years on `today`, if the birth date is known and not in the future
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth| age_in_years(birth, today))
    }

    /// Derive validated calculation input as of `today`
    ///
    /// # Errors
    ///
    /// Returns [`InputValidationError::MissingField`] for absent required fields,
    /// or the range error of the first out-of-range field.
    pub fn calculation_input(
        &self,
        today: NaiveDate,
    ) -> Result<GoalCalculationInput, InputValidationError> {
        let birth_date = self
            .birth_date
            .ok_or(InputValidationError::MissingField("birth_date"))?;
        let age = age_in_years(birth_date, today).ok_or(InputValidationError::BirthDateInFuture)?;
        let height_cm = self
            .height_cm
            .ok_or(InputValidationError::MissingField("height_cm"))?;
        let weight_kg = self
            .weight_kg
            .ok_or(InputValidationError::MissingField("weight_kg"))?;

        GoalCalculationInput::new(
            age,
            self.gender.unwrap_or_default(),
            height_cm,
            weight_kg,
            self.activity_level,
        )
    }

    /// Whether the profile can produce a personalized calculation on `today`
    #[must_use]
    pub fn is_valid_for_calculation(&self, today: NaiveDate) -> bool {
        self.calculation_input(today).is_ok()
    }

    /// Same as [`Self::is_valid_for_calculation`] using the current UTC date
    #[must_use]
    pub fn is_valid_for_calculation_now(&self) -> bool {
        self.is_valid_for_calculation(Utc::now().date_naive())
    }
}

/// Whole years between `birth` and `today`; `None` when `birth` is after `today`
#[must_use]
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_profile() -> UserProfile {
        let mut profile = UserProfile::new(Uuid::new_v4(), "Ada", "ada@example.com");
        profile.birth_date = Some(date(1990, 6, 15));
        profile.gender = Some(Gender::Female);
        profile.height_cm = Some(168);
        profile.weight_kg = Some(61.5);
        profile
    }

    #[test]
    fn test_age_accounts_for_birthday_not_yet_reached() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_in_years(birth, date(2030, 6, 14)), Some(29));
        assert_eq!(age_in_years(birth, date(2030, 6, 15)), Some(30));
        assert_eq!(age_in_years(birth, date(1999, 1, 1)), None);
    }

    #[test]
    fn test_missing_birth_date_is_invalid() {
        let mut profile = complete_profile();
        profile.birth_date = None;

        assert_eq!(
            profile.calculation_input(date(2025, 1, 1)),
            Err(InputValidationError::MissingField("birth_date"))
        );
        assert!(!profile.is_valid_for_calculation(date(2025, 1, 1)));
    }

    #[test]
    fn test_missing_gender_defaults_to_unspecified() {
        let mut profile = complete_profile();
        profile.gender = None;

        let input = profile.calculation_input(date(2025, 1, 1)).unwrap();
        assert_eq!(input.gender(), Gender::Unspecified);
        assert_eq!(input.age(), 34);
    }

    #[test]
    fn test_too_young_is_invalid() {
        let mut profile = complete_profile();
        profile.birth_date = Some(date(2015, 1, 1));
        assert_eq!(
            profile.calculation_input(date(2025, 1, 1)),
            Err(InputValidationError::AgeOutOfRange(10))
        );
    }
}
