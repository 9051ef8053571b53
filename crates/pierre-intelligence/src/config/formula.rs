// ABOUTME: Formula coefficients for the calories calculator
// ABOUTME: Mifflin-St Jeor BMR coefficients and per-tier activity factors with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal formula configuration
//!
//! Defaults reproduce the published equations; overriding them is meant for
//! research builds and tests, not for per-user tuning.

use pierre_core::models::{ActivityLevel, Gender};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Complete formula configuration for the calculators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalFormulaConfig {
    /// Basal metabolic rate coefficients
    pub bmr: BmrConfig,
    /// Energy-expenditure multiplier per activity level
    pub activity_factors: ActivityFactorsConfig,
}

impl GoalFormulaConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid coefficient found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bmr.validate()?;
        self.activity_factors.validate()
    }
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Gender-neutral constant, midpoint of the male and female constants (-78)
    pub msj_neutral_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            msj_neutral_constant: -78.0,
        }
    }
}

impl BmrConfig {
    /// Constant term for the formula variant selected by `gender`
    #[must_use]
    pub const fn constant_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.msj_male_constant,
            Gender::Female => self.msj_female_constant,
            Gender::Other | Gender::Unspecified => self.msj_neutral_constant,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            self.msj_weight_coef,
            self.msj_height_coef,
            self.msj_age_coef,
            self.msj_male_constant,
            self.msj_female_constant,
            self.msj_neutral_constant,
        ];
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NotFinite("BMR coefficients"));
        }
        if self.msj_weight_coef <= 0.0 || self.msj_height_coef <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "BMR weight and height coefficients must be positive",
            ));
        }
        Ok(())
    }
}

/// Activity factor multipliers for total daily energy expenditure
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard daily training): 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: ActivityLevel::Sedentary.multiplier(),
            lightly_active: ActivityLevel::LightlyActive.multiplier(),
            moderately_active: ActivityLevel::ModeratelyActive.multiplier(),
            active: ActivityLevel::Active.multiplier(),
            very_active: ActivityLevel::VeryActive.multiplier(),
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let factors = ActivityLevel::ALL.map(|level| self.factor_for(level));
        if factors.iter().any(|f| !f.is_finite()) {
            return Err(ConfigError::NotFinite("activity factors"));
        }
        if factors.iter().any(|f| !(1.0..=2.5).contains(f)) {
            return Err(ConfigError::InvalidRange(
                "activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::NotAscending(
                "activity factors must increase with activity level",
            ));
        }
        Ok(())
    }
}
