// ABOUTME: Biometric enumerations shared by profiles, calculation input and calculators
// ABOUTME: Gender, ActivityLevel with its energy multiplier, and UnitSystem preference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Gender as used by the goal formulas
///
/// `Other` and `Unspecified` select the gender-neutral formula variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (male-specific BMR constant, higher steps multiplier)
    Male,
    /// Female (female-specific BMR constant, lower steps multiplier)
    Female,
    /// Other gender identity (gender-neutral formulas)
    Other,
    /// Not provided (gender-neutral formulas)
    #[default]
    Unspecified,
}

impl Gender {
    /// Whether the gender-neutral formula variants apply
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Other | Self::Unspecified)
    }
}

/// Habitual activity level
///
/// Each tier carries the total-daily-energy-expenditure multiplier from
/// `McArdle` et al. (2010), Exercise Physiology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    Active,
    /// Hard daily exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// All tiers from least to most active
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::Active,
        Self::VeryActive,
    ];

    /// Energy-expenditure multiplier applied to the basal metabolic rate
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Multiplier applied to the daily heart points baseline
    #[must_use]
    pub const fn heart_points_multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 0.9,
            Self::LightlyActive => 0.95,
            Self::ModeratelyActive => 1.0,
            Self::Active => 1.1,
            Self::VeryActive => 1.15,
        }
    }
}

/// Preferred measurement units for display; never affects goals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and centimeters
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}
