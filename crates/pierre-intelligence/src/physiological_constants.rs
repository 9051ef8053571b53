// ABOUTME: Physical-activity guideline constants used by the daily goal calculators
// ABOUTME: Step baselines, heart-point minutes, and age/gender/activity multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants based on published physical-activity guidelines
//!
//! References:
//! - Tudor-Locke, C., et al. (2011). How many steps/day are enough? For adults.
//!   *International Journal of Behavioral Nutrition and Physical Activity*, 8, 79.
//!   <https://doi.org/10.1186/1479-5868-8-79>
//! - World Health Organization (2020). Guidelines on physical activity and sedentary behaviour.
//!   <https://www.who.int/publications/i/item/9789240015128>
//! - American Heart Association (2018). Recommendations for physical activity in adults and kids.

/// Daily step targets (Tudor-Locke et al. 2011)
pub mod steps {
    /// Baseline daily steps for a healthy adult
    pub const BASELINE_DAILY_STEPS: f64 = 10_000.0;
    /// Male steps multiplier
    pub const MALE_MULTIPLIER: f64 = 1.05;
    /// Female steps multiplier
    pub const FEMALE_MULTIPLIER: f64 = 0.95;
    /// Multiplier for other or unspecified gender
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;
}

/// Age multipliers shared by the steps and heart-points calculators
pub mod age {
    /// Youth (< 18): children and adolescents need more daily activity (WHO 2020)
    pub const YOUTH_MULTIPLIER: f64 = 1.2;
    /// Adults (18-64)
    pub const ADULT_MULTIPLIER: f64 = 1.0;
    /// Older adults (>= 65)
    pub const OLDER_ADULT_MULTIPLIER: f64 = 0.8;
}

/// Heart points: 1 point per minute of moderate activity, 2 per vigorous minute (AHA 2018)
pub mod heart_points {
    /// Weekly minutes of moderate-intensity activity recommended for adults
    pub const WEEKLY_MODERATE_MINUTES: f64 = 150.0;
    /// Days per week
    pub const DAYS_PER_WEEK: f64 = 7.0;
    /// Heart points earned per minute of moderate activity
    pub const POINTS_PER_MODERATE_MINUTE: f64 = 1.0;
}

/// Adjustments applied by the fallback generator to its conservative defaults
pub mod fallback_adjustments {
    /// Calories multiplier for men
    pub const CALORIES_MALE_MULTIPLIER: f64 = 1.1;
    /// Calories multiplier for women
    pub const CALORIES_FEMALE_MULTIPLIER: f64 = 0.9;
    /// Calories multiplier for youth
    pub const CALORIES_YOUTH_MULTIPLIER: f64 = 1.05;
    /// Calories multiplier for older adults
    pub const CALORIES_OLDER_ADULT_MULTIPLIER: f64 = 0.9;
}

/// Numeric handling of formula output
pub mod rounding {
    /// Tolerance added before flooring so 11999.999999999998 floors to 12000
    pub const FLOOR_TOLERANCE: f64 = 1e-9;
}
