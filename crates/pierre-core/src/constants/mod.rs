// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Goal bounds, fallback safety bands, biometric input ranges and freshness window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Calculator coefficients live next to
//! the calculators in `pierre-intelligence`; this module only holds the bounds
//! every crate must agree on.

/// Accepted ranges for personalized daily goals
pub mod goal_bounds {
    /// Minimum daily steps goal
    pub const STEPS_MIN: u32 = 5_000;
    /// Maximum daily steps goal
    pub const STEPS_MAX: u32 = 20_000;
    /// Minimum daily calories goal (kcal)
    pub const CALORIES_MIN: u32 = 1_200;
    /// Maximum daily calories goal (kcal)
    pub const CALORIES_MAX: u32 = 4_000;
    /// Minimum daily heart points goal
    pub const HEART_POINTS_MIN: u32 = 15;
    /// Maximum daily heart points goal
    pub const HEART_POINTS_MAX: u32 = 50;
}

/// Fallback defaults and the tighter safety band fallback output must respect
pub mod fallback_goals {
    /// Default steps when no profile data is usable
    pub const DEFAULT_STEPS: u32 = 7_500;
    /// Default calories when no profile data is usable
    pub const DEFAULT_CALORIES: u32 = 1_800;
    /// Default heart points when no profile data is usable
    pub const DEFAULT_HEART_POINTS: u32 = 21;

    /// Fallback steps lower bound
    pub const STEPS_MIN: u32 = 6_000;
    /// Fallback steps upper bound
    pub const STEPS_MAX: u32 = 9_000;
    /// Fallback calories lower bound
    pub const CALORIES_MIN: u32 = 1_400;
    /// Fallback calories upper bound
    pub const CALORIES_MAX: u32 = 2_400;
    /// Fallback heart points lower bound
    pub const HEART_POINTS_MIN: u32 = 17;
    /// Fallback heart points upper bound
    pub const HEART_POINTS_MAX: u32 = 25;

    /// Emergency steps when not even fallback context is available
    pub const EMERGENCY_STEPS: u32 = 6_000;
    /// Emergency calories when not even fallback context is available
    pub const EMERGENCY_CALORIES: u32 = 1_600;
    /// Emergency heart points when not even fallback context is available
    pub const EMERGENCY_HEART_POINTS: u32 = 18;
}

/// Ranges a biometric profile must satisfy to be usable for calculation
pub mod input_bounds {
    /// Minimum supported age in years
    pub const AGE_MIN: u32 = 13;
    /// Maximum supported age in years
    pub const AGE_MAX: u32 = 120;
    /// Minimum supported height in centimeters
    pub const HEIGHT_CM_MIN: u32 = 100;
    /// Maximum supported height in centimeters
    pub const HEIGHT_CM_MAX: u32 = 250;
    /// Minimum supported weight in kilograms
    pub const WEIGHT_KG_MIN: f64 = 30.0;
    /// Maximum supported weight in kilograms
    pub const WEIGHT_KG_MAX: f64 = 300.0;
    /// Age below which the youth multipliers apply
    pub const ADULT_AGE: u32 = 18;
    /// Age from which the older-adult multipliers apply
    pub const OLDER_ADULT_AGE: u32 = 65;
}

/// Goal lifecycle timing
pub mod goal_freshness {
    /// Goals computed less than this many hours ago are reused as-is
    pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

    /// Longest configurable freshness window (one year)
    pub const MAX_FRESHNESS_WINDOW_HOURS: i64 = 24 * 366;
}

/// Goal engine pipeline defaults
pub mod goal_engine {
    /// Profile repository reads attempted before giving up
    pub const MAX_PROFILE_FETCH_ATTEMPTS: u32 = 3;
    /// Calculation attempts before surfacing a calculation failure
    pub const MAX_CALCULATION_ATTEMPTS: u32 = 3;
    /// Delay before the second attempt; doubles for each later attempt
    pub const RETRY_BASE_DELAY_MS: u64 = 10;
    /// Quiet period before a debounced recalculation runs
    pub const DEBOUNCE_WINDOW_MS: u64 = 2_000;
    /// Recalculation history entries kept per owner
    pub const HISTORY_LIMIT: usize = 10;
    /// Latency budget for one full goal calculation
    pub const CALCULATION_BUDGET_MS: u64 = 500;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Goal engine service name
    pub const PIERRE_GOAL_ENGINE: &str = "pierre-goal-engine";
}
