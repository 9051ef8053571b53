// ABOUTME: Goal engine runtime configuration loaded from GOAL_ENGINE_* environment variables
// ABOUTME: Retry attempts, backoff, freshness window, debounce window and recalculation strategy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use pierre_core::constants::goal_engine::{
    CALCULATION_BUDGET_MS, DEBOUNCE_WINDOW_MS, HISTORY_LIMIT, MAX_CALCULATION_ATTEMPTS,
    MAX_PROFILE_FETCH_ATTEMPTS, RETRY_BASE_DELAY_MS,
};
use pierre_core::constants::goal_freshness::{FRESHNESS_WINDOW_HOURS, MAX_FRESHNESS_WINDOW_HOURS};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult, ErrorCode};

/// How profile updates hand goal-affecting changes to recalculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalculationStrategy {
    /// Recalculate inside the update call and return the nested result
    #[default]
    Immediate,
    /// Hand the change to the trigger service and return without a nested result
    Debounced,
}

impl RecalculationStrategy {
    /// Parse from a string, defaulting to `Immediate` for unknown values
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "debounced" | "debounce" => Self::Debounced,
            _ => Self::Immediate,
        }
    }
}

impl fmt::Display for RecalculationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("immediate"),
            Self::Debounced => f.write_str("debounced"),
        }
    }
}

/// Goal engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEngineConfig {
    /// Stored goals younger than this are reused without recalculation
    pub freshness_window_hours: i64,
    /// Profile reads attempted before surfacing a storage failure
    pub max_profile_fetch_attempts: u32,
    /// Calculation attempts before surfacing a calculation failure
    pub max_calculation_attempts: u32,
    /// Backoff before the second attempt, doubled for each later one
    pub retry_base_delay_ms: u64,
    /// Debounce window for coalescing profile edits
    pub debounce_window_ms: u64,
    /// Diagnostic history entries kept per owner
    pub history_limit: usize,
    /// Calculations slower than this are logged as warnings
    pub calculation_budget_ms: u64,
    /// Where profile updates send recalculation work
    pub recalculation_strategy: RecalculationStrategy,
}

impl Default for GoalEngineConfig {
    fn default() -> Self {
        Self {
            freshness_window_hours: FRESHNESS_WINDOW_HOURS,
            max_profile_fetch_attempts: MAX_PROFILE_FETCH_ATTEMPTS,
            max_calculation_attempts: MAX_CALCULATION_ATTEMPTS,
            retry_base_delay_ms: RETRY_BASE_DELAY_MS,
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            history_limit: HISTORY_LIMIT,
            calculation_budget_ms: CALCULATION_BUDGET_MS,
            recalculation_strategy: RecalculationStrategy::default(),
        }
    }
}

impl GoalEngineConfig {
    /// Load goal engine configuration from environment
    ///
    /// Missing or unparseable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            freshness_window_hours: env::var("GOAL_ENGINE_FRESHNESS_WINDOW_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(FRESHNESS_WINDOW_HOURS),
            max_profile_fetch_attempts: env::var("GOAL_ENGINE_MAX_PROFILE_FETCH_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_PROFILE_FETCH_ATTEMPTS),
            max_calculation_attempts: env::var("GOAL_ENGINE_MAX_CALCULATION_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CALCULATION_ATTEMPTS),
            retry_base_delay_ms: env::var("GOAL_ENGINE_RETRY_BASE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(RETRY_BASE_DELAY_MS),
            debounce_window_ms: env::var("GOAL_ENGINE_DEBOUNCE_WINDOW_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEBOUNCE_WINDOW_MS),
            history_limit: env::var("GOAL_ENGINE_HISTORY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HISTORY_LIMIT),
            calculation_budget_ms: env::var("GOAL_ENGINE_CALCULATION_BUDGET_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CALCULATION_BUDGET_MS),
            recalculation_strategy: env::var("GOAL_ENGINE_RECALCULATION_STRATEGY")
                .map(|s| RecalculationStrategy::from_str_or_default(&s))
                .unwrap_or_default(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error for zero attempt counts, a zero history
    /// limit, or a freshness window that is non-positive or longer than a year.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_profile_fetch_attempts == 0 {
            return Err(invalid("max_profile_fetch_attempts must be at least 1"));
        }
        if self.max_calculation_attempts == 0 {
            return Err(invalid("max_calculation_attempts must be at least 1"));
        }
        if self.history_limit == 0 {
            return Err(invalid("history_limit must be at least 1"));
        }
        if self.freshness_window_hours <= 0 {
            return Err(invalid("freshness_window_hours must be positive"));
        }
        if self.freshness_window_hours > MAX_FRESHNESS_WINDOW_HOURS {
            return Err(invalid("freshness_window_hours must not exceed one year"));
        }
        Ok(())
    }

    /// Freshness window as a signed duration for timestamp arithmetic
    ///
    /// Capped at one year so an unvalidated configuration cannot overflow.
    #[must_use]
    pub fn freshness_window(&self) -> ChronoDuration {
        ChronoDuration::hours(self.freshness_window_hours.min(MAX_FRESHNESS_WINDOW_HOURS))
    }

    /// Base delay of the retry backoff
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Debounce window for the trigger service
    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }

    /// Latency budget for one calculation
    #[must_use]
    pub const fn calculation_budget(&self) -> Duration {
        Duration::from_millis(self.calculation_budget_ms)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::new(ErrorCode::ConfigInvalid, message)
}
