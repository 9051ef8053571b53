// ABOUTME: Main library entry point for the Pierre daily goal engine
// ABOUTME: Personalized steps, calories and heart points goals with safe fallbacks and debounced recalculation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Goal Engine
//!
//! Computes personalized daily steps, calories and heart points targets from a
//! user's biometric profile, keeps them in step with profile edits, and falls
//! back to conservative goals whenever a personalized calculation is
//! unavailable.
//!
//! ## Architecture
//!
//! - **Calculators** (`pierre-intelligence`): pure formulas and fallback generation
//! - **Services**: calculation service, calculate-and-store use case, profile
//!   updates and debounced recalculation triggers
//! - **Repositories**: storage traits with in-memory implementations
//! - **Config**: engine settings from `GOAL_ENGINE_*` environment variables
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pierre_goal_engine::config::GoalEngineConfig;
//! use pierre_goal_engine::engine::GoalEngine;
//! use pierre_goal_engine::errors::AppResult;
//! use pierre_goal_engine::repositories::{InMemoryGoalsRepository, InMemoryProfileRepository};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let engine = GoalEngine::new(
//!         Arc::new(InMemoryProfileRepository::new()),
//!         Arc::new(InMemoryGoalsRepository::new()),
//!         GoalEngineConfig::from_env(),
//!     )?;
//!
//!     let result = engine
//!         .goal_calculation
//!         .calculate_and_store_goals(Uuid::new_v4(), false)
//!         .await;
//!     println!("{result:?}");
//!     Ok(())
//! }
//! ```

/// Engine configuration
pub mod config;

/// Engine wiring
pub mod engine;

/// Error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Storage abstractions and in-memory implementations
pub mod repositories;

/// Bounded retry with exponential backoff
pub mod retry;

/// Goal calculation and profile update services
pub mod services;

/// Domain models re-exported from `pierre-core`
pub mod models {
    pub use pierre_core::models::{
        age_in_years, is_within_freshness_window, ActivityLevel, AgeGroup, CalculationSource,
        DailyGoals, Gender, GoalBounds, GoalCalculationInput, UnitSystem, UserProfile,
    };
}

pub use pierre_intelligence::{calculators, fallback};
