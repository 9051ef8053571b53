// ABOUTME: Core data models for the goal engine
// ABOUTME: Re-exports profile, biometric enums, calculation input and daily goal types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile`: biometric and preference fields stored per owner
//! - `GoalCalculationInput`: validated biometric parameters for the calculators
//! - `DailyGoals`: the three daily targets with their source and timestamp

mod biometrics;
mod calculation_input;
mod goals;
mod profile;

pub use biometrics::{ActivityLevel, Gender, UnitSystem};
pub use calculation_input::{AgeGroup, GoalCalculationInput};
pub use goals::{is_within_freshness_window, CalculationSource, DailyGoals, GoalBounds};
pub use profile::{age_in_years, UserProfile};
