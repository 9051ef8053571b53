// ABOUTME: Goal engine service layer: calculation, use cases, change detection and triggers
// ABOUTME: Protocol-agnostic business logic over the repository traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal engine services
//!
//! Use cases never return raw errors. Every failure is folded into a typed
//! result value carrying a [`GoalErrorKind`](crate::errors::GoalErrorKind).

/// Goal-affecting change detection shared by updates and triggers
pub mod change_detection;

/// Calculator composition with fallback substitution
pub mod goal_calculation;

/// Calculate-and-store pipeline with freshness reuse and retries
pub mod goal_calculation_use_case;

/// Profile updates with goal recalculation
pub mod profile_update;

/// Debounced recalculation triggers
pub mod recalculation_trigger;

pub use change_detection::{goal_affecting_changes, ChangesSummary, GoalAffectingField};
pub use goal_calculation::{GoalCalculationEngine, GoalCalculationService};
pub use goal_calculation_use_case::{GoalCalculationResult, GoalCalculationUseCase};
pub use profile_update::{ProfileUpdateResult, ProfileUpdateUseCase};
pub use recalculation_trigger::{
    GoalRecalculationTriggerService, RecalculationRecord, TriggerKind, TriggerState,
};
