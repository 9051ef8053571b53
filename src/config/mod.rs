// ABOUTME: Configuration module for the goal engine
// ABOUTME: Re-exports engine runtime settings and the calculator formula configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Engine runtime settings (retries, windows, strategy)
pub mod engine;

pub use engine::{GoalEngineConfig, RecalculationStrategy};
pub use pierre_intelligence::config::{ActivityFactorsConfig, BmrConfig, GoalFormulaConfig};
