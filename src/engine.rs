// ABOUTME: Wiring for the complete goal engine from repositories and configuration
// ABOUTME: Builds the calculation service, use cases and trigger service sharing one config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::info;

use crate::config::{GoalEngineConfig, GoalFormulaConfig};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::repositories::{GoalsRepository, ProfileRepository};
use crate::services::{
    GoalCalculationService, GoalCalculationUseCase, GoalRecalculationTriggerService,
    ProfileUpdateUseCase,
};

/// Fully wired goal engine
pub struct GoalEngine {
    /// Calculate-and-store pipeline
    pub goal_calculation: Arc<GoalCalculationUseCase>,
    /// Profile updates with recalculation
    pub profile_updates: ProfileUpdateUseCase,
    /// Debounced and manual recalculation
    pub triggers: GoalRecalculationTriggerService,
}

impl GoalEngine {
    /// Wire the engine with the published formulas
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        goals: Arc<dyn GoalsRepository>,
        config: GoalEngineConfig,
    ) -> AppResult<Self> {
        Self::with_formula_config(profiles, goals, config, GoalFormulaConfig::default())
    }

    /// Wire the engine with custom calories coefficients
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either configuration fails validation.
    pub fn with_formula_config(
        profiles: Arc<dyn ProfileRepository>,
        goals: Arc<dyn GoalsRepository>,
        config: GoalEngineConfig,
        formula: GoalFormulaConfig,
    ) -> AppResult<Self> {
        config.validate()?;
        formula
            .validate()
            .map_err(|e| AppError::new(ErrorCode::ConfigInvalid, e.to_string()))?;

        let engine = GoalCalculationService::with_formula_config(formula)
            .with_calculation_budget(config.calculation_budget());
        let strategy = config.recalculation_strategy;
        let goal_calculation = Arc::new(GoalCalculationUseCase::new(
            Arc::clone(&profiles),
            goals,
            Arc::new(engine),
            config,
        ));
        let triggers = GoalRecalculationTriggerService::new(Arc::clone(&goal_calculation));
        let profile_updates = ProfileUpdateUseCase::new(profiles, Arc::clone(&goal_calculation))
            .with_trigger_service(triggers.clone());

        info!(recalculation.strategy = %strategy, "Goal engine initialized");

        Ok(Self {
            goal_calculation,
            profile_updates,
            triggers,
        })
    }
}
