// ABOUTME: Calculate-and-store pipeline for daily goals with freshness reuse and bounded retries
// ABOUTME: Folds every failure into a typed GoalCalculationResult instead of returning errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Calculation Use Case
//!
//! Pipeline for one owner:
//!
//! 1. Reuse stored goals when they are fresh and recalculation is not forced
//! 2. Fetch the profile, retrying repository failures
//! 3. Calculate (or fall back for incomplete profiles), retrying engine failures
//! 4. Re-validate against domain bounds
//! 5. Persist once; persistence is not retried

use std::future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use pierre_core::models::{
    is_within_freshness_window, CalculationSource, DailyGoals, GoalCalculationInput, UserProfile,
};
use pierre_intelligence::FallbackGoalGenerator;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::goal_calculation::GoalCalculationEngine;
use crate::config::GoalEngineConfig;
use crate::errors::{CalculationError, GoalErrorKind};
use crate::logging::GoalEngineLogger;
use crate::repositories::{GoalsRepository, ProfileRepository};
use crate::retry::retry_with_backoff;

/// Outcome of a goal calculation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalCalculationResult {
    /// Goals are available
    Success {
        /// The stored goal set
        goals: DailyGoals,
        /// False when fresh stored goals were reused
        was_recalculated: bool,
        /// How the goal set was produced
        source: CalculationSource,
    },
    /// No goals could be produced or stored
    Error {
        /// Stable error category
        kind: GoalErrorKind,
        /// Diagnostic message
        message: String,
    },
}

impl GoalCalculationResult {
    fn success(goals: DailyGoals, was_recalculated: bool) -> Self {
        Self::Success {
            source: goals.calculation_source,
            goals,
            was_recalculated,
        }
    }

    /// Whether goals are available
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The goal set, if successful
    #[must_use]
    pub const fn goals(&self) -> Option<&DailyGoals> {
        match self {
            Self::Success { goals, .. } => Some(goals),
            Self::Error { .. } => None,
        }
    }

    /// The error kind, if failed
    #[must_use]
    pub const fn error_kind(&self) -> Option<GoalErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }
}

struct PipelineFailure {
    kind: GoalErrorKind,
    message: String,
}

impl PipelineFailure {
    fn new(kind: GoalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Calculates, validates and stores daily goals for an owner
pub struct GoalCalculationUseCase {
    profiles: Arc<dyn ProfileRepository>,
    goals: Arc<dyn GoalsRepository>,
    engine: Arc<dyn GoalCalculationEngine>,
    fallback: FallbackGoalGenerator,
    config: GoalEngineConfig,
}

impl GoalCalculationUseCase {
    /// Create the use case
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        goals: Arc<dyn GoalsRepository>,
        engine: Arc<dyn GoalCalculationEngine>,
        config: GoalEngineConfig,
    ) -> Self {
        Self {
            profiles,
            goals,
            engine,
            fallback: FallbackGoalGenerator::new(),
            config,
        }
    }

    /// Engine configuration in use
    #[must_use]
    pub const fn config(&self) -> &GoalEngineConfig {
        &self.config
    }

    /// Return fresh stored goals, or calculate and store new ones
    pub async fn calculate_and_store_goals(
        &self,
        owner_id: Uuid,
        force_recalculation: bool,
    ) -> GoalCalculationResult {
        if !force_recalculation {
            if let Some(stored) = self.fresh_stored_goals(owner_id).await {
                debug!(user.id = %owner_id, "Reusing fresh stored goals");
                GoalEngineLogger::log_goal_calculation(owner_id, stored.calculation_source, false, 0);
                return GoalCalculationResult::success(stored, false);
            }
        }

        self.run(owner_id, None).await
    }

    /// Recalculate unconditionally, reusing an already-loaded profile when given
    pub async fn recalculate_goals_for_profile_update(
        &self,
        owner_id: Uuid,
        profile: Option<UserProfile>,
    ) -> GoalCalculationResult {
        self.run(owner_id, profile).await
    }

    /// Whether the owner has fresh goals produced by the standard formulas
    ///
    /// Fallback goals never count: a personalized calculation is still owed.
    pub async fn has_valid_goals(&self, owner_id: Uuid) -> bool {
        self.fresh_stored_goals(owner_id)
            .await
            .is_some_and(|goals| goals.calculation_source == CalculationSource::StandardFormula)
    }

    async fn fresh_stored_goals(&self, owner_id: Uuid) -> Option<DailyGoals> {
        let stored = self.goals.get_current_goals(owner_id).await?;
        let calculated_at = self
            .goals
            .get_last_calculation_time(owner_id)
            .await
            .unwrap_or(stored.calculated_at);

        self.is_fresh(calculated_at, Utc::now()).then_some(stored)
    }

    fn is_fresh(&self, calculated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        is_within_freshness_window(calculated_at, now, self.config.freshness_window())
    }

    async fn run(&self, owner_id: Uuid, profile: Option<UserProfile>) -> GoalCalculationResult {
        let started = Instant::now();
        match self.pipeline(owner_id, profile).await {
            Ok(goals) => {
                GoalEngineLogger::log_goal_calculation(
                    owner_id,
                    goals.calculation_source,
                    true,
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                );
                GoalCalculationResult::success(goals, true)
            }
            Err(failure) => {
                GoalEngineLogger::log_goal_error(owner_id, failure.kind, &failure.message);
                GoalCalculationResult::Error {
                    kind: failure.kind,
                    message: failure.message,
                }
            }
        }
    }

    async fn pipeline(
        &self,
        owner_id: Uuid,
        profile: Option<UserProfile>,
    ) -> Result<DailyGoals, PipelineFailure> {
        let profile = match profile {
            Some(profile) => profile,
            None => self.fetch_profile(owner_id).await?,
        };

        let goals = match profile.calculation_input(Utc::now().date_naive()) {
            Ok(input) => self.calculate_with_retry(owner_id, &input).await?,
            Err(e) => {
                info!(
                    user.id = %owner_id,
                    missing = e.field(),
                    "Profile incomplete for personalized goals, storing fallback goals"
                );
                self.fallback
                    .generate_fallback_goals_for_error(owner_id, &e, Some(&profile))
            }
        };

        self.validate(&goals)?;
        self.persist(owner_id, &goals).await
    }

    async fn fetch_profile(&self, owner_id: Uuid) -> Result<UserProfile, PipelineFailure> {
        let profiles = &self.profiles;
        let fetched = retry_with_backoff(
            "get_profile",
            self.config.max_profile_fetch_attempts,
            self.config.retry_base_delay(),
            move |_| profiles.get_profile(owner_id),
        )
        .await
        .map_err(|e| {
            PipelineFailure::new(
                GoalErrorKind::StorageFailed,
                format!("failed to load profile: {e}"),
            )
        })?;

        fetched.ok_or_else(|| {
            PipelineFailure::new(
                GoalErrorKind::ProfileNotFound,
                format!("no profile stored for {owner_id}"),
            )
        })
    }

    async fn calculate_with_retry(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> Result<DailyGoals, PipelineFailure> {
        retry_with_backoff(
            "calculate_goals",
            self.config.max_calculation_attempts,
            self.config.retry_base_delay(),
            |_| future::ready(self.invoke_engine(owner_id, input)),
        )
        .await
        .map_err(|e| {
            PipelineFailure::new(
                GoalErrorKind::CalculationFailed,
                format!("goal calculation failed: {e}"),
            )
        })
    }

    fn invoke_engine(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> Result<DailyGoals, CalculationError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.engine.calculate_goals(owner_id, input)))
            .unwrap_or_else(|_| {
                Err(CalculationError::Aborted {
                    calculator: "goal_calculation_engine",
                })
            })
    }

    fn validate(&self, goals: &DailyGoals) -> Result<(), PipelineFailure> {
        let validation = match goals.calculation_source {
            CalculationSource::FallbackDefault => self.fallback.validate_fallback_goals(goals),
            CalculationSource::StandardFormula | CalculationSource::UserAdjusted => goals.validate(),
        };
        validation.map_err(|e| {
            warn!(user.id = %goals.owner_id, error = %e, "Calculated goals failed validation");
            PipelineFailure::new(GoalErrorKind::ValidationFailed, e.to_string())
        })
    }

    async fn persist(&self, owner_id: Uuid, goals: &DailyGoals) -> Result<DailyGoals, PipelineFailure> {
        let saved = self.goals.save_and_sync_goals(goals).await.map_err(|e| {
            error!(user.id = %owner_id, error = %e, "Failed to store daily goals");
            PipelineFailure::new(GoalErrorKind::StorageFailed, format!("failed to store goals: {e}"))
        })?;

        if saved.owner_id != owner_id {
            return Err(PipelineFailure::new(
                GoalErrorKind::UnexpectedError,
                format!(
                    "goals repository returned goals for {} instead of {owner_id}",
                    saved.owner_id
                ),
            ));
        }
        Ok(saved)
    }
}
