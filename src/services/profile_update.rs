// ABOUTME: Profile update use case with change detection and goal recalculation
// ABOUTME: Fail-fast per-owner concurrency guard, partial-failure semantics and sparse field updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Profile Update Use Case
//!
//! At most one update per owner is in flight. A second concurrent update for
//! the same owner is rejected with `ConcurrentUpdate` rather than queued.
//!
//! A failed goal recalculation never fails the profile update: the update
//! reports success and carries the failed calculation result.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashSet;
use pierre_core::models::{ActivityLevel, Gender, UnitSystem, UserProfile};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::change_detection::ChangesSummary;
use super::goal_calculation_use_case::{GoalCalculationResult, GoalCalculationUseCase};
use super::recalculation_trigger::GoalRecalculationTriggerService;
use crate::config::RecalculationStrategy;
use crate::errors::GoalErrorKind;
use crate::logging::GoalEngineLogger;
use crate::repositories::ProfileRepository;

/// Outcome of a profile update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileUpdateResult {
    /// The profile was stored
    Success {
        /// Profile as stored by the repository
        updated_profile: UserProfile,
        /// Inline recalculation outcome, if one ran
        goal_recalculation: Option<GoalCalculationResult>,
        /// Change detection outcome
        changes: ChangesSummary,
    },
    /// The profile was not stored
    Error {
        /// Stable error category
        kind: GoalErrorKind,
        /// Diagnostic message
        message: String,
    },
}

impl ProfileUpdateResult {
    fn error(owner_id: Uuid, kind: GoalErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        GoalEngineLogger::log_goal_error(owner_id, kind, &message);
        Self::Error { kind, message }
    }

    /// Whether the profile was stored
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error kind, if the update failed
    #[must_use]
    pub const fn error_kind(&self) -> Option<GoalErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }
}

/// Holds an owner's in-progress marker and clears it on drop
struct InProgressGuard<'a> {
    owners: &'a DashSet<Uuid>,
    owner_id: Uuid,
}

impl<'a> InProgressGuard<'a> {
    fn acquire(owners: &'a DashSet<Uuid>, owner_id: Uuid) -> Option<Self> {
        if owners.insert(owner_id) {
            Some(Self { owners, owner_id })
        } else {
            None
        }
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.owners.remove(&self.owner_id);
    }
}

/// Stores profile edits and keeps goals in step with them
pub struct ProfileUpdateUseCase {
    profiles: Arc<dyn ProfileRepository>,
    goal_calculation: Arc<GoalCalculationUseCase>,
    trigger: Option<GoalRecalculationTriggerService>,
    strategy: RecalculationStrategy,
    in_progress: DashSet<Uuid>,
}

impl ProfileUpdateUseCase {
    /// Create the use case with the strategy from the engine configuration
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>, goal_calculation: Arc<GoalCalculationUseCase>) -> Self {
        let strategy = goal_calculation.config().recalculation_strategy;
        Self {
            profiles,
            goal_calculation,
            trigger: None,
            strategy,
            in_progress: DashSet::new(),
        }
    }

    /// Attach the trigger service used by the debounced strategy and forced cancellation
    #[must_use]
    pub fn with_trigger_service(mut self, trigger: GoalRecalculationTriggerService) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Override the recalculation strategy
    #[must_use]
    pub const fn with_strategy(mut self, strategy: RecalculationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Store a full profile and recalculate goals when the change requires it
    pub async fn update_profile_with_goal_recalculation(
        &self,
        updated_profile: UserProfile,
        force_goal_recalculation: bool,
    ) -> ProfileUpdateResult {
        let owner_id = updated_profile.owner_id;
        let Some(_in_progress) = InProgressGuard::acquire(&self.in_progress, owner_id) else {
            return ProfileUpdateResult::error(
                owner_id,
                GoalErrorKind::ConcurrentUpdate,
                "another profile update is in progress",
            );
        };

        let previous = match self.profiles.get_profile(owner_id).await {
            Ok(previous) => previous,
            Err(e) => {
                warn!(
                    user.id = %owner_id,
                    error = %e,
                    "Failed to load stored profile, treating update as new profile"
                );
                None
            }
        };

        let stored = match self.profiles.update_profile(&updated_profile).await {
            Ok(stored) => stored,
            Err(e) => {
                return ProfileUpdateResult::error(
                    owner_id,
                    GoalErrorKind::ProfileUpdateFailed,
                    format!("failed to store profile: {e}"),
                );
            }
        };

        let changes = ChangesSummary::detect(
            previous.as_ref(),
            &stored,
            force_goal_recalculation,
            Utc::now().date_naive(),
        );
        GoalEngineLogger::log_profile_update(
            owner_id,
            &changes.changed_fields_display(),
            changes.should_recalculate,
        );

        let goal_recalculation = self
            .recalculate(previous.as_ref(), &stored, &changes, force_goal_recalculation)
            .await;

        ProfileUpdateResult::Success {
            updated_profile: stored,
            goal_recalculation,
            changes,
        }
    }

    async fn recalculate(
        &self,
        previous: Option<&UserProfile>,
        stored: &UserProfile,
        changes: &ChangesSummary,
        forced: bool,
    ) -> Option<GoalCalculationResult> {
        let owner_id = stored.owner_id;
        let debounced = match (&self.trigger, self.strategy) {
            (Some(trigger), RecalculationStrategy::Debounced) => Some(trigger),
            (None, RecalculationStrategy::Debounced) => {
                warn!(
                    user.id = %owner_id,
                    "Debounced strategy without a trigger service, recalculating inline"
                );
                None
            }
            (_, RecalculationStrategy::Immediate) => None,
        };

        if forced {
            if let Some(trigger) = &self.trigger {
                trigger.cancel_pending(owner_id);
            }
        } else if let Some(trigger) = debounced {
            trigger.on_profile_updated(previous, stored);
            return None;
        }

        if !changes.should_recalculate {
            debug!(user.id = %owner_id, reason = %changes.reason, "Skipping goal recalculation");
            return None;
        }

        let result = self
            .goal_calculation
            .recalculate_goals_for_profile_update(owner_id, Some(stored.clone()))
            .await;
        if let GoalCalculationResult::Error { kind, message } = &result {
            warn!(
                user.id = %owner_id,
                error.kind = %kind,
                error.message = %message,
                "Profile stored but goal recalculation failed"
            );
        }
        Some(result)
    }

    /// Merge sparse field changes onto the stored profile and store it
    ///
    /// Recognized keys: `name`, `email`, `birth_date`, `gender`, `height_cm`,
    /// `weight_kg`, `activity_level`, `unit_system`, `onboarding_completed`.
    /// Unknown keys are ignored.
    pub async fn update_profile_partially(
        &self,
        owner_id: Uuid,
        fields: &Map<String, Value>,
    ) -> ProfileUpdateResult {
        let mut profile = match self.profiles.get_profile(owner_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                return ProfileUpdateResult::error(
                    owner_id,
                    GoalErrorKind::ProfileNotFound,
                    format!("no profile stored for {owner_id}"),
                );
            }
            Err(e) => {
                return ProfileUpdateResult::error(
                    owner_id,
                    GoalErrorKind::StorageFailed,
                    format!("failed to load profile: {e}"),
                );
            }
        };

        for (key, value) in fields {
            if let Err(message) = apply_field(&mut profile, key, value) {
                return ProfileUpdateResult::error(owner_id, GoalErrorKind::ValidationFailed, message);
            }
        }

        self.update_profile_with_goal_recalculation(profile, false)
            .await
    }
}

fn apply_field(profile: &mut UserProfile, key: &str, value: &Value) -> Result<(), String> {
    match key {
        "name" => profile.name = string_field(key, value)?,
        "email" => profile.email = string_field(key, value)?,
        "birth_date" => {
            profile.birth_date = nullable(value, |v| {
                let raw = v.as_str()?;
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
            })
            .ok_or_else(|| type_error(key, "an ISO date (YYYY-MM-DD) or null"))?;
        }
        "gender" => {
            profile.gender = nullable(value, |v| serde_json::from_value::<Gender>(v.clone()).ok())
                .ok_or_else(|| type_error(key, "a gender or null"))?;
        }
        "height_cm" => {
            profile.height_cm = nullable(value, |v| v.as_u64().and_then(|h| u32::try_from(h).ok()))
                .ok_or_else(|| type_error(key, "a whole number of centimeters or null"))?;
        }
        "weight_kg" => {
            profile.weight_kg = nullable(value, Value::as_f64)
                .ok_or_else(|| type_error(key, "a number of kilograms or null"))?;
        }
        "activity_level" => {
            profile.activity_level = serde_json::from_value::<ActivityLevel>(value.clone())
                .map_err(|_| type_error(key, "an activity level"))?;
        }
        "unit_system" => {
            profile.unit_system = serde_json::from_value::<UnitSystem>(value.clone())
                .map_err(|_| type_error(key, "a unit system"))?;
        }
        "onboarding_completed" => {
            profile.onboarding_completed = value
                .as_bool()
                .ok_or_else(|| type_error(key, "a boolean"))?;
        }
        _ => debug!(field = %key, "Ignoring unknown profile field"),
    }
    Ok(())
}

// `Some(None)` for JSON null, `Some(Some(v))` for a parseable value, `None` for a type mismatch
fn nullable<T>(value: &Value, parse: impl FnOnce(&Value) -> Option<T>) -> Option<Option<T>> {
    if value.is_null() {
        Some(None)
    } else {
        parse(value).map(Some)
    }
}

fn string_field(key: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| type_error(key, "a string"))
}

fn type_error(key: &str, expected: &str) -> String {
    format!("field `{key}` must be {expected}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(Uuid::new_v4(), "Casey", "casey@example.com")
    }

    #[test]
    fn test_apply_recognized_fields() {
        let mut profile = profile();

        apply_field(&mut profile, "birth_date", &json!("1988-02-29")).unwrap();
        apply_field(&mut profile, "gender", &json!("female")).unwrap();
        apply_field(&mut profile, "height_cm", &json!(172)).unwrap();
        apply_field(&mut profile, "weight_kg", &json!(64.5)).unwrap();
        apply_field(&mut profile, "activity_level", &json!("very_active")).unwrap();
        apply_field(&mut profile, "unit_system", &json!("imperial")).unwrap();
        apply_field(&mut profile, "onboarding_completed", &json!(true)).unwrap();

        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1988, 2, 29));
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.height_cm, Some(172));
        assert_eq!(profile.weight_kg, Some(64.5));
        assert_eq!(profile.activity_level, ActivityLevel::VeryActive);
        assert_eq!(profile.unit_system, UnitSystem::Imperial);
        assert!(profile.onboarding_completed);
    }

    #[test]
    fn test_null_clears_optional_fields() {
        let mut profile = profile();
        profile.height_cm = Some(180);

        apply_field(&mut profile, "height_cm", &Value::Null).unwrap();

        assert_eq!(profile.height_cm, None);
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let mut profile = profile();

        assert!(apply_field(&mut profile, "height_cm", &json!("tall")).is_err());
        assert!(apply_field(&mut profile, "birth_date", &json!("15/06/1990")).is_err());
        assert!(apply_field(&mut profile, "name", &json!(42)).is_err());
        assert!(apply_field(&mut profile, "gender", &json!("robot")).is_err());
        assert!(apply_field(&mut profile, "unknown_key", &json!({"x": 1})).is_ok());
    }
}
