// ABOUTME: Debounced goal recalculation triggered by goal-affecting profile changes
// ABOUTME: Last-write-wins coalescing per owner, manual bypass and a bounded diagnostic history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Recalculation Trigger Service
//!
//! Per owner: `Idle -> Debouncing -> Calculating -> Idle`. A new qualifying
//! edit while debouncing aborts the scheduled task and starts a new window
//! with the latest profile. Aborting a superseded debounce is normal control
//! flow and is only logged at debug level.
//!
//! Each scheduled task carries a generation number. A task only runs if its
//! generation still owns the owner's pending slot when the window elapses, so
//! a stale task can never overwrite a newer schedule even if the abort races
//! the wake-up.
//!
//! The pending slot holds the profile snapshot the task will calculate from.
//! Edits that do not affect goals still refresh that snapshot, and an edit
//! that leaves the profile invalid cancels the pending recalculation.

use std::collections::{BTreeSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pierre_core::errors::GoalErrorKind;
use pierre_core::models::{DailyGoals, UserProfile};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::{debug, error};
use uuid::Uuid;

use super::change_detection::{ChangesSummary, GoalAffectingField};
use super::goal_calculation_use_case::{GoalCalculationResult, GoalCalculationUseCase};
use crate::logging::GoalEngineLogger;

/// Recalculation state of one owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    /// Nothing scheduled or running
    Idle,
    /// A recalculation is scheduled and waiting for the window to elapse
    Debouncing,
    /// A recalculation is running
    Calculating,
}

/// What caused a recalculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerKind {
    /// Debounced goal-affecting profile edit
    ProfileChange {
        /// Fields changed by the edits coalesced into this recalculation
        fields: Vec<GoalAffectingField>,
    },
    /// Explicit request bypassing the debounce
    Manual,
}

impl TriggerKind {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileChange { .. } => "profile_change",
            Self::Manual => "manual",
        }
    }
}

/// One diagnostic history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecalculationRecord {
    /// What caused the recalculation
    pub trigger: TriggerKind,
    /// When the recalculation finished
    pub completed_at: DateTime<Utc>,
    /// Whether goals were produced and stored
    pub success: bool,
    /// Stored goals on success
    pub goals: Option<DailyGoals>,
    /// Error kind on failure
    pub error_kind: Option<GoalErrorKind>,
    /// Short description of the outcome
    pub message: String,
}

impl RecalculationRecord {
    fn from_result(trigger: TriggerKind, result: &GoalCalculationResult) -> Self {
        match result {
            GoalCalculationResult::Success { goals, source, .. } => Self {
                trigger,
                completed_at: Utc::now(),
                success: true,
                goals: Some(goals.clone()),
                error_kind: None,
                message: format!("goals recalculated ({source})"),
            },
            GoalCalculationResult::Error { kind, message } => Self {
                trigger,
                completed_at: Utc::now(),
                success: false,
                goals: None,
                error_kind: Some(*kind),
                message: message.clone(),
            },
        }
    }
}

struct PendingRecalculation {
    generation: u64,
    profile: UserProfile,
    fields: BTreeSet<GoalAffectingField>,
    abort_handle: Option<AbortHandle>,
}

impl PendingRecalculation {
    fn abort(&self) {
        if let Some(handle) = &self.abort_handle {
            handle.abort();
        }
    }
}

struct TriggerInner {
    goal_calculation: Arc<GoalCalculationUseCase>,
    debounce_window: Duration,
    history_limit: usize,
    next_generation: AtomicU64,
    pending: DashMap<Uuid, PendingRecalculation>,
    calculating: DashMap<Uuid, usize>,
    history: DashMap<Uuid, VecDeque<RecalculationRecord>>,
}

/// Marks an owner as calculating for as long as it lives
struct CalculatingGuard<'a> {
    calculating: &'a DashMap<Uuid, usize>,
    owner_id: Uuid,
}

impl<'a> CalculatingGuard<'a> {
    fn enter(calculating: &'a DashMap<Uuid, usize>, owner_id: Uuid) -> Self {
        *calculating.entry(owner_id).or_insert(0) += 1;
        Self {
            calculating,
            owner_id,
        }
    }
}

impl Drop for CalculatingGuard<'_> {
    fn drop(&mut self) {
        self.calculating
            .remove_if_mut(&self.owner_id, |_, running| {
                *running = running.saturating_sub(1);
                *running == 0
            });
    }
}

impl TriggerInner {
    async fn run_debounced(&self, owner_id: Uuid, generation: u64) {
        let Some((_, pending)) = self
            .pending
            .remove_if(&owner_id, |_, pending| pending.generation == generation)
        else {
            debug!(user.id = %owner_id, generation, "Debounced recalculation superseded");
            return;
        };
        let PendingRecalculation { profile, fields, .. } = pending;
        let fields: Vec<GoalAffectingField> = fields.into_iter().collect();

        let result = {
            let _calculating = CalculatingGuard::enter(&self.calculating, owner_id);
            self.goal_calculation
                .recalculate_goals_for_profile_update(owner_id, Some(profile))
                .await
        };
        self.record(owner_id, TriggerKind::ProfileChange { fields }, &result);
    }

    fn record(&self, owner_id: Uuid, trigger: TriggerKind, result: &GoalCalculationResult) {
        let record = RecalculationRecord::from_result(trigger, result);
        GoalEngineLogger::log_recalculation_trigger(
            owner_id,
            record.trigger.as_str(),
            if record.success { "success" } else { "failure" },
        );

        let mut history = self.history.entry(owner_id).or_default();
        history.push_back(record);
        while history.len() > self.history_limit {
            history.pop_front();
        }
    }
}

/// Schedules debounced goal recalculation after profile edits
#[derive(Clone)]
pub struct GoalRecalculationTriggerService {
    inner: Arc<TriggerInner>,
}

impl GoalRecalculationTriggerService {
    /// Create the service using the engine configuration of the use case
    #[must_use]
    pub fn new(goal_calculation: Arc<GoalCalculationUseCase>) -> Self {
        let config = goal_calculation.config();
        let debounce_window = config.debounce_window();
        let history_limit = config.history_limit.max(1);
        Self {
            inner: Arc::new(TriggerInner {
                goal_calculation,
                debounce_window,
                history_limit,
                next_generation: AtomicU64::new(0),
                pending: DashMap::new(),
                calculating: DashMap::new(),
                history: DashMap::new(),
            }),
        }
    }

    /// Inspect a profile edit and schedule a debounced recalculation if it affects goals
    ///
    /// Returns whether a recalculation was scheduled. Must be called from within
    /// a tokio runtime; outside one nothing is scheduled.
    pub fn on_profile_updated(&self, previous: Option<&UserProfile>, updated: &UserProfile) -> bool {
        let today = Utc::now().date_naive();
        let changes = ChangesSummary::detect(previous, updated, false, today);
        if !changes.should_recalculate {
            debug!(
                user.id = %updated.owner_id,
                reason = %changes.reason,
                "Profile edit does not require recalculation"
            );
            self.refresh_pending(updated, today);
            return false;
        }

        self.schedule(updated.clone(), changes.changed_fields)
    }

    // A pending recalculation must never run against a snapshot older than the stored profile
    fn refresh_pending(&self, updated: &UserProfile, today: NaiveDate) {
        let owner_id = updated.owner_id;
        if !updated.is_valid_for_calculation(today) {
            if self.cancel_pending(owner_id) {
                debug!(
                    user.id = %owner_id,
                    "Profile no longer valid for calculation, pending recalculation dropped"
                );
            }
            return;
        }
        if let Some(mut pending) = self.inner.pending.get_mut(&owner_id) {
            pending.profile = updated.clone();
        }
    }

    fn schedule(&self, profile: UserProfile, mut fields: BTreeSet<GoalAffectingField>) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            error!(
                user.id = %profile.owner_id,
                "No async runtime available, recalculation not scheduled"
            );
            return false;
        };

        let owner_id = profile.owner_id;
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed) + 1;

        // Claim the slot before spawning so the task can always find its generation
        let mut slot = self.inner.pending.entry(owner_id);
        let superseded = match &mut slot {
            Entry::Occupied(occupied) => {
                let previous = occupied.get();
                previous.abort();
                fields.extend(previous.fields.iter().copied());
                Some(previous.generation)
            }
            Entry::Vacant(_) => None,
        };
        slot.insert(PendingRecalculation {
            generation,
            profile,
            fields,
            abort_handle: None,
        });
        if let Some(previous) = superseded {
            debug!(
                user.id = %owner_id,
                generation = previous,
                "Cancelled superseded debounced recalculation"
            );
        }

        let inner = Arc::clone(&self.inner);
        let window = self.inner.debounce_window;
        let task = runtime.spawn(async move {
            sleep(window).await;
            inner.run_debounced(owner_id, generation).await;
        });

        if let Some(mut pending) = self.inner.pending.get_mut(&owner_id) {
            if pending.generation == generation {
                pending.abort_handle = Some(task.abort_handle());
            }
        }

        debug!(
            user.id = %owner_id,
            generation,
            window_ms = window.as_millis(),
            "Scheduled debounced recalculation"
        );
        true
    }

    /// Recalculate immediately, cancelling any pending debounce for the owner
    pub async fn trigger_manual_recalculation(&self, owner_id: Uuid) -> GoalCalculationResult {
        self.cancel_pending(owner_id);

        let result = {
            let _calculating = CalculatingGuard::enter(&self.inner.calculating, owner_id);
            self.inner
                .goal_calculation
                .calculate_and_store_goals(owner_id, true)
                .await
        };
        self.inner.record(owner_id, TriggerKind::Manual, &result);
        result
    }

    /// Cancel a pending debounced recalculation; returns whether one was pending
    pub fn cancel_pending(&self, owner_id: Uuid) -> bool {
        match self.inner.pending.remove(&owner_id) {
            Some((_, pending)) => {
                pending.abort();
                debug!(user.id = %owner_id, "Cancelled pending recalculation");
                true
            }
            None => false,
        }
    }

    /// Abort every pending debounced recalculation
    pub fn shutdown(&self) {
        self.inner.pending.retain(|_, pending| {
            pending.abort();
            false
        });
    }

    /// Current recalculation state of an owner
    #[must_use]
    pub fn state(&self, owner_id: Uuid) -> TriggerState {
        if self.inner.calculating.contains_key(&owner_id) {
            TriggerState::Calculating
        } else if self.inner.pending.contains_key(&owner_id) {
            TriggerState::Debouncing
        } else {
            TriggerState::Idle
        }
    }

    /// Number of owners with a scheduled recalculation
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.pending.len()
    }

    /// Recent recalculations for an owner, oldest first
    #[must_use]
    pub fn get_calculation_history(&self, owner_id: Uuid) -> Vec<RecalculationRecord> {
        self.inner
            .history
            .get(&owner_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }
}
