// ABOUTME: Shared test utilities and repository doubles for goal engine integration tests
// ABOUTME: Provides logging setup, profile builders, and failing or gated repositories and engines
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `pierre_goal_engine`
//!
//! Each integration test binary pulls this in with `mod common;` and uses
//! whichever doubles it needs.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use pierre_goal_engine::config::GoalEngineConfig;
use pierre_goal_engine::errors::{AppError, AppResult, CalculationError};
use pierre_goal_engine::models::{
    ActivityLevel, CalculationSource, DailyGoals, Gender, GoalCalculationInput, UserProfile,
};
use pierre_goal_engine::repositories::{
    GoalsRepository, InMemoryGoalsRepository, InMemoryProfileRepository, ProfileRepository,
};
use pierre_goal_engine::services::{
    GoalCalculationEngine, GoalCalculationService, GoalCalculationUseCase,
};
use tokio::sync::Semaphore;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Engine config with short retry delays so retry tests stay fast
pub fn test_config() -> GoalEngineConfig {
    GoalEngineConfig {
        retry_base_delay_ms: 1,
        ..GoalEngineConfig::default()
    }
}

/// A 32 year old moderately active male, 175 cm and 70 kg
pub fn complete_profile(owner_id: Uuid) -> UserProfile {
    let mut profile = UserProfile::new(owner_id, "Jordan", "jordan@example.com");
    profile.birth_date = Some(birth_date_for_age(32));
    profile.gender = Some(Gender::Male);
    profile.height_cm = Some(175);
    profile.weight_kg = Some(70.0);
    profile.activity_level = ActivityLevel::ModeratelyActive;
    profile.onboarding_completed = true;
    profile
}

/// Same as [`complete_profile`] without a weight
pub fn incomplete_profile(owner_id: Uuid) -> UserProfile {
    let mut profile = complete_profile(owner_id);
    profile.weight_kg = None;
    profile
}

/// A December 31 birth date that makes the owner `age` years old today
pub fn birth_date_for_age(age: i32) -> NaiveDate {
    let today = Utc::now().date_naive();
    NaiveDate::from_ymd_opt(today.year() - age - 1, 12, 31).unwrap()
}

/// Goals with the given source, calculated `age` ago
pub fn goals_calculated(owner_id: Uuid, age: Duration, source: CalculationSource) -> DailyGoals {
    DailyGoals::new(owner_id, 9_000, 2_100, 22, source).with_calculated_at(Utc::now() - age)
}

/// Use case over the given repositories with the standard engine
pub fn use_case_with(
    profiles: Arc<dyn ProfileRepository>,
    goals: Arc<dyn GoalsRepository>,
) -> GoalCalculationUseCase {
    GoalCalculationUseCase::new(
        profiles,
        goals,
        Arc::new(GoalCalculationService::new()),
        test_config(),
    )
}

/// Profile repository whose reads and writes can be made to fail
#[derive(Default)]
pub struct FlakyProfileRepository {
    inner: InMemoryProfileRepository,
    read_failures_remaining: AtomicU32,
    fail_writes: AtomicBool,
    pub get_calls: AtomicU32,
    pub update_calls: AtomicU32,
}

impl FlakyProfileRepository {
    pub fn new(inner: InMemoryProfileRepository) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Fail the next `count` reads
    pub fn fail_next_reads(&self, count: u32) {
        self.read_failures_remaining.store(count, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get_count(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for FlakyProfileRepository {
    async fn get_profile(&self, owner_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let should_fail = self
            .read_failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(AppError::database("profile store unavailable"));
        }
        self.inner.get_profile(owner_id).await
    }

    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("profile store rejected write"));
        }
        self.inner.update_profile(profile).await
    }
}

/// Profile repository whose reads wait for a permit
pub struct GatedProfileRepository {
    inner: InMemoryProfileRepository,
    gate: Semaphore,
    pub update_calls: AtomicU32,
}

impl GatedProfileRepository {
    pub fn new(inner: InMemoryProfileRepository) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            update_calls: AtomicU32::new(0),
        }
    }

    /// Let `count` blocked reads proceed
    pub fn open(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn update_count(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for GatedProfileRepository {
    async fn get_profile(&self, owner_id: Uuid) -> AppResult<Option<UserProfile>> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| AppError::internal(e.to_string()))?;
        permit.forget();
        self.inner.get_profile(owner_id).await
    }

    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_profile(profile).await
    }
}

/// Goals repository whose saves can fail or be attributed to another owner
#[derive(Default)]
pub struct FaultyGoalsRepository {
    pub inner: InMemoryGoalsRepository,
    fail_saves: AtomicBool,
    misattribute_saves: AtomicBool,
    pub save_calls: AtomicU32,
}

impl FaultyGoalsRepository {
    pub fn new(inner: InMemoryGoalsRepository) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Return goals for a different owner from every save
    pub fn misattribute_saves(&self, misattribute: bool) {
        self.misattribute_saves.store(misattribute, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> u32 {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoalsRepository for FaultyGoalsRepository {
    async fn get_current_goals(&self, owner_id: Uuid) -> Option<DailyGoals> {
        self.inner.get_current_goals(owner_id).await
    }

    async fn get_last_calculation_time(&self, owner_id: Uuid) -> Option<DateTime<Utc>> {
        self.inner.get_last_calculation_time(owner_id).await
    }

    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> AppResult<DailyGoals> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::storage("sync target unreachable"));
        }
        let saved = self.inner.save_and_sync_goals(goals).await?;
        if self.misattribute_saves.load(Ordering::SeqCst) {
            return Ok(DailyGoals {
                owner_id: Uuid::new_v4(),
                ..saved
            });
        }
        Ok(saved)
    }
}

/// What a [`ScriptedEngine`] does once its failures are used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineBehavior {
    /// Delegate to the standard calculation service
    Standard,
    /// Return goals far outside the personalized bounds
    OutOfBounds,
    /// Panic on every call
    Panic,
}

/// Engine double counting invocations and failing a configurable number of times
pub struct ScriptedEngine {
    delegate: GoalCalculationService,
    behavior: EngineBehavior,
    failures_remaining: AtomicU32,
    calls: AtomicU32,
}

impl ScriptedEngine {
    pub fn new(behavior: EngineBehavior) -> Self {
        Self {
            delegate: GoalCalculationService::new(),
            behavior,
            failures_remaining: AtomicU32::new(0),
            calls: AtomicU32::new(0),
        }
    }

    pub fn standard() -> Self {
        Self::new(EngineBehavior::Standard)
    }

    /// Fail the next `count` calls before behaving normally
    #[must_use]
    pub fn failing_first(self, count: u32) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GoalCalculationEngine for ScriptedEngine {
    fn calculate_goals(
        &self,
        owner_id: Uuid,
        input: &GoalCalculationInput,
    ) -> Result<DailyGoals, CalculationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(CalculationError::failed("scripted_engine", "injected failure"));
        }

        match self.behavior {
            EngineBehavior::Standard => self.delegate.calculate_goals(owner_id, input),
            EngineBehavior::OutOfBounds => Ok(DailyGoals::new(
                owner_id,
                99_999,
                2_000,
                20,
                CalculationSource::StandardFormula,
            )),
            EngineBehavior::Panic => panic!("scripted engine panic"),
        }
    }
}
