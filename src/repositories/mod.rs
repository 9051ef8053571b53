// ABOUTME: Repository abstractions consumed by the goal engine
// ABOUTME: Profile and goals storage traits plus in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! The engine never talks to storage directly. Everything goes through these
//! two traits, so an embedding application can back them with a database, a
//! remote sync service or the in-memory adapters in [`memory`].
//!
//! Calls into a repository are the only suspension points of the pipeline.

/// In-memory repository implementations
pub mod memory;

pub use memory::{InMemoryGoalsRepository, InMemoryProfileRepository};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pierre_core::models::{DailyGoals, UserProfile};
use uuid::Uuid;

use crate::errors::AppResult;

/// Profile storage
///
/// All implementations must be `Send + Sync` for concurrent access across async tasks.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the stored profile for an owner, `None` if the owner has none
    async fn get_profile(&self, owner_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Persist a profile, returning the stored version
    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile>;
}

/// Daily goals storage and remote sync
#[async_trait]
pub trait GoalsRepository: Send + Sync {
    /// Currently stored goals for an owner
    async fn get_current_goals(&self, owner_id: Uuid) -> Option<DailyGoals>;

    /// When goals were last calculated for an owner
    async fn get_last_calculation_time(&self, owner_id: Uuid) -> Option<DateTime<Utc>>;

    /// Persist goals and push them to any remote sync target
    ///
    /// Not assumed idempotent; callers do not retry it.
    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> AppResult<DailyGoals>;
}
