// ABOUTME: In-memory profile and goals repositories backed by tokio RwLock maps
// ABOUTME: Used for embedding without a database and as the default test storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pierre_core::models::{DailyGoals, UserProfile};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{GoalsRepository, ProfileRepository};
use crate::errors::AppResult;

/// Profiles keyed by owner
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with profiles
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|profile| (profile.owner_id, profile))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a profile without touching `updated_at`
    pub async fn insert(&self, profile: UserProfile) {
        self.profiles.write().await.insert(profile.owner_id, profile);
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Whether no profile is stored
    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get_profile(&self, owner_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(&owner_id).cloned())
    }

    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let mut stored = profile.clone();
        stored.updated_at = Utc::now();
        self.profiles
            .write()
            .await
            .insert(stored.owner_id, stored.clone());
        debug!(user.id = %stored.owner_id, "Stored profile");
        Ok(stored)
    }
}

#[derive(Debug, Default)]
struct GoalsStore {
    goals: HashMap<Uuid, DailyGoals>,
    last_calculated: HashMap<Uuid, DateTime<Utc>>,
}

/// Goals and last-calculation timestamps keyed by owner
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalsRepository {
    store: Arc<RwLock<GoalsStore>>,
}

impl InMemoryGoalsRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with goal sets, each stamped with its own `calculated_at`
    #[must_use]
    pub fn with_goals(goals: impl IntoIterator<Item = DailyGoals>) -> Self {
        let mut store = GoalsStore::default();
        for goal_set in goals {
            store
                .last_calculated
                .insert(goal_set.owner_id, goal_set.calculated_at);
            store.goals.insert(goal_set.owner_id, goal_set);
        }
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Override the last-calculation timestamp for an owner
    pub async fn set_last_calculation_time(&self, owner_id: Uuid, at: DateTime<Utc>) {
        self.store.write().await.last_calculated.insert(owner_id, at);
    }

    /// Number of owners with stored goals
    pub async fn len(&self) -> usize {
        self.store.read().await.goals.len()
    }

    /// Whether no goals are stored
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.goals.is_empty()
    }
}

#[async_trait]
impl GoalsRepository for InMemoryGoalsRepository {
    async fn get_current_goals(&self, owner_id: Uuid) -> Option<DailyGoals> {
        self.store.read().await.goals.get(&owner_id).cloned()
    }

    async fn get_last_calculation_time(&self, owner_id: Uuid) -> Option<DateTime<Utc>> {
        self.store.read().await.last_calculated.get(&owner_id).copied()
    }

    async fn save_and_sync_goals(&self, goals: &DailyGoals) -> AppResult<DailyGoals> {
        let mut store = self.store.write().await;
        store
            .last_calculated
            .insert(goals.owner_id, goals.calculated_at);
        store.goals.insert(goals.owner_id, goals.clone());
        debug!(
            user.id = %goals.owner_id,
            goals.source = %goals.calculation_source,
            "Stored daily goals"
        );
        Ok(goals.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pierre_core::models::CalculationSource;

    use super::*;

    #[tokio::test]
    async fn test_save_records_last_calculation_time() {
        let repository = InMemoryGoalsRepository::new();
        let owner = Uuid::new_v4();
        let goals = DailyGoals::new(owner, 10_000, 2_000, 21, CalculationSource::StandardFormula)
            .with_calculated_at(Utc::now() - Duration::hours(3));

        repository.save_and_sync_goals(&goals).await.unwrap();

        assert_eq!(repository.get_current_goals(owner).await, Some(goals.clone()));
        assert_eq!(
            repository.get_last_calculation_time(owner).await,
            Some(goals.calculated_at)
        );
    }

    #[tokio::test]
    async fn test_profile_update_roundtrip() {
        let repository = InMemoryProfileRepository::new();
        let profile = UserProfile::new(Uuid::new_v4(), "Robin", "robin@example.com");

        let stored = repository.update_profile(&profile).await.unwrap();

        assert_eq!(stored.name, "Robin");
        assert_eq!(
            repository.get_profile(profile.owner_id).await.unwrap(),
            Some(stored)
        );
        assert!(repository.get_profile(Uuid::new_v4()).await.unwrap().is_none());
    }
}
