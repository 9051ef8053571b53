// ABOUTME: Goal-affecting change detection shared by profile updates and the recalculation trigger
// ABOUTME: Diffs birth date, gender, height and weight and applies validity-transition rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Change detection
//!
//! Only birth date, gender, height and weight feed the goal formulas, so only
//! those fields are diffed. Recalculation is decided in this order:
//!
//! 1. No previous profile: recalculate
//! 2. Forced: recalculate
//! 3. Valid before, invalid after: skip
//! 4. Invalid before, valid after: recalculate
//! 5. Valid and a goal-affecting field changed: recalculate
//! 6. Anything else: skip

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use pierre_core::models::UserProfile;
use serde::{Deserialize, Serialize};

const WEIGHT_EPSILON_KG: f64 = 1e-6;

/// Profile fields that feed the goal formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalAffectingField {
    /// Birth date (drives age)
    BirthDate,
    /// Gender
    Gender,
    /// Height in centimeters
    Height,
    /// Weight in kilograms
    Weight,
}

impl GoalAffectingField {
    /// Every goal-affecting field
    pub const ALL: [Self; 4] = [Self::BirthDate, Self::Gender, Self::Height, Self::Weight];

    /// Stable identifier for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BirthDate => "birth_date",
            Self::Gender => "gender",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }

    fn differs(self, before: &UserProfile, after: &UserProfile) -> bool {
        match self {
            Self::BirthDate => before.birth_date != after.birth_date,
            Self::Gender => before.gender.unwrap_or_default() != after.gender.unwrap_or_default(),
            Self::Height => before.height_cm != after.height_cm,
            Self::Weight => match (before.weight_kg, after.weight_kg) {
                (Some(a), Some(b)) => (a - b).abs() > WEIGHT_EPSILON_KG,
                (None, None) => false,
                _ => true,
            },
        }
    }

    fn is_set(self, profile: &UserProfile) -> bool {
        match self {
            Self::BirthDate => profile.birth_date.is_some(),
            Self::Gender => profile.gender.is_some(),
            Self::Height => profile.height_cm.is_some(),
            Self::Weight => profile.weight_kg.is_some(),
        }
    }
}

impl fmt::Display for GoalAffectingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal-affecting fields that differ between two versions of a profile
#[must_use]
pub fn goal_affecting_changes(before: &UserProfile, after: &UserProfile) -> BTreeSet<GoalAffectingField> {
    GoalAffectingField::ALL
        .into_iter()
        .filter(|field| field.differs(before, after))
        .collect()
}

/// Outcome of comparing a stored profile with its update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangesSummary {
    /// Goal-affecting fields that changed
    pub changed_fields: BTreeSet<GoalAffectingField>,
    /// Whether goals should be recalculated
    pub should_recalculate: bool,
    /// Whether the stored profile could produce a calculation
    pub was_valid_before: bool,
    /// Whether the updated profile can produce a calculation
    pub is_valid_after: bool,
    /// Human-readable explanation of the decision
    pub reason: String,
}

impl ChangesSummary {
    /// Apply the recalculation rules to a before/after pair as of `today`
    #[must_use]
    pub fn detect(
        before: Option<&UserProfile>,
        after: &UserProfile,
        forced: bool,
        today: NaiveDate,
    ) -> Self {
        let is_valid_after = after.is_valid_for_calculation(today);

        let Some(before) = before else {
            return Self {
                changed_fields: GoalAffectingField::ALL
                    .into_iter()
                    .filter(|field| field.is_set(after))
                    .collect(),
                should_recalculate: true,
                was_valid_before: false,
                is_valid_after,
                reason: "new profile".to_owned(),
            };
        };

        let was_valid_before = before.is_valid_for_calculation(today);
        let changed_fields = goal_affecting_changes(before, after);

        let (should_recalculate, reason) = if forced {
            (true, "recalculation forced".to_owned())
        } else if was_valid_before && !is_valid_after {
            (false, "profile is no longer valid for calculation".to_owned())
        } else if !was_valid_before && is_valid_after {
            (true, "profile became valid for calculation".to_owned())
        } else if is_valid_after && !changed_fields.is_empty() {
            (
                true,
                format!("goal-affecting fields changed: {}", join_fields(&changed_fields)),
            )
        } else if !is_valid_after {
            (false, "profile is not valid for calculation".to_owned())
        } else {
            (false, "no goal-affecting changes".to_owned())
        };

        Self {
            changed_fields,
            should_recalculate,
            was_valid_before,
            is_valid_after,
            reason,
        }
    }

    /// Whether any goal-affecting field changed
    #[must_use]
    pub fn has_goal_affecting_changes(&self) -> bool {
        !self.changed_fields.is_empty()
    }

    /// Comma-separated changed field names, for logs
    #[must_use]
    pub fn changed_fields_display(&self) -> String {
        join_fields(&self.changed_fields)
    }
}

fn join_fields(fields: &BTreeSet<GoalAffectingField>) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pierre_core::models::{ActivityLevel, Gender, UnitSystem};
    use uuid::Uuid;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_profile() -> UserProfile {
        let mut profile = UserProfile::new(Uuid::new_v4(), "Jordan", "jordan@example.com");
        profile.birth_date = NaiveDate::from_ymd_opt(1990, 4, 12);
        profile.gender = Some(Gender::Female);
        profile.height_cm = Some(168);
        profile.weight_kg = Some(62.5);
        profile
    }

    #[test]
    fn test_non_affecting_edits_never_recalculate() {
        let before = valid_profile();
        let mut after = before.clone();
        after.name = "Jordan R.".to_owned();
        after.email = "jr@example.com".to_owned();
        after.unit_system = UnitSystem::Imperial;
        after.onboarding_completed = true;
        after.activity_level = ActivityLevel::Active;

        let summary = ChangesSummary::detect(Some(&before), &after, false, today());

        assert!(!summary.should_recalculate);
        assert!(summary.changed_fields.is_empty());
        assert!(summary.was_valid_before && summary.is_valid_after);
    }

    #[test]
    fn test_each_affecting_field_triggers_recalculation() {
        let before = valid_profile();
        let edits: [(GoalAffectingField, fn(&mut UserProfile)); 4] = [
            (GoalAffectingField::Weight, |p| p.weight_kg = Some(64.0)),
            (GoalAffectingField::Height, |p| p.height_cm = Some(170)),
            (GoalAffectingField::Gender, |p| p.gender = Some(Gender::Other)),
            (GoalAffectingField::BirthDate, |p| {
                p.birth_date = NaiveDate::from_ymd_opt(1991, 4, 12);
            }),
        ];

        for (field, edit) in edits {
            let mut after = before.clone();
            edit(&mut after);

            let summary = ChangesSummary::detect(Some(&before), &after, false, today());

            assert!(summary.should_recalculate, "{field} should trigger");
            assert_eq!(summary.changed_fields, BTreeSet::from([field]));
        }
    }

    #[test]
    fn test_valid_to_invalid_is_skipped() {
        let before = valid_profile();
        let mut after = before.clone();
        after.height_cm = None;

        let summary = ChangesSummary::detect(Some(&before), &after, false, today());

        assert!(!summary.should_recalculate);
        assert!(summary.was_valid_before);
        assert!(!summary.is_valid_after);
        assert!(summary.has_goal_affecting_changes());
    }

    #[test]
    fn test_invalid_to_valid_recalculates() {
        let mut before = valid_profile();
        before.birth_date = None;
        let mut after = before.clone();
        after.birth_date = NaiveDate::from_ymd_opt(1990, 4, 12);

        let summary = ChangesSummary::detect(Some(&before), &after, false, today());

        assert!(summary.should_recalculate);
        assert!(!summary.was_valid_before && summary.is_valid_after);
    }

    #[test]
    fn test_invalid_to_invalid_is_skipped() {
        let mut before = valid_profile();
        before.birth_date = None;
        let mut after = before.clone();
        after.weight_kg = Some(70.0);

        let summary = ChangesSummary::detect(Some(&before), &after, false, today());

        assert!(!summary.should_recalculate);
        assert_eq!(summary.changed_fields_display(), "weight");
    }

    #[test]
    fn test_new_profile_and_forced_always_recalculate() {
        let profile = valid_profile();

        let new_profile = ChangesSummary::detect(None, &profile, false, today());
        assert!(new_profile.should_recalculate);
        assert_eq!(new_profile.changed_fields.len(), 4);

        let forced = ChangesSummary::detect(Some(&profile), &profile, true, today());
        assert!(forced.should_recalculate);
        assert!(forced.changed_fields.is_empty());
    }

    #[test]
    fn test_absent_gender_equals_unspecified() {
        let before = valid_profile();
        let mut unset = before.clone();
        unset.gender = None;
        let mut unspecified = before;
        unspecified.gender = Some(Gender::Unspecified);

        assert!(goal_affecting_changes(&unset, &unspecified).is_empty());
    }
}
