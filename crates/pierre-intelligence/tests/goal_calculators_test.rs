// ABOUTME: Integration tests for the steps, calories and heart points calculators
// ABOUTME: Covers reference scenarios, breakdown auditing, domain bounds and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_core::constants::goal_bounds::{
    CALORIES_MAX, CALORIES_MIN, HEART_POINTS_MAX, HEART_POINTS_MIN, STEPS_MAX, STEPS_MIN,
};
use pierre_core::models::{ActivityLevel, Gender, GoalCalculationInput};
use pierre_intelligence::calculators::BmrFormula;
use pierre_intelligence::config::{ActivityFactorsConfig, GoalFormulaConfig};
use pierre_intelligence::{
    CaloriesGoalCalculator, GoalCalculator, GoalDimension, HeartPointsGoalCalculator,
    StepsGoalCalculator,
};

const GENDERS: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::Unspecified];

fn input(
    age: u32,
    gender: Gender,
    height_cm: u32,
    weight_kg: f64,
    activity_level: ActivityLevel,
) -> GoalCalculationInput {
    GoalCalculationInput::new(age, gender, height_cm, weight_kg, activity_level).unwrap()
}

#[test]
fn test_adult_male_moderate_heart_points() {
    let adult = input(30, Gender::Male, 175, 70.0, ActivityLevel::ModeratelyActive);

    let breakdown = HeartPointsGoalCalculator::new().breakdown(&adult).unwrap();

    // floor(150 / 7 x 1.0 x 1.0)
    assert_eq!(breakdown.heart_points_goal, 21);
    assert!((breakdown.age_multiplier - 1.0).abs() < f64::EPSILON);
    assert!((breakdown.activity_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(!breakdown.was_clamped);
}

#[test]
fn test_youth_unspecified_steps() {
    let youth = input(16, Gender::Unspecified, 170, 60.0, ActivityLevel::ModeratelyActive);

    let breakdown = StepsGoalCalculator::new().breakdown(&youth).unwrap();

    // floor(10000 x 1.2 x 1.0)
    assert_eq!(breakdown.steps_goal, 12_000);
    assert!((breakdown.age_multiplier - 1.2).abs() < f64::EPSILON);
    assert!((breakdown.gender_multiplier - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_steps_gender_and_age_directions() {
    let calculator = StepsGoalCalculator::new();
    let steps = |age, gender| {
        calculator
            .calculate(&input(age, gender, 170, 70.0, ActivityLevel::LightlyActive))
            .unwrap()
    };

    assert_eq!(steps(30, Gender::Male), 10_500);
    assert_eq!(steps(30, Gender::Female), 9_500);
    assert_eq!(steps(30, Gender::Other), 10_000);
    assert_eq!(steps(70, Gender::Female), 7_600);
    assert_eq!(steps(17, Gender::Male), 12_600);
}

#[test]
fn test_calories_breakdown_reports_formula_and_factor() {
    let adult = input(30, Gender::Male, 175, 70.0, ActivityLevel::ModeratelyActive);

    let breakdown = CaloriesGoalCalculator::new().breakdown(&adult).unwrap();

    assert_eq!(breakdown.formula, BmrFormula::MifflinStJeorMale);
    assert!((breakdown.bmr - 1648.75).abs() < 1e-9);
    assert!((breakdown.activity_factor - 1.55).abs() < f64::EPSILON);
    // 1648.75 x 1.55 = 2555.5625
    assert_eq!(breakdown.calories_goal, 2_555);
    assert!(!breakdown.was_clamped);
}

#[test]
fn test_calories_clamped_for_extreme_inputs() {
    let calculator = CaloriesGoalCalculator::new();

    let large = calculator
        .breakdown(&input(20, Gender::Male, 250, 300.0, ActivityLevel::VeryActive))
        .unwrap();
    assert_eq!(large.calories_goal, CALORIES_MAX);
    assert!(large.was_clamped);

    let small = calculator
        .breakdown(&input(110, Gender::Female, 100, 30.0, ActivityLevel::Sedentary))
        .unwrap();
    assert_eq!(small.calories_goal, CALORIES_MIN);
    assert!(small.was_clamped);
    assert_eq!(small.formula, BmrFormula::MifflinStJeorFemale);
}

#[test]
fn test_calories_uses_injected_activity_factors() {
    let config = GoalFormulaConfig {
        activity_factors: ActivityFactorsConfig {
            sedentary: 1.0,
            ..ActivityFactorsConfig::default()
        },
        ..GoalFormulaConfig::default()
    };
    let calculator = CaloriesGoalCalculator::with_config(config);

    let breakdown = calculator
        .breakdown(&input(30, Gender::Male, 175, 70.0, ActivityLevel::Sedentary))
        .unwrap();

    assert_eq!(breakdown.calories_goal, 1_648);
}

#[test]
fn test_heart_points_older_sedentary_stays_above_floor() {
    let older = input(80, Gender::Female, 160, 55.0, ActivityLevel::Sedentary);

    let breakdown = HeartPointsGoalCalculator::new().breakdown(&older).unwrap();

    // 21.43 x 0.8 x 0.9 = 15.43
    assert_eq!(breakdown.heart_points_goal, 15);
    assert!(!breakdown.was_clamped);
}

#[test]
fn test_every_valid_input_lands_inside_bounds() {
    let steps = StepsGoalCalculator::new();
    let calories = CaloriesGoalCalculator::new();
    let heart_points = HeartPointsGoalCalculator::new();

    for age in [13, 17, 18, 40, 64, 65, 90, 120] {
        for gender in GENDERS {
            for height_cm in [100, 160, 250] {
                for weight_kg in [30.0, 72.5, 300.0] {
                    for level in ActivityLevel::ALL {
                        let input = input(age, gender, height_cm, weight_kg, level);

                        let s = steps.calculate(&input).unwrap();
                        let c = calories.calculate(&input).unwrap();
                        let h = heart_points.calculate(&input).unwrap();

                        assert!((STEPS_MIN..=STEPS_MAX).contains(&s), "steps {s} for {input:?}");
                        assert!(
                            (CALORIES_MIN..=CALORIES_MAX).contains(&c),
                            "calories {c} for {input:?}"
                        );
                        assert!(
                            (HEART_POINTS_MIN..=HEART_POINTS_MAX).contains(&h),
                            "heart points {h} for {input:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_calculators_are_deterministic() {
    let calculators: Vec<Box<dyn GoalCalculator>> = vec![
        Box::new(StepsGoalCalculator::new()),
        Box::new(CaloriesGoalCalculator::new()),
        Box::new(HeartPointsGoalCalculator::new()),
    ];
    let input = input(47, Gender::Other, 181, 88.3, ActivityLevel::Active);

    for calculator in &calculators {
        let first = calculator.calculate(&input).unwrap();
        let second = calculator.calculate(&input).unwrap();
        assert_eq!(first, second, "{} is not deterministic", calculator.name());
    }
}

#[test]
fn test_calculator_dimensions() {
    assert_eq!(StepsGoalCalculator::new().dimension(), GoalDimension::Steps);
    assert_eq!(CaloriesGoalCalculator::new().dimension(), GoalDimension::Calories);
    assert_eq!(
        HeartPointsGoalCalculator::new().dimension(),
        GoalDimension::HeartPoints
    );
}
