// ABOUTME: Smoke test for installing the goal engine's global tracing subscriber
// ABOUTME: Kept in its own test binary because a process has only one global subscriber
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_goal_engine::logging::{
    init_default, init_from_env, GoalEngineLogger, LogFormat, LoggingConfig,
};
use pierre_goal_engine::models::CalculationSource;
use tracing::info;
use uuid::Uuid;

#[test]
fn test_logger_installs_once_and_emits_engine_events() {
    let config = LoggingConfig {
        format: LogFormat::Json,
        include_spans: true,
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    info!("subscriber installed");
    GoalEngineLogger::log_goal_calculation(
        Uuid::new_v4(),
        CalculationSource::StandardFormula,
        true,
        3,
    );

    assert!(init_default().is_err());
    assert!(init_from_env().is_err());
}
