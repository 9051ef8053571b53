// ABOUTME: Logging configuration and structured logging setup for the goal engine
// ABOUTME: Configures log level, output format and canned goal engine events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! The engine is a library; embedding applications that already install a
//! subscriber should skip [`LoggingConfig::init`] and just consume the events.

use std::env;
use std::io;

use anyhow::Result;
use pierre_core::constants::service_names;
use pierre_core::errors::GoalErrorKind;
use pierre_core::models::CalculationSource;
use tracing::{info, warn, Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use uuid::Uuid;

/// Crates whose events follow the configured level regardless of `RUST_LOG`
const ENGINE_TARGETS: [&str; 3] = ["pierre_goal_engine", "pierre_intelligence", "pierre_core"];

/// Logging configuration
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)] // Configuration struct needs multiple boolean flags
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse `json` or `compact`; anything else is pretty
    #[must_use]
    pub fn from_str_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::PIERRE_GOAL_ENGINE.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `ENVIRONMENT`, `LOG_INCLUDE_*` and `SERVICE_*`
    ///
    /// Production enables location, thread and span details regardless of the flags.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let production = environment == "production";
        let detail = |flag: &str| production || env::var(flag).is_ok();

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map(|raw| LogFormat::from_str_or_default(&raw))
                .unwrap_or(defaults.format),
            include_location: detail("LOG_INCLUDE_LOCATION"),
            include_thread: detail("LOG_INCLUDE_THREAD"),
            include_spans: detail("LOG_INCLUDE_SPANS"),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            environment,
        }
    }

    /// Filter from `RUST_LOG`, with the engine crates pinned to the configured level
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |directives| EnvFilter::new(&directives),
        );

        ENGINE_TARGETS.into_iter().fold(base, |filter, target| {
            let directive = format!("{target}={}", self.level)
                .parse()
                .unwrap_or_else(|_| Level::INFO.into());
            filter.add_directive(directive)
        })
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_span_events(span_events)
            .with_writer(io::stdout);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Install this configuration as the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(self.fmt_layer())
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Goal engine logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Canned structured events emitted by the goal engine
pub struct GoalEngineLogger;

impl GoalEngineLogger {
    /// Log a completed goal calculation or freshness reuse
    pub fn log_goal_calculation(
        user_id: Uuid,
        source: CalculationSource,
        was_recalculated: bool,
        duration_ms: u64,
    ) {
        info!(
            user.id = %user_id,
            goals.source = %source,
            goals.recalculated = was_recalculated,
            goals.duration_ms = duration_ms,
            "Goal calculation completed"
        );
    }

    /// Log a goal use case failure
    pub fn log_goal_error(user_id: Uuid, kind: GoalErrorKind, message: &str) {
        warn!(
            user.id = %user_id,
            error.kind = %kind,
            error.message = %message,
            "Goal operation failed"
        );
    }

    /// Log a completed profile update
    pub fn log_profile_update(user_id: Uuid, changed_fields: &str, recalculation_requested: bool) {
        info!(
            user.id = %user_id,
            profile.changed_fields = %changed_fields,
            profile.recalculation_requested = recalculation_requested,
            "Profile updated"
        );
    }

    /// Log a recalculation trigger outcome
    pub fn log_recalculation_trigger(user_id: Uuid, trigger: &str, outcome: &str) {
        info!(
            user.id = %user_id,
            trigger.kind = %trigger,
            trigger.outcome = %outcome,
            "Goal recalculation trigger"
        );
    }
}
