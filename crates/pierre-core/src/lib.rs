// ABOUTME: Core types and constants for the Pierre daily goal engine
// ABOUTME: Foundation crate with error handling, domain models and goal bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre goal
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the goal error taxonomy
//! - **constants**: Goal bounds, fallback safety band, input ranges, freshness window
//! - **models**: Profile, calculation input and daily goal models

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, calculation input, daily goals)
pub mod models;
