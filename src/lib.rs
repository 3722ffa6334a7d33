//! Flexible working hours engine
//!
//! This crate predicts the expected clock-out time under a flexible arrival
//! policy, tracks the remaining time or overtime for the current day, and
//! works out how much leave must be filed to cover a shortfall. Attendance
//! records fetched elsewhere can be turned into per-day reports, and an axum
//! router exposes the calculations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
