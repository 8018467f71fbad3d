// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod report;
pub mod result;

pub use report::{DetectionHistory, DetectionLog, DetectionReport, Location, OverflowStatus};
pub use result::ModelResult;
