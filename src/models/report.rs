// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Garbage-overflow detection reports.
//!
//! Detections are logged as they arrive; a report summarizes the last
//! 30 seconds of them into an overflow score that can be saved as a
//! [`ModelResult`].

use crate::error::AppError;
use crate::models::ModelResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of logs kept in a [`DetectionHistory`].
pub const MAX_LOGS: usize = 100;
/// Logs older than this are left out of a report.
pub const REPORT_WINDOW_SECS: i64 = 30;
/// Number of individual detections listed in a report.
pub const RECENT_DETECTIONS: usize = 10;

/// Where a detection happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// "GPS" or "IP"
    pub source: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}

/// One batch of detections from a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionLog {
    pub detection_count: u32,
    /// Per-detection confidence, 0.0..=1.0
    pub confidence_scores: Vec<f64>,
    pub location: Location,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverflowStatus {
    HighOverflow,
    MediumOverflow,
    LowOverflow,
}

impl OverflowStatus {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            OverflowStatus::HighOverflow
        } else if score > 30.0 {
            OverflowStatus::MediumOverflow
        } else {
            OverflowStatus::LowOverflow
        }
    }
}

/// Aggregate statistics over the report window.
///
/// Confidence values are percentages rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub total_detections: u64,
    pub average_confidence: f64,
    pub max_confidence: f64,
    pub min_confidence: f64,
    pub overflow_score: f64,
    pub detection_frequency: u32,
    pub status: OverflowStatus,
}

/// A single log as listed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEntry {
    pub timestamp: DateTime<Utc>,
    pub detection_count: u32,
    pub confidence_scores: Vec<f64>,
    pub average_confidence: f64,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub timestamp: DateTime<Utc>,
    pub gps_location: Option<Location>,
    pub detection_summary: DetectionSummary,
    pub recent_detections: Vec<DetectionEntry>,
}

impl DetectionReport {
    /// Convert into a record for [`crate::db::ResultStore::save_model_result`].
    pub fn to_model_result(&self) -> Result<ModelResult, AppError> {
        ModelResult::from_serializable(self)
    }
}

/// Bounded history of detection logs plus the latest GPS fix.
#[derive(Debug, Clone, Default)]
pub struct DetectionHistory {
    logs: VecDeque<DetectionLog>,
    gps_location: Option<Location>,
}

impl DetectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a log, evicting the oldest once [`MAX_LOGS`] is exceeded.
    ///
    /// When a GPS fix has been set, it replaces the log's own location.
    pub fn record(&mut self, mut log: DetectionLog) {
        if let Some(gps) = &self.gps_location {
            log.location = gps.clone();
        }
        self.logs.push_back(log);
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn set_gps_location(&mut self, location: Location) {
        self.gps_location = Some(location);
    }

    pub fn gps_location(&self) -> Option<&Location> {
        self.gps_location.as_ref()
    }

    pub fn logs(&self) -> impl Iterator<Item = &DetectionLog> {
        self.logs.iter()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Summarize logs newer than [`REPORT_WINDOW_SECS`] before `now`.
    pub fn report(&self, now: DateTime<Utc>) -> DetectionReport {
        let cutoff = now - Duration::seconds(REPORT_WINDOW_SECS);
        let recent: Vec<&DetectionLog> = self.logs.iter().filter(|l| l.timestamp > cutoff).collect();

        let total_detections: u64 = recent.iter().map(|l| u64::from(l.detection_count)).sum();
        let confidences: Vec<f64> = recent
            .iter()
            .flat_map(|l| l.confidence_scores.iter().copied())
            .collect();

        let (avg, max, min) = if confidences.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                mean(&confidences),
                confidences.iter().copied().fold(f64::MIN, f64::max),
                confidences.iter().copied().fold(f64::MAX, f64::min),
            )
        };

        let overflow_score = (total_detections as f64 * avg * 10.0).min(100.0);

        let skip = recent.len().saturating_sub(RECENT_DETECTIONS);
        let recent_detections = recent[skip..]
            .iter()
            .map(|l| DetectionEntry {
                timestamp: l.timestamp,
                detection_count: l.detection_count,
                confidence_scores: l.confidence_scores.iter().map(|&s| percent(s)).collect(),
                average_confidence: if l.confidence_scores.is_empty() {
                    0.0
                } else {
                    percent(mean(&l.confidence_scores))
                },
                location: l.location.clone(),
            })
            .collect();

        DetectionReport {
            timestamp: now,
            gps_location: self.gps_location.clone(),
            detection_summary: DetectionSummary {
                total_detections,
                average_confidence: percent(avg),
                max_confidence: percent(max),
                min_confidence: percent(min),
                overflow_score: round2(overflow_score),
                detection_frequency: recent.len() as u32,
                status: OverflowStatus::from_score(overflow_score),
            },
            recent_detections,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn percent(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
