// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Safai Saathi: persist garbage-detection model results to Firestore.
//!
//! The crate exposes an explicitly constructed [`db::ResultStore`] handle
//! whose single write operation appends a result record to the
//! `model_results` collection, stamped with a server-assigned `createdAt`.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

pub use config::FirebaseConfig;
pub use db::ResultStore;
pub use error::AppError;
pub use models::ModelResult;
