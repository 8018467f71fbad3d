// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed store for detection model results.
//!
//! [`ResultStore`] is an explicitly constructed handle: build it once at
//! startup and share it (it is cheap to clone) with whatever needs to save
//! results. Besides the real Firestore connection it can run against an
//! in-memory map or in offline mode, where every write fails.

use crate::config::FirebaseConfig;
use crate::db::{auto_id, collections, CREATED_AT_FIELD};
use crate::error::AppError;
use crate::models::ModelResult;
use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use ring::rand::SystemRandom;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A result as held by the in-memory backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResult {
    /// Caller-supplied fields, without `createdAt`
    pub fields: Map<String, Value>,
    /// Timestamp assigned by the store at write time
    pub created_at: DateTime<Utc>,
}

impl StoredResult {
    /// The full document: caller fields plus `createdAt` as RFC3339.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = self.fields.clone();
        doc.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        doc
    }
}

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<DashMap<String, StoredResult>>),
    Offline,
}

/// Handle for saving model results.
#[derive(Clone)]
pub struct ResultStore {
    config: Arc<FirebaseConfig>,
    backend: Backend,
    rng: SystemRandom,
}

impl ResultStore {
    /// Connect to the Firestore project named in `config`.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(config: FirebaseConfig) -> Result<Self, AppError> {
        config.validate()?;

        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(config).await;
        }

        let client = firestore::FirestoreDb::new(&config.project_id).await?;

        tracing::info!(
            project = %config.project_id,
            app_id = %config.app_id,
            "Connected to Firestore"
        );

        Ok(Self::with_backend(config, Backend::Firestore(client)))
    }

    /// Connect to the Firestore emulator, which accepts any bearer token.
    async fn connect_emulator(config: FirebaseConfig) -> Result<Self, AppError> {
        let options = firestore::FirestoreDbOptions::new(config.project_id.clone());
        let token_source =
            gcloud_sdk::ExternalJwtFunctionSource::new(|| async { Ok(emulator_token()) });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await?;

        tracing::info!(
            project = %config.project_id,
            emulator = true,
            "Connected to Firestore"
        );

        Ok(Self::with_backend(config, Backend::Firestore(client)))
    }

    /// Create a store that keeps documents in process memory.
    ///
    /// `createdAt` comes from the store's clock at write time.
    pub fn new_in_memory(config: FirebaseConfig) -> Self {
        Self::with_backend(config, Backend::Memory(Arc::new(DashMap::new())))
    }

    /// Create an offline store for testing.
    ///
    /// All writes fail with [`AppError::Offline`].
    pub fn new_offline(config: FirebaseConfig) -> Self {
        Self::with_backend(config, Backend::Offline)
    }

    fn with_backend(config: FirebaseConfig, backend: Backend) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            rng: SystemRandom::new(),
        }
    }

    /// Configuration this handle was built from.
    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    // ─── Model Results ───────────────────────────────────────────

    /// Append a model result to `model_results` and return its document ID.
    ///
    /// The stored document holds every field of `result` plus `createdAt`,
    /// set by the server at write time. On failure the error is logged once
    /// and returned unchanged; there is no retry.
    pub async fn save_model_result(&self, result: &ModelResult) -> Result<String, AppError> {
        match self.write_model_result(result).await {
            Ok(doc_id) => {
                tracing::debug!(
                    doc_id = %doc_id,
                    fields = result.len(),
                    "Model result saved"
                );
                Ok(doc_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving model result");
                Err(e)
            }
        }
    }

    async fn write_model_result(&self, result: &ModelResult) -> Result<String, AppError> {
        let fields = document_fields(result);

        match &self.backend {
            Backend::Firestore(client) => {
                let doc_id = auto_id::generate(&self.rng)?;
                create_document(client, &doc_id, &fields).await?;
                Ok(doc_id)
            }
            Backend::Memory(docs) => {
                let stored = StoredResult {
                    fields,
                    created_at: Utc::now(),
                };

                loop {
                    let doc_id = auto_id::generate(&self.rng)?;
                    if let Entry::Vacant(slot) = docs.entry(doc_id.clone()) {
                        slot.insert(stored);
                        return Ok(doc_id);
                    }
                }
            }
            Backend::Offline => Err(AppError::Offline),
        }
    }

    /// Read back a saved result document, including `createdAt`.
    pub async fn get_model_result(
        &self,
        doc_id: &str,
    ) -> Result<Option<Map<String, Value>>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => Ok(client
                .fluent()
                .select()
                .by_id_in(collections::MODEL_RESULTS)
                .obj()
                .one(doc_id)
                .await?),
            Backend::Memory(docs) => Ok(docs.get(doc_id).map(|doc| doc.to_document())),
            Backend::Offline => Err(AppError::Offline),
        }
    }

    /// Raw stored entry from the in-memory backend.
    ///
    /// Returns `None` for other backends or unknown IDs.
    pub fn stored_in_memory(&self, doc_id: &str) -> Option<StoredResult> {
        match &self.backend {
            Backend::Memory(docs) => docs.get(doc_id).map(|doc| doc.clone()),
            _ => None,
        }
    }

    /// Number of documents held by the in-memory backend (0 otherwise).
    pub fn in_memory_len(&self) -> usize {
        match &self.backend {
            Backend::Memory(docs) => docs.len(),
            _ => 0,
        }
    }
}

/// Caller fields with any `createdAt` dropped; the store always sets it.
fn document_fields(result: &ModelResult) -> Map<String, Value> {
    let mut fields = result.fields().clone();
    fields.remove(CREATED_AT_FIELD);
    fields
}

/// Create `model_results/{doc_id}` with `createdAt` set to the request time.
///
/// Fails rather than overwriting if the document already exists.
async fn create_document(
    client: &firestore::FirestoreDb,
    doc_id: &str,
    fields: &Map<String, Value>,
) -> Result<(), AppError> {
    let _: () = client
        .fluent()
        .update()
        .in_col(collections::MODEL_RESULTS)
        .precondition(firestore::FirestoreWritePrecondition::Exists(false))
        .document_id(doc_id)
        .object(fields)
        .transforms(|t| {
            t.fields([t.field(CREATED_AT_FIELD).server_value(
                firestore::FirestoreTransformServerValue::RequestTime,
            )])
        })
        .execute()
        .await?;
    Ok(())
}

// Unsigned JWT ("alg": "none"); only the emulator accepts it.
const EMULATOR_JWT: &str = "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0.";

fn emulator_token() -> gcloud_sdk::Token {
    gcloud_sdk::Token {
        token_type: "Bearer".to_string(),
        token: gcloud_sdk::SecretValue::new(EMULATOR_JWT.to_string().into()),
        expiry: Utc::now() + chrono::Duration::hours(1),
    }
}
