// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use safai_saathi::{FirebaseConfig, ResultStore};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_store() -> ResultStore {
    ResultStore::connect(FirebaseConfig::default())
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create an in-memory store.
#[allow(dead_code)]
pub fn test_store_in_memory() -> ResultStore {
    ResultStore::new_in_memory(FirebaseConfig::default())
}

/// Create an offline store (all writes fail).
#[allow(dead_code)]
pub fn test_store_offline() -> ResultStore {
    ResultStore::new_offline(FirebaseConfig::default())
}

/// Captured JSON log output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl LogBuffer {
    /// Parsed log events, one per line.
    pub fn events(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).expect("log line should be JSON"))
            .collect()
    }

    /// Events logged at the given level (e.g. "ERROR").
    pub fn events_at(&self, level: &str) -> Vec<serde_json::Value> {
        self.events()
            .into_iter()
            .filter(|e| e["level"] == level)
            .collect()
    }
}

/// Route log events on the current thread into a buffer.
///
/// Works with the default current-thread `#[tokio::test]` runtime.
#[allow(dead_code)]
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}
