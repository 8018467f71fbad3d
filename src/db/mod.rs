//! Database layer (Firestore).

pub mod auto_id;
pub mod firestore;

pub use self::firestore::{ResultStore, StoredResult};

/// Collection names as constants.
pub mod collections {
    /// Detection model results, one document per saved result
    pub const MODEL_RESULTS: &str = "model_results";
}

/// Field set to the server timestamp on every saved result.
pub const CREATED_AT_FIELD: &str = "createdAt";
