//! Firebase project configuration loaded from environment variables.
//!
//! Values are read once at startup and handed to [`crate::db::ResultStore`].
//! They are never embedded in the binary.

use std::env;

/// Firebase project configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    /// Web API key
    pub api_key: String,
    /// Auth domain (e.g. `project.firebaseapp.com`)
    pub auth_domain: String,
    /// GCP / Firebase project ID
    pub project_id: String,
    /// Cloud Storage bucket
    pub storage_bucket: String,
    /// Cloud Messaging sender ID
    pub messaging_sender_id: String,
    /// Firebase app ID
    pub app_id: String,
    /// Analytics measurement ID
    pub measurement_id: String,
}

impl Default for FirebaseConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_key: "test_api_key".to_string(),
            auth_domain: "test-project.firebaseapp.com".to_string(),
            project_id: "test-project".to_string(),
            storage_bucket: "test-project.firebasestorage.app".to_string(),
            messaging_sender_id: "000000000000".to_string(),
            app_id: "1:000000000000:web:0000000000000000".to_string(),
            measurement_id: "G-TEST000000".to_string(),
        }
    }
}

impl FirebaseConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local
    /// development. Every value is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_key: required("FIREBASE_API_KEY")?,
            auth_domain: required("FIREBASE_AUTH_DOMAIN")?,
            project_id: required("FIREBASE_PROJECT_ID")?,
            storage_bucket: required("FIREBASE_STORAGE_BUCKET")?,
            messaging_sender_id: required("FIREBASE_MESSAGING_SENDER_ID")?,
            app_id: required("FIREBASE_APP_ID")?,
            measurement_id: required("FIREBASE_MEASUREMENT_ID")?,
        })
    }

    /// Check that no field is blank.
    ///
    /// `from_env` already guarantees this; configs built by hand go through
    /// here before a connection is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("FIREBASE_API_KEY", &self.api_key),
            ("FIREBASE_AUTH_DOMAIN", &self.auth_domain),
            ("FIREBASE_PROJECT_ID", &self.project_id),
            ("FIREBASE_STORAGE_BUCKET", &self.storage_bucket),
            ("FIREBASE_MESSAGING_SENDER_ID", &self.messaging_sender_id),
            ("FIREBASE_APP_ID", &self.app_id),
            ("FIREBASE_MEASUREMENT_ID", &self.measurement_id),
        ];

        match fields.into_iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::Missing(name)),
            None => Ok(()),
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
