use std::env;

/// Limits for study-material file references. Binary content is hosted by
/// an external blob store; the service only persists the path/URL pair and
/// validates the declared size against this ceiling.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub max_upload_bytes: i64,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}
