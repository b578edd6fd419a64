// Version information for the embedder node

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-e5-large-v2";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Embedding model served by this node
pub const MODEL_NAME: &str = "e5-large-v2";

/// Output dimension of the served model
pub const OUTPUT_DIMENSION: usize = 1024;

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Embedder Node {} ({})", VERSION_NUMBER, MODEL_NAME)
}
