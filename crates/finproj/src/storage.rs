//! Model file loading
//!
//! Models are serde documents. The file extension picks the format:
//! `.yaml`/`.yml` through serde-saphyr, `.json` through serde_json.

use std::fs;
use std::path::Path;

use finproj_core::ModelData;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    UnknownFormat(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::UnknownFormat(path) => {
                write!(f, "Unknown model format for {}: expected .yaml, .yml or .json", path)
            }
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Yaml,
    Json,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            "json" => Some(ModelFormat::Json),
            _ => None,
        }
    }
}

/// Parse model text in the given format
pub fn parse_model(content: &str, format: ModelFormat) -> Result<ModelData, StorageError> {
    match format {
        ModelFormat::Yaml => serde_saphyr::from_str(content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse YAML model: {}", e))),
        ModelFormat::Json => serde_json::from_str(content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse JSON model: {}", e))),
    }
}

/// Load a model file, choosing the format from its extension
pub fn load_model(path: &Path) -> Result<ModelData, StorageError> {
    let format = ModelFormat::from_path(path)
        .ok_or_else(|| StorageError::UnknownFormat(path.display().to_string()))?;

    let content = fs::read_to_string(path).map_err(|e| {
        StorageError::Io(format!("Failed to read model {}: {}", path.display(), e))
    })?;

    let model = parse_model(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        assets = model.assets.len(),
        incomes = model.incomes.len(),
        expenses = model.expenses.len(),
        transactions = model.transactions.len(),
        "Loaded model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ModelFormat::from_path(&PathBuf::from("plan.yaml")),
            Some(ModelFormat::Yaml)
        );
        assert_eq!(
            ModelFormat::from_path(&PathBuf::from("plan.YML")),
            Some(ModelFormat::Yaml)
        );
        assert_eq!(
            ModelFormat::from_path(&PathBuf::from("dir/plan.json")),
            Some(ModelFormat::Json)
        );
        assert_eq!(ModelFormat::from_path(&PathBuf::from("plan.txt")), None);
        assert_eq!(ModelFormat::from_path(&PathBuf::from("plan")), None);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_model("{ not json", ModelFormat::Json).unwrap_err();
        assert!(matches!(err, StorageError::Parse(_)));
    }
}
