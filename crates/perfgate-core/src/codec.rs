//! JSON/YAML document selection by file extension.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, String> {
    match DocFormat::from_path(path) {
        DocFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        DocFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
    }
}

pub(crate) fn encode<T: Serialize>(path: &Path, value: &T) -> Result<String, String> {
    match DocFormat::from_path(path) {
        DocFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| e.to_string()),
        DocFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    }
}
