/// Dataset loader
///
/// The dataset is a JSON array of photo records, read from a local file or
/// an http(s) URL. This is the application's only suspension point at
/// startup; there is no retry and no timeout.
use log::info;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tokio::task;

use crate::error::LoadError;

/// Where to read bytes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// http(s) URLs are fetched over the network, anything else is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and parse the dataset
pub async fn load_dataset(source: DataSource) -> Result<Vec<Value>, LoadError> {
    info!("🔍 Loading photo dataset from {}", source);

    let bytes = read_bytes(&source).await?;

    // Spawn blocking because large datasets take a while to parse
    task::spawn_blocking(move || parse_records(&bytes)).await?
}

/// Read the raw bytes behind a source
pub async fn read_bytes(source: &DataSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DataSource::File(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
        DataSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Http(status.as_u16()));
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

/// The document must be a JSON array; individual records may be any shape
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Value>, LoadError> {
    serde_json::from_slice::<Vec<Value>>(bytes).map_err(|e| LoadError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("oldstl-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_source_kinds() {
        assert_eq!(
            DataSource::parse("https://example.org/locations.json"),
            DataSource::Url("https://example.org/locations.json".into())
        );
        assert_eq!(
            DataSource::parse("data/locations.json"),
            DataSource::File(PathBuf::from("data/locations.json"))
        );
    }

    #[test]
    fn test_parse_accepts_loose_records() {
        let records = parse_records(br#"[{"id": 1}, "odd", 3, {"extracted": null}]"#).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_parse_rejects_non_arrays() {
        assert!(matches!(parse_records(br#"{"id": 1}"#), Err(LoadError::Parse(_))));
        assert!(matches!(parse_records(b"[{\"id\": 1"), Err(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = temp_file("locations.json", r#"[{"id": 1, "date": "1904"}]"#);
        let records = load_dataset(DataSource::File(path.clone())).await.unwrap();
        assert_eq!(records.len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/oldstl/locations.json").to_path_buf();
        let result = load_dataset(DataSource::File(path)).await;
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
