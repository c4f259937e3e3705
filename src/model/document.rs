//! Reading and writing the small JSON documents the models persist to.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PickerError, Result};

/// Read the value under a required top-level `key`.
///
/// A missing file is `Ok(None)`. A file that exists but has no `key` is a
/// `ConfigFormat` error, never an empty default.
pub(crate) fn read_keyed<T: DeserializeOwned>(path: &Path, key: &'static str) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PickerError::Load {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let parse_error = |source| PickerError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut document: Map<String, Value> = serde_json::from_str(&contents).map_err(parse_error)?;
    let value = document.remove(key).ok_or_else(|| PickerError::ConfigFormat {
        path: path.to_path_buf(),
        key,
    })?;
    let parsed = serde_json::from_value(value).map_err(parse_error)?;
    Ok(Some(parsed))
}

/// Write `document` as pretty-printed JSON, replacing whatever was there
pub(crate) fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let persistence_error = |source| PickerError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let mut contents = serde_json::to_string_pretty(document)
        .map_err(|e| persistence_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    contents.push('\n');
    fs::write(path, contents).map_err(persistence_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let absent = temp.path().join("absent.json");
        let result: Option<Vec<String>> = read_keyed(&absent, "images").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_key_is_config_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, "{}").unwrap();

        let result: Result<Option<Vec<String>>> = read_keyed(&path, "images");
        assert!(matches!(
            result,
            Err(PickerError::ConfigFormat { key: "images", .. })
        ));
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, "albums: [").unwrap();

        let result: Result<Option<Vec<String>>> = read_keyed(&path, "albums");
        assert!(matches!(result, Err(PickerError::Parse { .. })));
    }

    #[test]
    fn test_wrong_shape_under_key_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, r#"{"albums": ["not", "a", "map"]}"#).unwrap();

        let result: Result<Option<BTreeMap<String, String>>> = read_keyed(&path, "albums");
        assert!(matches!(result, Err(PickerError::Parse { .. })));
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");

        let mut albums = BTreeMap::new();
        albums.insert("fav".to_string(), "/tmp/fav".to_string());
        let mut document = BTreeMap::new();
        document.insert("albums", albums.clone());
        write_document(&path, &document).unwrap();

        let read: BTreeMap<String, String> = read_keyed(&path, "albums").unwrap().unwrap();
        assert_eq!(read, albums);
    }

    #[test]
    fn test_write_into_missing_directory_is_persistence_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/doc.json");

        let result = write_document(&path, &vec!["a"]);
        assert!(matches!(result, Err(PickerError::Persistence { .. })));
    }
}
