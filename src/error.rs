use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    /// The file exists but lacks its required top-level key
    #[error("{} is not correctly formatted: missing top-level key '{key}'", .path.display())]
    ConfigFormat { path: PathBuf, key: &'static str },

    /// The file exists but is not a valid document
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No such album: {0}")]
    UnknownAlbum(String),

    /// Navigation or current-item access with no items loaded
    #[error("No images loaded")]
    EmptyCollection,

    #[error("Failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the registry or picked list to disk failed
    #[error("Failed to save {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input {}: {source}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Album directory {} is unusable: {source}", .path.display())]
    AlbumDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create marker {}: {source}", .path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, PickerError>;
