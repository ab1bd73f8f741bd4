//! Asset loading
//!
//! Everything here is CPU-side: files are read and decoded into plain data
//! that the OpenGL backend uploads.

pub mod obj_loader;
pub mod image_loader;
pub mod materials;

pub use obj_loader::{ObjLoader, ModelData};
pub use image_loader::ImageData;
pub use materials::{MtlParser, MtlData};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// File could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Text asset could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// File parsed but the contents are unusable
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Image could not be decoded
    #[error("Failed to decode image {path}: {message}")]
    Decode {
        /// File that failed
        path: String,
        /// Decoder message
        message: String,
    },
}
