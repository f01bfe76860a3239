pub mod buffer;
pub mod filter;

pub use buffer::{ImageBuffer, Viewer};
pub use filter::{Effect, Filter, FilterChoice, GrayscaleConfig, GrayscaleMode, Invert};

use std::path::PathBuf;

pub type ImageFilterResult<T> = Result<T, ImageFilterError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageFilterError {
    #[error("failed to load image {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save image {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no pixel data loaded")]
    EmptyBuffer,
    #[error("invalid filter selection: {0:?}")]
    InvalidSelection(String),
    #[error("display error: {0}")]
    Display(String),
}
