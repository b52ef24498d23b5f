//! Image hosting for product pictures.

mod cloudinary;

pub use self::cloudinary::CloudinaryClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}
