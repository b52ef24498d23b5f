use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success reply; `message` is the server's `{success:false, message}` text.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    Invalid(String),
}
