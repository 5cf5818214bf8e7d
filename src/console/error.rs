#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;
