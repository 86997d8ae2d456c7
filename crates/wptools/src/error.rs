/// Typed failures surfaced by the WordPress client. Errors propagate
/// unmodified to the caller - no local recovery, no retries.
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication required: {0}")]
    Auth(String),

    #[error("WordPress API error [{status}]: {body}")]
    Http { status: u16, body: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),
}
