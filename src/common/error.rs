use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog answered with a non-success status. The body is never read.
    #[error("Remote fetch failed with status {status} for {url}")]
    RemoteFetch { status: u16, url: String },

    /// The body did not match the shape the catalog documents.
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Invalid item reference: {0}")]
    InvalidReference(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl CatalogError {
    /// HTTP status carried by a `RemoteFetch` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::RemoteFetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Http(_) | CatalogError::Transport(_) => "transport",
            CatalogError::RemoteFetch { .. } => "remote_fetch",
            CatalogError::MalformedResponse { .. } => "malformed_response",
            CatalogError::InvalidReference(_) => "invalid_reference",
            CatalogError::Json(_) => "json",
            CatalogError::Toml(_) | CatalogError::Config(_) | CatalogError::Env(_) => "config",
            CatalogError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_reported_for_remote_fetch() {
        let err = CatalogError::RemoteFetch {
            status: 404,
            url: "https://pokeapi.co/api/v2/pokemon/missingno".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), "remote_fetch");

        let err = CatalogError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.kind(), "transport");
    }

    #[test]
    fn remote_fetch_message_names_status_and_url() {
        let err = CatalogError::RemoteFetch {
            status: 503,
            url: "https://pokeapi.co/api/v2/pokemon?limit=20&offset=0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("limit=20"));
    }
}
