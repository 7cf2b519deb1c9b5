use std::time::Duration;

/// Errors from submitting a report to the rendering server.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request could not be sent or the connection failed.
    #[error("Impossible de joindre le serveur : {0}")]
    Http(#[from] reqwest::Error),

    /// No response arrived within the per-attempt timeout.
    #[error("Le serveur n'a pas répondu après {} s", .0.as_secs())]
    Timeout(Duration),

    /// The server answered with a non-success status.
    #[error("Erreur {status} : {message}")]
    Status { status: u16, message: String },

    /// The success body could not be decoded.
    #[error("Réponse du serveur illisible : {0}")]
    Decode(reqwest::Error),
}

impl SubmitError {
    /// Returns `true` for transport failures worth one more attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Timeout(_) => true,
            Self::Status { .. } | Self::Decode(_) => false,
        }
    }
}
