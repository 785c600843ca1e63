use derive_more::Display;

/// Failures surfaced by [`PortfolioClient`](super::PortfolioClient) and the sync session.
#[derive(Debug, Display)]
pub enum ClientError {
    #[display("Request failed: {_0}")]
    Transport(reqwest::Error),

    #[display("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[display("Failed to decode response: {_0}")]
    Decode(String),

    #[display("Invalid API URL: {_0}")]
    InvalidUrl(url::ParseError),

    #[display("Another action is already in progress")]
    ActionInProgress,
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::InvalidUrl(e) => Some(e),
            _ => None,
        }
    }
}

impl ClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_shows_server_message() {
        let err = ClientError::Api { status: 404, message: "Skill not found".into() };

        assert_eq!(err.to_string(), "Skill not found (HTTP 404)");
        assert!(err.is_not_found());
    }

    #[test]
    fn busy_error_has_no_status() {
        assert_eq!(ClientError::ActionInProgress.status(), None);
    }
}
