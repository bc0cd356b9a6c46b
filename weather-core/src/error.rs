use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single weather lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered but does not know the requested place.
    #[error("Location '{city}' not found: {message}")]
    LocationNotFound { city: String, message: String },

    /// The API refused the request, e.g. an invalid or missing API key.
    #[error("Weather service rejected the request with status {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    /// The body did not have the expected shape.
    #[error("Malformed weather response: {0}")]
    Malformed(String),

    /// Network failure while sending the request or reading the body.
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[source] reqwest::Error),
}

/// The request URL carries `appid`, so it is stripped before the error can be
/// displayed or logged.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.without_url())
    }
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::LocationNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = FetchError::LocationNotFound {
            city: "Atlantis".into(),
            message: "city not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Location 'Atlantis' not found: city not found");

        let err = FetchError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid API key".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("401"));
    }
}
