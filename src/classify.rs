/// Broad failure category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    Network,
    Unknown,
}

/// A fetch failure as it is displayed in the affected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// One-line headline, e.g. "Network error"
    pub headline: String,
    /// Guidance on what to do about it
    pub message: String,
    pub retryable: bool,
}

const AUTH_SIGNATURES: &[&str] = &["Could not resolve", "Bad credentials", "401 Unauthorized"];
const NETWORK_SIGNATURES: &[&str] = &["connect:", "timeout", "timed out", "Connect", "dns error"];

pub fn classify(raw: &str) -> ClassifiedError {
    let category = if AUTH_SIGNATURES.iter().any(|s| raw.contains(s)) {
        ErrorCategory::Auth
    } else if NETWORK_SIGNATURES.iter().any(|s| raw.contains(s)) {
        ErrorCategory::Network
    } else {
        ErrorCategory::Unknown
    };

    let (headline, message) = match category {
        ErrorCategory::Auth => (
            "Authentication error".to_string(),
            "Please run 'gh auth login' to authenticate with GitHub".to_string(),
        ),
        ErrorCategory::Network => (
            "Network error".to_string(),
            "Please check your internet connection".to_string(),
        ),
        ErrorCategory::Unknown => (
            format!("Error: {}", raw),
            "An unexpected error occurred".to_string(),
        ),
    };

    // Every category can be retried; the category only changes the guidance.
    ClassifiedError {
        category,
        headline,
        message,
        retryable: true,
    }
}
