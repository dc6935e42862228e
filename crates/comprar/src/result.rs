//! Result and error types for Comprar.

use thiserror::Error;

/// Result type for Comprar operations
pub type ComprarResult<T> = Result<T, ComprarError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum ComprarError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Evaluation failed: {message}")]
    EvaluationError {
        /// Error message
        message: String,
    },

    /// Required action target never resolved.
    ///
    /// Raised only for action-style operations (click, fill, hover) whose
    /// precondition is that the element exists. Query-style reads degrade
    /// to empty/false/zero instead of producing this.
    #[error("No element matched '{selector}' for a required action")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
    },

    /// Bounded operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Scenario checkpoint mismatch; fatal to the remaining scenario
    #[error("Checkpoint '{checkpoint}' failed: expected {expected}, observed {observed}")]
    CheckpointFailed {
        /// Checkpoint label
        checkpoint: String,
        /// Expected value
        expected: String,
        /// Observed value
        observed: String,
    },

    /// Invalid URL pattern in a checkpoint
    #[error("Invalid URL pattern '{pattern}': {message}")]
    UrlPatternError {
        /// The pattern that failed to compile
        pattern: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_failed_display() {
        let err = ComprarError::CheckpointFailed {
            checkpoint: "jackets url".to_string(),
            expected: "…/jackets-men.html".to_string(),
            observed: "about:blank".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("jackets url"));
        assert!(rendered.contains("expected"));
        assert!(rendered.contains("observed"));
    }

    #[test]
    fn test_element_not_found_names_selector() {
        let err = ComprarError::ElementNotFound {
            selector: "#product-addtocart-button".to_string(),
        };
        assert!(err.to_string().contains("#product-addtocart-button"));
    }
}
