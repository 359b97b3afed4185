//! Parse errors

/// Length of the raw-response snippet carried by [`ParseError::NoContractFound`]
pub const SNIPPET_LEN: usize = 200;

/// Errors while extracting a contract from model output
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Response was empty or whitespace only
    #[error("model response is empty")]
    EmptyResponse,

    /// No `contract <Name> {` declaration anywhere in the response
    #[error("no contract declaration found in model response: {snippet:?}")]
    NoContractFound {
        /// Leading characters of the raw response
        snippet: String,
    },

    /// Extracted source has unbalanced braces
    #[error("unbalanced braces in contract source: {open} opening, {close} closing")]
    UnbalancedBraces {
        /// `{` count outside comments and strings
        open: usize,
        /// `}` count outside comments and strings
        close: usize,
    },
}

impl ParseError {
    /// Build `NoContractFound` from the raw response
    #[must_use]
    pub fn no_contract_found(raw: &str) -> Self {
        Self::NoContractFound {
            snippet: raw.chars().take(SNIPPET_LEN).collect(),
        }
    }

    /// Taxonomy label
    #[inline]
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::EmptyResponse => "EmptyResponse",
            Self::NoContractFound { .. } => "NoContractFound",
            Self::UnbalancedBraces { .. } => "UnbalancedBraces",
        }
    }
}
