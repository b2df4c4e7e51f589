use thiserror::Error;

/// Failure kinds surfaced by the public decode operations.
///
/// Field-level formatting problems never show up here: the AAMVA formatters
/// degrade to the original raw string instead of failing the whole payload.
/// Only pipeline-level failures become request-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The symbol-reading backend is missing or broken. Reported before any
    /// detection attempt runs, never conflated with "nothing detected".
    #[error("decoder unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// Every fallback stage ran and none of them detected a symbol.
    #[error("No {} detected in image", .0.noun())]
    NoSymbolFound(SymbolKind),

    /// The underlying decode call raised an unexpected fault mid-attempt.
    #[error("Barcode decode error: {0}")]
    DecodeFailure(String),

    /// Reserved for payloads that are structurally unusable (non-text data).
    /// Ordinary malformed field values degrade to pass-through instead.
    #[error("AAMVA parsing error: {0}")]
    MalformedPayload(String),
}

/// What a decode operation was looking for; selects the user-facing
/// wording of [`DecodeError::NoSymbolFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Barcode,
    Pdf417,
}

impl SymbolKind {
    fn noun(self) -> &'static str {
        match self {
            SymbolKind::Barcode => "barcode",
            SymbolKind::Pdf417 => "PDF417 code",
        }
    }
}
