use std::fmt;

/// Whether a failed remote call is worth repeating unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    Transient,
    Permanent,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Transient => "transient",
            FailureClass::Permanent => "permanent",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureClass::Transient)
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PERMANENT_MARKERS: [&str; 6] = [
    "401",
    "unauthorized",
    "400",
    "bad request",
    "403",
    "forbidden",
];

const TRANSIENT_MARKERS: [&str; 4] = ["timeout", "429", "rate limit", "connection failed"];

/// Errors that can be fed to the retry controller.
///
/// Implementors report the class implied by their declared kind, if any.
/// When no kind is declared the message is inspected instead, and anything
/// still unrecognised is treated as permanent.
pub trait ClassifyFailure: fmt::Display {
    /// Short name of the error kind, used in log entries.
    fn kind(&self) -> &'static str;

    fn declared_class(&self) -> Option<FailureClass>;

    fn classify(&self) -> FailureClass {
        self.declared_class()
            .unwrap_or_else(|| classify_message(&self.to_string()))
    }
}

/// Substring fallback for errors without a recognised kind.
///
/// Permanent markers are checked before transient ones, so a message such as
/// "400 bad request (timeout header missing)" stays permanent.
pub fn classify_message(message: &str) -> FailureClass {
    let lowered = message.to_lowercase();

    if PERMANENT_MARKERS.iter().any(|m| lowered.contains(m)) {
        return FailureClass::Permanent;
    }

    if TRANSIENT_MARKERS.iter().any(|m| lowered.contains(m)) {
        return FailureClass::Transient;
    }

    FailureClass::Permanent
}
