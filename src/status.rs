//! Classification of HTTP status codes for reporting.
use std::fmt;

/// Represents the class of an HTTP status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusKind {
    /// 1xx responses.
    Informational,
    /// 2xx responses.
    Success,
    /// 3xx responses.
    Redirection,
    /// 4xx responses.
    ClientError,
    /// 5xx responses.
    ServerError,
    /// Anything outside the registered ranges.
    Unknown,
}

/// An HTTP status code received from the target, together with its class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status {
    kind: StatusKind,
    code: u16,
}

impl Status {
    /// Classifies a raw status code.
    pub fn from_code(code: u16) -> Self {
        let kind = match code {
            100..=199 => StatusKind::Informational,
            200..=299 => StatusKind::Success,
            300..=399 => StatusKind::Redirection,
            400..=499 => StatusKind::ClientError,
            500..=599 => StatusKind::ServerError,
            _ => StatusKind::Unknown,
        };
        Self { kind, code }
    }

    /// Returns the kind of the status.
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Returns the numeric code of the status.
    pub fn code(&self) -> u16 {
        self.code
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Informational => write!(f, "Informational"),
            Self::Success => write!(f, "Success"),
            Self::Redirection => write!(f, "Redirection"),
            Self::ClientError => write!(f, "Client Error"),
            Self::ServerError => write!(f, "Server Error"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ranges() {
        assert_eq!(Status::from_code(101).kind(), StatusKind::Informational);
        assert_eq!(Status::from_code(200).kind(), StatusKind::Success);
        assert_eq!(Status::from_code(204).kind(), StatusKind::Success);
        assert_eq!(Status::from_code(301).kind(), StatusKind::Redirection);
        assert_eq!(Status::from_code(404).kind(), StatusKind::ClientError);
        assert_eq!(Status::from_code(503).kind(), StatusKind::ServerError);
        assert_eq!(Status::from_code(999).kind(), StatusKind::Unknown);
    }

    #[test]
    fn displays_kind_and_code() {
        assert_eq!(Status::from_code(404).to_string(), "Client Error(404)");
    }
}
