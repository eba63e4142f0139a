// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The unified error taxonomy.
//!
//! The transport boundary produces two very different failure channels: the
//! network failing outright, and the server semantically rejecting a request
//! it understood perfectly well. [`ActionError::classify`] is the single
//! point where both collapse into one tagged shape — a [`TransportFailure`]
//! carrying a structured payload that matches the [`ErrorKind`] union passes
//! through (tagged with the originating action's name); anything else is
//! synthesized into [`ErrorKind::InternalError`] with the raw message.
//!
//! Everything downstream — bindings, invokers, toasts — consumes only
//! [`ActionError`] and never sees the raw failure again.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// Closed enumeration of semantic server rejections.
///
/// This mirrors the wire-level error union of the console's API; the set is
/// closed on purpose — an unrecognized payload is an [`Self::InternalError`],
/// not a new kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request (schema accepted client-side, rejected at the edge).
    BadRequest,
    /// Server-side validation failure (for example, cross-field rules).
    Validation,
    /// Uniqueness conflict.
    AlreadyExists,
    /// The addressed resource does not exist.
    NotFound,
    /// Missing or insufficient credentials.
    Unauthorized,
    /// Catch-all, including unclassifiable transport failures.
    InternalError,
}

impl ErrorKind {
    /// The wire-level tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::Validation => "Validation",
            Self::AlreadyExists => "AlreadyExists",
            Self::NotFound => "NotFound",
            Self::Unauthorized => "Unauthorized",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw failure at the transport boundary, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    /// The server answered with a structured payload matching the
    /// [`ErrorKind`] union.
    Rejection {
        /// The semantic rejection kind.
        kind: ErrorKind,
        /// The server's human-readable message.
        message: String,
    },
    /// The transport failed without a recognizable payload (connection
    /// refused, timeout, malformed body).
    Failure {
        /// The raw failure message.
        message: String,
    },
}

/// A normalized server-boundary error: kind, message, and the name of the
/// action that produced it.
///
/// The action name travels with the error so that a generic toast handler
/// far from the call site can still say which operation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionError {
    /// The semantic kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Name of the originating action.
    pub action: Cow<'static, str>,
}

impl ActionError {
    /// Build an error directly from its parts.
    pub fn new(
        action: impl Into<Cow<'static, str>>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            action: action.into(),
        }
    }

    /// Classify a raw transport failure for `action`.
    ///
    /// Structured rejections pass through; everything else becomes an
    /// [`ErrorKind::InternalError`] carrying the raw message.
    pub fn classify(action: impl Into<Cow<'static, str>>, failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Rejection { kind, message } => Self {
                kind,
                message,
                action: action.into(),
            },
            TransportFailure::Failure { message } => Self {
                kind: ErrorKind::InternalError,
                message,
                action: action.into(),
            },
        }
    }

    /// Synthesize the error used when an invocation resolved with neither
    /// data nor a recognized error.
    pub fn missing_data(action: impl Into<Cow<'static, str>>) -> Self {
        Self::new(
            action,
            ErrorKind::InternalError,
            "internal server error: data not found",
        )
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from \"{}\": {}", self.kind, self.action, self.message)
    }
}

impl core::error::Error for ActionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn structured_rejection_passes_through() {
        let err = ActionError::classify(
            "createApp",
            TransportFailure::Rejection {
                kind: ErrorKind::AlreadyExists,
                message: "app exists".to_string(),
            },
        );
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
        assert_eq!(err.message, "app exists");
        assert_eq!(err.action, "createApp");
    }

    #[test]
    fn bare_failure_synthesizes_internal_error() {
        let err = ActionError::classify(
            "deleteVolume",
            TransportFailure::Failure {
                message: "connection refused".to_string(),
            },
        );
        assert_eq!(err.kind, ErrorKind::InternalError);
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.action, "deleteVolume");
    }

    #[test]
    fn display_carries_the_triple() {
        let err = ActionError::new("updateApp", ErrorKind::NotFound, "no such app");
        assert_eq!(err.to_string(), "NotFound from \"updateApp\": no such app");
    }
}
