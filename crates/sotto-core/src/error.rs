//! Error taxonomy for the relay.
//!
//! Draft problems, publish failures, and disclosure refusals are all
//! recovered locally with a private reply; only configuration errors
//! (and a capability-misconfiguration connection error) are fatal.

use crate::types::MessageId;

/// Reasons a draft is rejected before any id is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// The draft contains more than one line break.
    #[error("too many line breaks")]
    TooManyLineBreaks,
    /// The draft exceeds the character limit.
    #[error("too long")]
    TooLong,
}

/// Errors surfaced by relay operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Draft rejected before an id was allocated; no side effects.
    #[error("validation failed: {0}")]
    Validation(#[from] DraftError),
    /// Anonymous publish failed. The allocated id is burned and never
    /// reused; nothing was recorded.
    #[error("anonymous publish failed for {id}: {reason}")]
    Publish {
        /// The burned id.
        id: MessageId,
        /// Collaborator-reported reason.
        reason: String,
    },
    /// Durable write failed after a successful publish. The anonymous
    /// post is already public but cannot be disclosed until repaired.
    #[error("ledger write failed after publishing {id}: {reason}")]
    Persistence {
        /// Id of the already-published post.
        id: MessageId,
        /// Underlying persistence failure.
        reason: String,
    },
    /// The requester lacks the moderation capability.
    #[error("requester lacks the moderation capability")]
    Unauthorized,
    /// No ledger entry is recorded under the id (never allocated, or
    /// allocated but never recorded).
    #[error("no ledger entry for {0}")]
    NotFound(MessageId),
    /// The ledger entry exists but the identity backend could not
    /// resolve its author.
    #[error("identity resolution failed for {id}: {reason}")]
    IdentityResolution {
        /// Id of the entry whose author could not be resolved.
        id: MessageId,
        /// Collaborator-reported reason.
        reason: String,
    },
}

/// Ledger persistence failures (load or save).
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Reading or writing the ledger document failed.
    #[error("ledger io: {0}")]
    Io(#[from] std::io::Error),
    /// The ledger document could not be encoded or decoded.
    #[error("ledger document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Configuration errors; fatal at startup, before any connection.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment value is not set.
    #[error("missing required environment value {name}")]
    Missing {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// An environment value is set but unusable.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Gateway-level connection failure reported by the embedding host.
///
/// The gateway's own reconnection behavior handles transient failures;
/// only a capability misconfiguration should terminate the process.
#[derive(Debug, thiserror::Error)]
#[error("gateway connection error: {reason}")]
pub struct ConnectionError {
    /// Platform-reported reason.
    pub reason: String,
}

impl ConnectionError {
    /// Whether the failure indicates missing privileged capabilities,
    /// in which case the process should exit rather than wait for a
    /// reconnect.
    pub fn is_fatal(&self) -> bool {
        self.reason.contains("disallowed intents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_misconfiguration_is_fatal() {
        let err = ConnectionError {
            reason: "used disallowed intents".into(),
        };
        assert!(err.is_fatal());

        let err = ConnectionError {
            reason: "connection reset by peer".into(),
        };
        assert!(!err.is_fatal());
    }
}
