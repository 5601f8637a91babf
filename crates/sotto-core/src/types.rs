//! Core value types for the relay.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Sequential number of a relayed message.
///
/// Allocated only by the ledger store, strictly increasing, never
/// reused even when a later pipeline step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Opaque identifier of a user on the chat platform.
///
/// Never exposed except through an authorized disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorRef(String);

impl AuthorRef {
    /// Wrap a platform user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AuthorRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AuthorRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handle to a live invitation message in the public channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationRef(String);

impl InvitationRef {
    /// Wrap a platform message identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw message identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvitationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InvitationRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One post handed to the anonymous publish collaborator.
///
/// Carries no link to the real account; the display name is the
/// sequential number plus a fixed label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousPost {
    /// Sanitized message text.
    pub content: String,
    /// Display name shown on the published post.
    pub display_name: String,
}

/// A user-facing identity resolved from an [`AuthorRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    /// Human-readable tag, e.g. `someone#1234`.
    pub tag: String,
    /// The underlying author reference.
    pub author: AuthorRef,
}

/// Result of an authorized disclosure lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    /// Sequential number of the disclosed message.
    pub id: MessageId,
    /// Resolved identity of the original author.
    pub identity: ResolvedIdentity,
    /// Content as recorded (and published).
    pub content: String,
    /// When the submission was accepted.
    pub timestamp: OffsetDateTime,
}

impl fmt::Display for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sent_at = self
            .timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.timestamp.to_string());
        writeln!(f, "📩 Number: {}", self.id)?;
        writeln!(f, "👤 Sender: {} (ID: {})", self.identity.tag, self.identity.author)?;
        writeln!(f, "📜 Content: {}", self.content)?;
        write!(f, "🕒 Sent at: {sent_at}")
    }
}
