//! Boundary traits for the external collaborators.
//!
//! The relay never talks to the chat platform directly. The embedding
//! host implements these traits over its gateway connection and passes
//! them per call, so the core stays runtime-agnostic and testable with
//! in-memory implementations.

use async_trait::async_trait;

use crate::types::{AnonymousPost, AuthorRef, InvitationRef, ResolvedIdentity};

/// Failure from the anonymous publish collaborator.
#[derive(Debug, thiserror::Error)]
#[error("publish failed: {0}")]
pub struct PublishError(pub String);

/// Failure from a public-channel operation.
#[derive(Debug, thiserror::Error)]
#[error("channel operation failed: {0}")]
pub struct ChannelError(pub String);

/// Failure from the platform permission system.
#[derive(Debug, thiserror::Error)]
#[error("permission check failed: {0}")]
pub struct PermissionError(pub String);

/// Failure from the identity backend.
#[derive(Debug, thiserror::Error)]
#[error("identity lookup failed: {0}")]
pub struct IdentityError(pub String);

/// Fire-and-forget anonymous posting (webhook-like collaborator).
#[async_trait]
pub trait PublishEffects: Send + Sync {
    /// Deliver one post with no link to the real account.
    async fn publish_anonymous(&self, post: &AnonymousPost) -> Result<(), PublishError>;
}

/// Operations on the public channel that hosts the entry point.
#[async_trait]
pub trait ChannelEffects: Send + Sync {
    /// Invitations authored by this system found within the most recent
    /// `limit` channel messages.
    async fn live_invitations(&self, limit: usize) -> Result<Vec<InvitationRef>, ChannelError>;

    /// Delete one invitation message.
    async fn delete_invitation(&self, invitation: &InvitationRef) -> Result<(), ChannelError>;

    /// Post a fresh invitation and return its handle.
    async fn post_invitation(&self) -> Result<InvitationRef, ChannelError>;
}

/// Moderator capability checks (platform permission system).
#[async_trait]
pub trait PermissionEffects: Send + Sync {
    /// Whether the requester holds a manage-guild-equivalent capability.
    async fn can_reveal(&self, requester: &AuthorRef) -> Result<bool, PermissionError>;
}

/// Resolution of opaque author references to user-facing identities.
#[async_trait]
pub trait IdentityEffects: Send + Sync {
    /// Look up the public identity behind an author reference.
    async fn resolve(&self, author: &AuthorRef) -> Result<ResolvedIdentity, IdentityError>;
}
