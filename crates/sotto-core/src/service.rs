//! The relay service: submission pipeline and event dispatch.

use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::disclosure::DisclosureService;
use crate::effects::{ChannelEffects, IdentityEffects, PermissionEffects, PublishEffects};
use crate::entry_point::EntryPointManager;
use crate::error::{DraftError, RelayError};
use crate::events::{EventOutcome, RelayEvent};
use crate::ledger::{LedgerEntry, LedgerStore};
use crate::sanitize;
use crate::types::{AnonymousPost, AuthorRef, Disclosure, MessageId};

/// Name of the moderator command that de-anonymizes a message.
pub const REVEAL_COMMAND: &str = "reveal";

/// User-facing reply strings delivered as private acknowledgments.
pub mod reply {
    /// Submission accepted, published and recorded.
    pub const SUBMITTED: &str = "Anonymous message sent!";
    /// Draft had more than one line break.
    pub const TOO_MANY_LINE_BREAKS: &str = "Only one line break is allowed.";
    /// Draft exceeded the character limit.
    pub const TOO_LONG: &str = "Messages are limited to 200 characters.";
    /// Anonymous publish failed; nothing was posted.
    pub const PUBLISH_FAILED: &str = "Failed to send the message.";
    /// Post is public but could not be recorded. Degraded but honest.
    pub const SENT_BUT_UNRECORDED: &str = "Sent, but an internal error occurred.";
    /// Requester lacks the moderation capability.
    pub const MODERATORS_ONLY: &str = "This command is for moderators only.";
    /// Reveal invoked without a usable message number.
    pub const REVEAL_USAGE: &str = "Provide the message number to reveal.";
    /// Ledger entry exists but the identity backend failed.
    pub const IDENTITY_FAILED: &str = "Could not fetch the sender's details.";
}

/// Coordinates the ledger, the entry point, and the disclosure service
/// behind a single event dispatcher.
///
/// `submit` takes `&mut self`; exclusive access is what guarantees id
/// uniqueness and monotonicity (see the crate-level concurrency note).
#[derive(Debug)]
pub struct RelayService {
    ledger: LedgerStore,
    entry_point: EntryPointManager,
    disclosure: DisclosureService,
    label: String,
}

impl RelayService {
    /// Build a service over a loaded ledger. `label` is the display
    /// name appended after the id on every anonymous post.
    pub fn new(ledger: LedgerStore, label: impl Into<String>) -> Self {
        Self {
            ledger,
            entry_point: EntryPointManager::new(),
            disclosure: DisclosureService::new(),
            label: label.into(),
        }
    }

    /// Read-only access to the ledger.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Replace any stale invitations left from a previous run. Called
    /// once at startup, after the ledger is loaded.
    pub async fn startup<E>(&self, effects: &E) -> Result<(), crate::effects::ChannelError>
    where
        E: ChannelEffects,
    {
        self.entry_point.refresh(effects).await
    }

    /// Run one draft through the submission pipeline.
    ///
    /// Ordering: validate and sanitize, allocate an id, publish
    /// anonymously, record, refresh the entry point. The publish must
    /// be visible before the entry is claimed as recorded; a write
    /// failure in between is surfaced as the distinct
    /// [`RelayError::Persistence`].
    ///
    /// # Errors
    /// * [`RelayError::Validation`] - rejected before any id was
    ///   allocated; no side effects
    /// * [`RelayError::Publish`] - id burned, nothing posted or
    ///   recorded
    /// * [`RelayError::Persistence`] - the post is public but the
    ///   ledger write failed; not retried
    pub async fn submit<E>(
        &mut self,
        effects: &E,
        author: AuthorRef,
        draft: &str,
    ) -> Result<MessageId, RelayError>
    where
        E: PublishEffects + ChannelEffects,
    {
        sanitize::validate(draft)?;
        let content = sanitize::neutralize_mentions(draft);

        let id = self.ledger.allocate();
        let post = AnonymousPost {
            content: content.clone(),
            display_name: format!("{id} {}", self.label),
        };

        if let Err(err) = effects.publish_anonymous(&post).await {
            // The id stays burned. Pin the advanced counter so the gap
            // survives a restart instead of being silently reused.
            if let Err(save_err) = self.ledger.save().await {
                warn!(%id, %save_err, "could not persist burned id after publish failure");
            }
            return Err(RelayError::Publish {
                id,
                reason: err.to_string(),
            });
        }

        let entry = LedgerEntry {
            id,
            content,
            timestamp: OffsetDateTime::now_utc(),
            author,
        };
        if let Err(err) = self.ledger.record(entry).await {
            error!(%id, %err, "ledger write failed after publish");
            return Err(RelayError::Persistence {
                id,
                reason: err.to_string(),
            });
        }

        if let Err(err) = self.entry_point.refresh(effects).await {
            warn!(%err, "entry point refresh failed after submission");
        }

        info!(%id, "anonymous message relayed");
        Ok(id)
    }

    /// Disclose the author of a published message to an authorized
    /// requester.
    pub async fn reveal<E>(
        &self,
        effects: &E,
        requester: &AuthorRef,
        id: MessageId,
    ) -> Result<Disclosure, RelayError>
    where
        E: PermissionEffects + IdentityEffects,
    {
        self.disclosure
            .reveal(effects, &self.ledger, requester, id)
            .await
    }

    /// Route one host event to its component and produce the outcome
    /// the host should perform.
    ///
    /// Every failure of a user-triggered path ends as a private reply,
    /// never a propagated error.
    pub async fn dispatch<E>(&mut self, effects: &E, event: RelayEvent) -> EventOutcome
    where
        E: PublishEffects + ChannelEffects + PermissionEffects + IdentityEffects,
    {
        match event {
            RelayEvent::EntryTriggered { user } => EventOutcome::OpenForm { user },

            RelayEvent::FormSubmitted { user, draft } => {
                let text = match self.submit(effects, user.clone(), &draft).await {
                    Ok(_) => reply::SUBMITTED.to_string(),
                    Err(RelayError::Validation(DraftError::TooManyLineBreaks)) => {
                        reply::TOO_MANY_LINE_BREAKS.to_string()
                    }
                    Err(RelayError::Validation(DraftError::TooLong)) => reply::TOO_LONG.to_string(),
                    Err(RelayError::Persistence { .. }) => reply::SENT_BUT_UNRECORDED.to_string(),
                    Err(err) => {
                        error!(%err, "submission failed");
                        reply::PUBLISH_FAILED.to_string()
                    }
                };
                EventOutcome::Reply { user, text }
            }

            RelayEvent::CommandInvoked {
                name,
                invoker,
                args,
            } if name == REVEAL_COMMAND => {
                let text = match args.first().and_then(|arg| arg.parse::<u64>().ok()) {
                    None => reply::REVEAL_USAGE.to_string(),
                    Some(raw) => {
                        match self.reveal(effects, &invoker, MessageId(raw)).await {
                            Ok(disclosure) => disclosure.to_string(),
                            Err(RelayError::Unauthorized) => reply::MODERATORS_ONLY.to_string(),
                            Err(RelayError::NotFound(id)) => {
                                format!("No message with number {id} exists.")
                            }
                            Err(RelayError::IdentityResolution { .. }) => {
                                reply::IDENTITY_FAILED.to_string()
                            }
                            Err(err) => {
                                error!(%err, "disclosure failed");
                                reply::IDENTITY_FAILED.to_string()
                            }
                        }
                    }
                };
                EventOutcome::Reply {
                    user: invoker,
                    text,
                }
            }

            RelayEvent::CommandInvoked { name, .. } => {
                warn!(command = %name, "ignoring unknown command");
                EventOutcome::Ignored
            }
        }
    }
}
