//! Authorization-gated de-anonymization lookups.

use tracing::{info, warn};

use crate::effects::{IdentityEffects, PermissionEffects};
use crate::error::RelayError;
use crate::ledger::LedgerStore;
use crate::types::{AuthorRef, Disclosure, MessageId};

/// Translates a message number back into its original author, for
/// requesters holding the moderation capability.
///
/// Disclosures are not themselves recorded in the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisclosureService;

impl DisclosureService {
    /// Create a new disclosure service.
    pub fn new() -> Self {
        Self
    }

    /// Reveal the original author and content behind `id`.
    ///
    /// The capability check runs first: without it the refusal is a
    /// generic [`RelayError::Unauthorized`], leaking nothing about
    /// whether the id exists. A failed permission lookup denies by
    /// default.
    ///
    /// # Errors
    /// * [`RelayError::Unauthorized`] - requester lacks the capability
    /// * [`RelayError::NotFound`] - no entry recorded under `id`
    /// * [`RelayError::IdentityResolution`] - entry exists but the
    ///   identity backend could not resolve its author
    pub async fn reveal<E>(
        &self,
        effects: &E,
        ledger: &LedgerStore,
        requester: &AuthorRef,
        id: MessageId,
    ) -> Result<Disclosure, RelayError>
    where
        E: PermissionEffects + IdentityEffects,
    {
        let allowed = effects.can_reveal(requester).await.unwrap_or_else(|err| {
            warn!(%err, "permission check failed, denying disclosure");
            false
        });
        if !allowed {
            return Err(RelayError::Unauthorized);
        }

        let entry = ledger.get(id).ok_or(RelayError::NotFound(id))?;
        let identity = effects
            .resolve(&entry.author)
            .await
            .map_err(|err| RelayError::IdentityResolution {
                id,
                reason: err.to_string(),
            })?;

        info!(%id, requester = %requester, "disclosure granted");
        Ok(Disclosure {
            id,
            identity,
            content: entry.content.clone(),
            timestamp: entry.timestamp,
        })
    }
}
