//! Keeps at most one live submission invitation in the public channel.

use tracing::{debug, warn};

use crate::effects::{ChannelEffects, ChannelError};

/// Most-recent message window scanned for stale invitations.
///
/// The scan is a best-effort cleanup bound, not a correctness
/// guarantee; anything older self-heals on a later refresh.
pub const INVITATION_SCAN_WINDOW: usize = 100;

/// Replaces stale invitations after each submission and at startup.
///
/// Idempotent in effect though not in side effects: every call performs
/// real deletes and one create. If two refreshes race, duplicate
/// invitations may transiently appear and are cleaned up next time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryPointManager;

impl EntryPointManager {
    /// Create a new entry-point manager.
    pub fn new() -> Self {
        Self
    }

    /// Remove every stale invitation found in the scan window, then
    /// post exactly one fresh invitation.
    ///
    /// A delete failure for one invitation is logged and does not abort
    /// the removal of the others.
    pub async fn refresh<E>(&self, effects: &E) -> Result<(), ChannelError>
    where
        E: ChannelEffects,
    {
        let stale = effects.live_invitations(INVITATION_SCAN_WINDOW).await?;
        for invitation in &stale {
            if let Err(err) = effects.delete_invitation(invitation).await {
                warn!(%invitation, %err, "failed to delete a stale invitation");
            }
        }
        let fresh = effects.post_invitation().await?;
        debug!(stale = stale.len(), invitation = %fresh, "entry point refreshed");
        Ok(())
    }
}
