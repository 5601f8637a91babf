//! # Sotto Core - anonymous message relay with a disclosure ledger
//!
//! Members of a chat community submit drafts through a single public
//! entry point; the relay republishes each draft anonymously under a
//! sequential number and records the original author in a durable
//! ledger so a moderator can later disclose who wrote a given number.
//!
//! ## Components
//!
//! - [`ledger::LedgerStore`] - durable id -> {content, timestamp, author}
//!   mapping and the monotonic id counter
//! - [`service::RelayService`] - the submission pipeline and the event
//!   dispatcher
//! - [`entry_point::EntryPointManager`] - keeps exactly one live
//!   "submit" invitation in the public channel
//! - [`disclosure::DisclosureService`] - authorization-gated
//!   de-anonymization lookups
//!
//! External collaborators (the chat platform gateway, the anonymous
//! webhook, the permission system, identity lookups) are consumed
//! through the traits in [`effects`]; the embedding host implements
//! them and feeds [`events::RelayEvent`]s into the dispatcher.
//!
//! ## Error propagation
//!
//! Every user-triggered failure ends as a private, non-destructive
//! reply to that user. Only missing configuration (and a gateway
//! connection error that indicates misconfigured capabilities) should
//! terminate the process. A persistence failure after a successful
//! publish is the one case where a public side effect outlives a local
//! failure; it is kept distinct as [`error::RelayError::Persistence`].
//!
//! ## Concurrency
//!
//! [`service::RelayService::submit`] takes `&mut self`: id uniqueness
//! and monotonicity rely on exclusive access. Hosts whose event
//! handlers can overlap must serialize submissions, e.g. by wrapping
//! the service in a `tokio::sync::Mutex`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod disclosure;
pub mod effects;
pub mod entry_point;
pub mod error;
pub mod events;
pub mod ledger;
pub mod sanitize;
pub mod service;
pub mod types;

pub use config::RelayConfig;
pub use disclosure::DisclosureService;
pub use entry_point::{EntryPointManager, INVITATION_SCAN_WINDOW};
pub use error::{ConfigError, ConnectionError, DraftError, LedgerError, RelayError};
pub use events::{EventOutcome, RelayEvent};
pub use ledger::{LedgerEntry, LedgerState, LedgerStore};
pub use service::RelayService;
pub use types::{
    AnonymousPost, AuthorRef, Disclosure, InvitationRef, MessageId, ResolvedIdentity,
};
