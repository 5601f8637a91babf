//! The closed set of host-delivered interaction events and their
//! outcomes.
//!
//! The embedding host translates platform interactions into
//! [`RelayEvent`]s, feeds them to the dispatcher, and performs the
//! returned [`EventOutcome`] (opening the form or delivering a private
//! reply).

use serde::{Deserialize, Serialize};

use crate::types::AuthorRef;

/// One interaction event forwarded by the embedding host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEvent {
    /// A user activated the public entry point.
    EntryTriggered {
        /// Who triggered it.
        user: AuthorRef,
    },
    /// A user submitted the draft form.
    FormSubmitted {
        /// Who submitted.
        user: AuthorRef,
        /// Raw draft text, unvalidated.
        draft: String,
    },
    /// A user invoked a named command.
    CommandInvoked {
        /// Command name.
        name: String,
        /// Who invoked it.
        invoker: AuthorRef,
        /// Positional arguments.
        args: Vec<String>,
    },
}

/// What the host should do in response to a dispatched event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventOutcome {
    /// Open the submission form for the user.
    OpenForm {
        /// Who the form is for.
        user: AuthorRef,
    },
    /// Deliver a private, ephemeral reply to the user.
    Reply {
        /// Recipient.
        user: AuthorRef,
        /// Reply text.
        text: String,
    },
    /// Nothing to do; the event was not addressed to the relay.
    Ignored,
}
