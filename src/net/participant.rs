//! Participant side of deck submission.

use rustc_hash::FxHashSet;

use crate::cards::CostModel;
use crate::core::{DeckRules, PlayerId};
use crate::deck::{validate, Deck};
use crate::error::SubmitError;

use super::log::ProtocolLog;
use super::message::{Envelope, Message};
use super::sync::SyncView;

/// Where this participant's deck stands with the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Editing,
    /// Sent, no verdict yet.
    Submitted,
    /// Terminal until [`Participant::reset`].
    Approved,
    /// The host's reason, verbatim. The deck may be edited and resubmitted.
    Rejected { reason: String },
}

/// One participant's view of the submission protocol.
#[derive(Clone, Debug)]
pub struct Participant {
    player: PlayerId,
    state: SubmissionState,
    ready: FxHashSet<PlayerId>,
    rules: Option<DeckRules>,
    sync: SyncView,
    log: ProtocolLog,
}

impl Participant {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            state: SubmissionState::default(),
            ready: FxHashSet::default(),
            rules: None,
            sync: SyncView::new(),
            log: ProtocolLog::default(),
        }
    }

    /// Replace the event log, e.g. with [`ProtocolLog::capturing`].
    #[must_use]
    pub fn with_log(mut self, log: ProtocolLog) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Editing, or rejected and free to try again.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Editing | SubmissionState::Rejected { .. }
        )
    }

    /// Rules received from the host, if any have arrived.
    #[must_use]
    pub fn rules(&self) -> Option<&DeckRules> {
        self.rules.as_ref()
    }

    /// Other players whose decks the host has approved.
    pub fn ready_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ready.iter().copied()
    }

    #[must_use]
    pub fn is_ready(&self, player: PlayerId) -> bool {
        self.ready.contains(&player)
    }

    #[must_use]
    pub fn sync(&self) -> &SyncView {
        &self.sync
    }

    #[must_use]
    pub fn log(&self) -> &ProtocolLog {
        &self.log
    }

    /// Check `deck` locally and produce the submission for the host.
    ///
    /// The payload is an encoded snapshot, so later edits to `deck` never
    /// reach the host. A deck that fails local validation is not sent.
    pub fn submit(&mut self, deck: &Deck, model: &CostModel<'_>) -> Result<Envelope, SubmitError> {
        match self.state {
            SubmissionState::Approved => return Err(SubmitError::AlreadyApproved),
            SubmissionState::Submitted => return Err(SubmitError::AwaitingVerdict),
            _ => {}
        }

        let local = validate(deck, model);
        if !local.is_valid {
            self.log
                .debug("submission", format!("not sent: {}", local.reason));
            return Err(SubmitError::Invalid(local.reason));
        }

        self.state = SubmissionState::Submitted;
        self.log.info(
            "submission",
            format!("{} sent {} cards", self.player, deck.len()),
        );
        Ok(Envelope::to_authority(Message::submit(deck)))
    }

    /// Decode and apply one incoming message. Malformed bytes are logged
    /// and dropped.
    pub fn handle(&mut self, bytes: &[u8]) {
        match Message::decode(bytes) {
            Ok(message) => self.handle_message(&message),
            Err(err) => self.log.warn("codec", format!("dropped message: {err}")),
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::DeckRejected { player, reason } => {
                if *player != self.player {
                    self.log
                        .debug("submission", format!("ignoring rejection for {player}"));
                    return;
                }
                self.log.info("submission", format!("rejected: {reason}"));
                self.state = SubmissionState::Rejected {
                    reason: reason.clone(),
                };
            }
            Message::DeckApproved { player } => {
                if *player == self.player {
                    self.log.info("submission", "approved, waiting for opponents");
                    self.state = SubmissionState::Approved;
                } else {
                    self.log.debug("submission", format!("{player} is ready"));
                    self.ready.insert(*player);
                }
            }
            Message::ReadyWithdrawn { player } => {
                if self.ready.remove(player) {
                    self.log
                        .debug("submission", format!("{player} is no longer ready"));
                }
            }
            Message::RulesSync { rules } => match DeckRules::from_bytes(rules) {
                Ok(rules) => self.rules = Some(rules),
                Err(err) => self.log.warn("codec", format!("dropped rules: {err}")),
            },
            Message::SubmitDeck { .. } => {
                self.log.debug("submission", "ignoring SubmitDeck addressed to a participant");
            }
            sync => {
                self.sync.apply(sync);
            }
        }
    }

    /// Start a new lobby cycle. Received rules are kept.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Editing;
        self.ready.clear();
        self.sync = SyncView::new();
    }
}
