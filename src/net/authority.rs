//! Host side of deck submission.
//!
//! The host re-validates every submitted deck from scratch against its own
//! rules and catalog. Accepted decks are kept per player for the match
//! orchestrator to pick up; verdicts go out as ordinary messages. The latest
//! verdict wins: a rejected resubmission drops the player's accepted deck.

use crate::cards::{CatalogProvider, CostModel};
use crate::core::{DeckRules, PlayerId, PlayerMap};
use crate::deck::{check, Deck};
use crate::error::CodecResult;

use super::log::ProtocolLog;
use super::message::{Envelope, Message, Outbox};

/// The authoritative party in a match.
#[derive(Clone, Debug)]
pub struct Authority {
    rules: DeckRules,
    accepted: PlayerMap<Option<Deck>>,
    log: ProtocolLog,
}

impl Authority {
    /// Host a match for `player_count` participants (1..=255).
    #[must_use]
    pub fn new(player_count: usize, rules: DeckRules) -> Self {
        Self {
            rules,
            accepted: PlayerMap::with_default(player_count),
            log: ProtocolLog::default(),
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: ProtocolLog) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.accepted.player_count()
    }

    #[must_use]
    pub fn log(&self) -> &ProtocolLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ProtocolLog {
        &mut self.log
    }

    /// Broadcast of the rules every submission is checked against.
    pub fn rules_sync(&self) -> CodecResult<Envelope> {
        Ok(Envelope::broadcast(Message::rules_sync(&self.rules)?))
    }

    /// Decode and handle bytes from `from`. Malformed payloads are logged
    /// and dropped without a reply.
    pub fn handle(&mut self, from: PlayerId, bytes: &[u8], catalog: &dyn CatalogProvider) -> Outbox {
        match Message::decode(bytes) {
            Ok(message) => self.handle_message(from, message, catalog),
            Err(err) => {
                self.log
                    .warn("codec", format!("dropped message from {from}: {err}"));
                Outbox::new()
            }
        }
    }

    pub fn handle_message(
        &mut self,
        from: PlayerId,
        message: Message,
        catalog: &dyn CatalogProvider,
    ) -> Outbox {
        if !self.accepted.contains(from) {
            self.log
                .warn("submission", format!("message from unknown {from} dropped"));
            return Outbox::new();
        }

        match message {
            Message::SubmitDeck { deck } => match Deck::decode(&deck) {
                Ok(deck) => self.judge(from, deck, catalog),
                Err(err) => {
                    self.log
                        .warn("codec", format!("dropped deck from {from}: {err}"));
                    Outbox::new()
                }
            },
            other => {
                self.log.debug(
                    "submission",
                    format!("ignoring {} from {from}", other.name()),
                );
                Outbox::new()
            }
        }
    }

    /// Submission from the host's own participant. The deck is snapshotted
    /// and judged exactly as a remote one would be.
    pub fn submit_local(
        &mut self,
        player: PlayerId,
        deck: &Deck,
        catalog: &dyn CatalogProvider,
    ) -> Outbox {
        if !self.accepted.contains(player) {
            self.log
                .warn("submission", format!("local submission for unknown {player}"));
            return Outbox::new();
        }
        self.judge(player, deck.snapshot(), catalog)
    }

    /// Last deck accepted for `player`.
    #[must_use]
    pub fn accepted_deck(&self, player: PlayerId) -> Option<&Deck> {
        self.accepted.get(player).and_then(Option::as_ref)
    }

    /// Whether every participant has an accepted deck.
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.accepted.values().all(Option::is_some)
    }

    /// Forget accepted decks for a new lobby cycle.
    pub fn reset(&mut self) {
        self.accepted.reset_with(|_| None);
    }

    fn judge(&mut self, player: PlayerId, deck: Deck, catalog: &dyn CatalogProvider) -> Outbox {
        let model = CostModel::new(&self.rules, catalog);
        let mut outbox = Outbox::new();

        match check(&deck, &model) {
            Ok(()) => {
                self.log.info(
                    "submission",
                    format!("accepted {} cards from {player}", deck.len()),
                );
                self.accepted[player] = Some(deck);
                outbox.push(Envelope::broadcast(Message::DeckApproved { player }));
            }
            Err(rejection) => {
                let reason = rejection.to_string();
                self.log
                    .info("submission", format!("rejected {player}: {reason}"));
                let was_ready = self.accepted[player].take().is_some();
                outbox.push(Envelope::to_player(
                    player,
                    Message::DeckRejected { player, reason },
                ));
                if was_ready {
                    self.log
                        .info("submission", format!("{player} is no longer ready"));
                    outbox.push(Envelope::broadcast(Message::ReadyWithdrawn { player }));
                }
            }
        }
        outbox
    }
}
