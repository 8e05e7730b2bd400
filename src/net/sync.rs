//! Host → all match state broadcasts.
//!
//! Every broadcast is a full snapshot. Receivers overwrite; nothing merges.

use crate::cards::CardIdentity;
use crate::codec::MAX_ARRAY_LEN;
use crate::core::PlayerId;
use crate::error::{CodecError, CodecResult};

use super::message::{Envelope, MatchState, Message};

/// Host-side producer of sync broadcasts.
///
/// Match state is re-broadcast when the phase or round changes, or when the
/// timer crosses into a different whole second. [`MatchSync::every_tick`]
/// drops the whole-second throttle.
#[derive(Clone, Debug)]
pub struct MatchSync {
    last_sent: Option<MatchState>,
    whole_seconds: bool,
}

impl Default for MatchSync {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSync {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_sent: None,
            whole_seconds: true,
        }
    }

    /// Broadcast on any timer change, not just whole seconds.
    #[must_use]
    pub fn every_tick() -> Self {
        Self {
            last_sent: None,
            whole_seconds: false,
        }
    }

    /// Broadcast for `state` if it differs visibly from the last one sent.
    ///
    /// With the default throttle, receivers see the timer at whole-second
    /// resolution only; sub-second changes within the same displayed second
    /// produce nothing. Use [`MatchSync::force`] to resend regardless.
    pub fn update(&mut self, state: MatchState) -> Option<Envelope> {
        let changed = match self.last_sent {
            None => true,
            Some(last) => {
                last.phase != state.phase
                    || last.round != state.round
                    || self.timer_changed(last.time_remaining, state.time_remaining)
            }
        };
        changed.then(|| self.force(state))
    }

    /// Broadcast `state` unconditionally (e.g. for a participant who just
    /// connected).
    pub fn force(&mut self, state: MatchState) -> Envelope {
        self.last_sent = Some(state);
        Envelope::broadcast(Message::MatchState(state))
    }

    fn timer_changed(&self, last: f32, now: f32) -> bool {
        if self.whole_seconds {
            displayed_seconds(last) != displayed_seconds(now)
        } else {
            last.to_bits() != now.to_bits()
        }
    }

    #[must_use]
    pub fn last_sent(&self) -> Option<MatchState> {
        self.last_sent
    }

    pub fn scores(&self, scores: &[i32]) -> CodecResult<Envelope> {
        check_len(scores)?;
        Ok(Envelope::broadcast(Message::Scores(scores.to_vec())))
    }

    pub fn stocks(&self, stocks: &[i32]) -> CodecResult<Envelope> {
        check_len(stocks)?;
        Ok(Envelope::broadcast(Message::Stocks(stocks.to_vec())))
    }

    #[must_use]
    pub fn card_dealt(&self, player: PlayerId, card: CardIdentity) -> Envelope {
        Envelope::broadcast(Message::CardDealt { player, card })
    }
}

fn displayed_seconds(time: f32) -> i32 {
    time.max(0.0).ceil() as i32
}

fn check_len(values: &[i32]) -> CodecResult<()> {
    if values.len() > MAX_ARRAY_LEN {
        return Err(CodecError::ArrayTooLong(values.len()));
    }
    Ok(())
}

/// Receiver-side copy of the last broadcast state, read by presentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncView {
    pub state: MatchState,
    pub scores: Vec<i32>,
    pub stocks: Vec<i32>,
    /// Most recent card-dealt notice, for transient feedback.
    pub last_dealt: Option<(PlayerId, CardIdentity)>,
}

impl SyncView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a sync message. Returns false for anything that isn't one.
    pub fn apply(&mut self, message: &Message) -> bool {
        match message {
            Message::MatchState(state) => self.state = *state,
            Message::Scores(scores) => self.scores.clone_from(scores),
            Message::Stocks(stocks) => self.stocks.clone_from(stocks),
            Message::CardDealt { player, card } => self.last_dealt = Some((*player, card.clone())),
            _ => return false,
        }
        true
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<i32> {
        self.scores.get(player.index()).copied()
    }

    #[must_use]
    pub fn stock(&self, player: PlayerId) -> Option<i32> {
        self.stocks.get(player.index()).copied()
    }
}
