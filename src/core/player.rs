//! Participant identification and per-participant storage.
//!
//! ## PlayerId
//!
//! One byte on the wire, so a match holds at most 255 participants.
//!
//! ## PlayerMap
//!
//! Fixed-size per-participant slots backed by a `Vec`. Ids that arrive from
//! the network are checked with `get` / `get_mut`; local code that already
//! knows the id is in range can index directly.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` participants.
    ///
    /// ```
    /// use duel_deck::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(255) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One slot per participant.
///
/// ```
/// use duel_deck::core::{PlayerId, PlayerMap};
///
/// let mut ready: PlayerMap<bool> = PlayerMap::with_value(2, false);
/// ready[PlayerId::new(1)] = true;
///
/// assert!(ready[PlayerId::new(1)]);
/// assert!(ready.get(PlayerId::new(7)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    slots: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            slots: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Create a map with every slot set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.slots.len()
    }

    /// Check whether `player` has a slot in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.slots.len()
    }

    /// Slot for `player`, `None` if the id is out of range.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.slots.get(player.index())
    }

    /// Mutable slot for `player`, `None` if the id is out of range.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.slots.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over slot values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Overwrite every slot using `factory`.
    pub fn reset_with(&mut self, factory: impl Fn(PlayerId) -> T) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = factory(PlayerId(i as u8));
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.slots[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.slots[player.index()]
    }
}
