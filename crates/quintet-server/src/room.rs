//! Match room management.
//!
//! A room holds exactly two seats. The creator takes X, the joiner takes O,
//! and the match starts the moment the second seat fills. The room owns the
//! authoritative [`Match`]; clients only ever see snapshots of it.

use quintet_core::{Match, MatchAction, MatchError, MatchEvent, MatchSnapshot, Symbol};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::protocol::{PlayerInfo, RoomInfo, RoomStatus};

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room is full")]
    RoomFull,

    #[error("Player not in room")]
    PlayerNotInRoom,

    #[error("Match not started")]
    MatchNotStarted,

    #[error(transparent)]
    Rule(#[from] MatchError),
}

/// A player occupying one of the two seats.
#[derive(Debug, Clone)]
pub struct RoomPlayer {
    pub id: Uuid,
    pub name: String,
    pub symbol: Symbol,
    pub connected: bool,
}

impl RoomPlayer {
    pub fn new(id: Uuid, name: String, symbol: Symbol) -> Self {
        Self {
            id,
            name,
            symbol,
            connected: true,
        }
    }

    pub fn to_info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            name: self.name.clone(),
            symbol: self.symbol,
            connected: self.connected,
        }
    }
}

/// A two-seat match room.
pub struct GameRoom {
    pub id: Uuid,
    pub name: String,
    pub host_id: Uuid,
    pub status: RoomStatus,
    pub players: HashMap<Uuid, RoomPlayer>,
    /// Seating order: creator first (X), joiner second (O)
    pub player_order: Vec<Uuid>,
    /// The authoritative match (once both seats are filled)
    pub match_state: Option<Match>,
}

impl GameRoom {
    pub fn new(id: Uuid, host_id: Uuid, host_name: String) -> Self {
        let mut players = HashMap::new();
        players.insert(
            host_id,
            RoomPlayer::new(host_id, host_name.clone(), Symbol::X),
        );

        Self {
            id,
            name: format!("{}'s Match", host_name),
            host_id,
            status: RoomStatus::Waiting,
            players,
            player_order: vec![host_id],
            match_state: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    /// Seat the joiner as O and start the match.
    pub fn add_player(&mut self, player_id: Uuid, name: String) -> Result<(), RoomError> {
        if self.is_full() || self.status != RoomStatus::Waiting {
            return Err(RoomError::RoomFull);
        }

        self.players
            .insert(player_id, RoomPlayer::new(player_id, name, Symbol::O));
        self.player_order.push(player_id);

        self.match_state = Some(Match::new());
        self.status = RoomStatus::InGame;
        Ok(())
    }

    pub fn remove_player(&mut self, player_id: Uuid) -> Result<bool, RoomError> {
        if !self.players.contains_key(&player_id) {
            return Err(RoomError::PlayerNotInRoom);
        }

        self.players.remove(&player_id);
        self.player_order.retain(|&id| id != player_id);

        // If host left, the remaining player becomes host
        if player_id == self.host_id && !self.player_order.is_empty() {
            self.host_id = self.player_order[0];
        }

        // Return true if room is now empty
        Ok(self.players.is_empty())
    }

    pub fn set_player_connected(&mut self, player_id: Uuid, connected: bool) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.connected = connected;
        }
    }

    /// The seat symbol of a connection, if it holds one.
    pub fn symbol_of(&self, player_id: Uuid) -> Option<Symbol> {
        self.players.get(&player_id).map(|p| p.symbol)
    }

    /// Apply an intent on behalf of a connection. The engine enforces turn
    /// order and phase; the room only maps the connection to its seat.
    pub fn apply_intent(
        &mut self,
        player_id: Uuid,
        action: MatchAction,
    ) -> Result<Vec<MatchEvent>, RoomError> {
        let symbol = self
            .players
            .get(&player_id)
            .map(|p| p.symbol)
            .ok_or(RoomError::PlayerNotInRoom)?;

        let m = self.match_state.as_mut().ok_or(RoomError::MatchNotStarted)?;
        let events = m.apply(symbol, action)?;

        if m.is_over() {
            self.status = RoomStatus::Finished;
        }

        Ok(events)
    }

    /// Discard the current match and start a fresh one.
    pub fn reset_match(&mut self, player_id: Uuid) -> Result<MatchSnapshot, RoomError> {
        if !self.players.contains_key(&player_id) {
            return Err(RoomError::PlayerNotInRoom);
        }
        let m = self.match_state.as_mut().ok_or(RoomError::MatchNotStarted)?;
        let snapshot = m.reset();
        self.status = RoomStatus::InGame;
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        self.match_state.as_ref().map(|m| m.snapshot())
    }

    pub fn current_symbol(&self) -> Option<Symbol> {
        self.match_state.as_ref().map(|m| m.current_player())
    }

    pub fn winner(&self) -> Option<Symbol> {
        self.match_state.as_ref().and_then(|m| m.winner())
    }

    pub fn to_info(&self) -> RoomInfo {
        RoomInfo {
            id: self.id,
            name: self.name.clone(),
            players: self
                .player_order
                .iter()
                .filter_map(|id| self.players.get(id).map(|p| p.to_info()))
                .collect(),
            host_id: self.host_id,
            status: self.status,
        }
    }
}
