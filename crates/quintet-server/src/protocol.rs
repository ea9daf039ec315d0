//! WebSocket protocol messages for Quintet multiplayer.

use quintet_core::{MatchEvent, MatchSnapshot, Scores, Symbol};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Create a new match room; the creator takes X
    CreateRoom { player_name: String },

    /// Join an existing room as O; the match starts immediately
    JoinRoom { room_id: Uuid, player_name: String },

    /// Leave current room
    LeaveRoom,

    /// Place a symbol at (row, col)
    SubmitMove { row: usize, col: usize },

    /// Erase an opposing piece at (row, col) during the removal phase
    SubmitRemoval { row: usize, col: usize },

    /// Discard the current match and start over
    RequestReset,

    /// Send chat message
    Chat { message: String },

    /// Request room list
    ListRooms,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned player ID
    Welcome { player_id: Uuid },

    /// Room created successfully
    RoomCreated { room_id: Uuid },

    /// Joined room successfully
    JoinedRoom { room: RoomInfo },

    /// Left room successfully
    LeftRoom,

    /// Room state updated (player joined/left)
    RoomUpdated { room: RoomInfo },

    /// Both seats are filled and the match began
    MatchStarted { snapshot: MatchSnapshot },

    /// Authoritative snapshot after an accepted intent
    MatchState { snapshot: MatchSnapshot },

    /// Result of the sender's own intent
    IntentResult {
        success: bool,
        events: Vec<MatchEvent>,
        error: Option<String>,
    },

    /// Current player changed
    TurnChanged { symbol: Symbol },

    /// The match was discarded and rebuilt from scratch
    MatchReset { snapshot: MatchSnapshot },

    /// Chat message received
    ChatMessage { player_name: String, message: String },

    /// List of available rooms
    RoomList { rooms: Vec<RoomInfo> },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,

    /// A player reached the winning score
    GameOver { winner: Symbol, scores: Scores },
}

/// Room information for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<PlayerInfo>,
    pub host_id: Uuid,
    pub status: RoomStatus,
}

/// Player information in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub name: String,
    pub symbol: Symbol,
    pub connected: bool,
}

/// Room status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Waiting,
    InGame,
    Finished,
}
