use serde::{Deserialize, Serialize};

use crate::game::model::{GridPos, TownState};

// Inbound protocol events, one JSON text frame each:
// {"event": "build", "data": {"building": "house", "pos": {"x": 0, "y": 1}}}
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Login { username: String },
    MatchSearch { username: String },
    Build { building: String, pos: GridPos },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    LoginApproved,
    MatchFound,
    UpdateGame(TownState),
}
