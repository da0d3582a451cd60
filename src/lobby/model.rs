use tokio::sync::mpsc;

use crate::api::model::ServerEvent;
use crate::game::model::GridPos;

// A logged-in identity and the transport handle updates are pushed through.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub username: String,
    pub handle: mpsc::Sender<ServerEvent>,
}

#[derive(Debug)]
pub enum LobbyMessage {
    Login {
        username: String,
        handle: mpsc::Sender<ServerEvent>,
    },
    Search {
        username: String,
    },
    Build {
        username: String,
        building: String,
        pos: GridPos,
    },
    Shutdown,
}
