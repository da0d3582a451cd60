pub mod matchmaker;
pub mod model;
pub mod registry;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::model::ServerEvent;
use crate::game::error::Error;
use crate::game::model::{GridPos, SessionCommand};
use crate::game::session::Session;
use crate::lobby::matchmaker::Matchmaker;
use crate::lobby::model::{ClientRecord, LobbyMessage};
use crate::lobby::registry::{ClientList, SessionList};

// The lobby actor: a single task owning the client registry, the
// matchmaking queue and the session registry. Every mutation runs to
// completion inside one message handler.
pub struct Lobby {
    sender: mpsc::Sender<LobbyMessage>,
    receiver: Option<mpsc::Receiver<LobbyMessage>>,
    task_handle: Option<JoinHandle<()>>,
}

impl Lobby {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(100);
        Self {
            sender,
            receiver: Some(receiver),
            task_handle: None,
        }
    }

    pub fn sender(&self) -> mpsc::Sender<LobbyMessage> {
        self.sender.clone()
    }

    pub fn start(&mut self) {
        let Some(mut receiver) = self.receiver.take() else {
            tracing::warn!("Lobby already started");
            return;
        };

        self.task_handle = Some(tokio::spawn(async move {
            let mut state = LobbyState::new();
            while let Some(message) = receiver.recv().await {
                if matches!(message, LobbyMessage::Shutdown) {
                    break;
                }
                if let Err(e) = state.handle_message(message).await {
                    tracing::warn!("Dropped lobby request: {}", e);
                }
            }
            tracing::info!("Lobby stopped");
        }));
    }

    pub async fn stop(&mut self) {
        let _ = self.sender.send(LobbyMessage::Shutdown).await;
        if let Some(task_handle) = self.task_handle.take() {
            if let Err(e) = task_handle.await {
                tracing::warn!("Lobby task ended with error: {:?}", e);
            }
        }
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LobbyState {
    clients: ClientList,
    matchmaker: Matchmaker,
    sessions: SessionList,
}

impl LobbyState {
    pub fn new() -> Self {
        Self {
            clients: ClientList::new(),
            matchmaker: Matchmaker::new(),
            sessions: SessionList::new(),
        }
    }

    pub async fn handle_message(&mut self, message: LobbyMessage) -> Result<(), Error> {
        match message {
            LobbyMessage::Login { username, handle } => {
                self.login(username, handle).await;
                Ok(())
            }
            LobbyMessage::Search { username } => self.search(&username).await,
            LobbyMessage::Build {
                username,
                building,
                pos,
            } => self.route_build(username, building, pos).await,
            LobbyMessage::Shutdown => Ok(()),
        }
    }

    async fn login(&mut self, username: String, handle: mpsc::Sender<ServerEvent>) {
        tracing::info!("Client logged in: {}", username);
        let client = ClientRecord { username, handle };
        let reply = client.handle.clone();
        self.clients.add(client);
        self.clients.log_clients();

        if reply.send(ServerEvent::LoginApproved).await.is_err() {
            tracing::debug!("Client went away before the login reply");
        }
    }

    async fn search(&mut self, username: &str) -> Result<(), Error> {
        let client = self
            .clients
            .get_by_name(username)
            .cloned()
            .ok_or_else(|| Error::UnknownClient(username.to_string()))?;

        tracing::info!("{} is searching for a match", username);

        if let Some((first, second)) = self.matchmaker.enqueue(client) {
            let id = self.sessions.next_id();
            tracing::info!(
                "Matched {} with {} in session {}",
                first.username,
                second.username,
                id
            );

            let notify = [first.handle.clone(), second.handle.clone()];
            self.sessions.add(Session::spawn(id, (first, second)));

            for handle in notify {
                if handle.send(ServerEvent::MatchFound).await.is_err() {
                    tracing::debug!("Matched client went away before the notification");
                }
            }
        }

        Ok(())
    }

    async fn route_build(
        &mut self,
        username: String,
        building: String,
        pos: GridPos,
    ) -> Result<(), Error> {
        let session = self
            .sessions
            .get_by_player(&username)
            .ok_or_else(|| Error::NoActiveSession(username.clone()))?;

        let command = SessionCommand::Build {
            username,
            building,
            pos,
        };
        if session.commands().send(command).await.is_err() {
            tracing::warn!("Session {} no longer accepts commands", session.id());
        }
        Ok(())
    }
}

impl Default for LobbyState {
    fn default() -> Self {
        Self::new()
    }
}
