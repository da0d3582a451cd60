use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval_at};

use crate::api::model::ServerEvent;
use crate::blueprint::catalog;
use crate::game::model::{GridPos, SessionCommand};
use crate::game::town::Town;
use crate::lobby::model::ClientRecord;

pub const TICK_MILLIS: u64 = 100;

struct Player {
    username: String,
    handle: mpsc::Sender<ServerEvent>,
    town: Town,
}

impl Player {
    fn new(client: ClientRecord) -> Self {
        Self {
            username: client.username,
            handle: client.handle,
            town: Town::new(),
        }
    }
}

// A running match between two players. The spawned task is the sole owner
// of both towns; ticks and build commands run to completion one at a time.
pub struct Session {
    id: u64,
    players: [Player; 2],
}

#[derive(Debug)]
pub struct SessionHandle {
    id: u64,
    players: [String; 2],
    commands: mpsc::Sender<SessionCommand>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn players(&self) -> &[String; 2] {
        &self.players
    }

    pub fn has_player(&self, username: &str) -> bool {
        self.players.iter().any(|player| player == username)
    }

    pub fn commands(&self) -> mpsc::Sender<SessionCommand> {
        self.commands.clone()
    }

    // Lifecycle hook; the lobby never retires a session on its own.
    pub async fn shutdown(self) {
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        if let Err(e) = self.task.await {
            tracing::warn!("Session {} task ended with error: {:?}", self.id, e);
        }
    }
}

impl Session {
    pub fn spawn(id: u64, clients: (ClientRecord, ClientRecord)) -> SessionHandle {
        let usernames = [clients.0.username.clone(), clients.1.username.clone()];
        let session = Session {
            id,
            players: [Player::new(clients.0), Player::new(clients.1)],
        };
        let (commands, receiver) = mpsc::channel(100);
        let task = tokio::spawn(session.run(receiver));

        SessionHandle {
            id,
            players: usernames,
            commands,
            task,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        tracing::info!(
            "Session {} started with {} and {}",
            self.id,
            self.players[0].username,
            self.players[1].username
        );

        let period = Duration::from_millis(TICK_MILLIS);
        let mut ticker = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(TICK_MILLIS),
                command = commands.recv() => match command {
                    Some(SessionCommand::Build { username, building, pos }) => {
                        self.handle_build(&username, &building, pos);
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                },
            }
        }

        tracing::info!("Session {} stopped", self.id);
    }

    fn tick(&mut self, elapsed: u64) {
        for player in &mut self.players {
            player.town.advance(elapsed);
            let state = player.town.snapshot();
            // Fire and forget; a slow or vanished client never stalls the tick.
            if let Err(e) = player.handle.try_send(ServerEvent::UpdateGame(state)) {
                tracing::debug!("Dropping update for {}: {}", player.username, e);
            }
        }
    }

    fn handle_build(&mut self, username: &str, building: &str, pos: GridPos) {
        let Some(player) = self
            .players
            .iter_mut()
            .find(|player| player.username == username)
        else {
            tracing::warn!(
                "Build request from {} who is not in session {}",
                username,
                self.id
            );
            return;
        };

        let plan = match catalog::lookup(building) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("Ignoring build request from {}: {}", username, e);
                return;
            }
        };

        if player.town.can_build(plan, pos) {
            player.town.build(plan, pos);
            tracing::info!("{} built {} at ({}, {})", username, building, pos.x, pos.y);
        } else {
            tracing::debug!(
                "Rejected {} for {} at ({}, {})",
                building,
                username,
                pos.x,
                pos.y
            );
        }
    }
}
