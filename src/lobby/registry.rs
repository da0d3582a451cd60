use crate::game::session::SessionHandle;
use crate::lobby::model::ClientRecord;

// Append-only: clients are never removed, even on disconnect. Repeated
// registrations of the same name are kept; lookups return the earliest.
#[derive(Debug, Default)]
pub struct ClientList {
    clients: Vec<ClientRecord>,
}

impl ClientList {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    pub fn add(&mut self, client: ClientRecord) {
        self.clients.push(client);
    }

    pub fn get_by_name(&self, username: &str) -> Option<&ClientRecord> {
        self.clients
            .iter()
            .find(|client| client.username == username)
    }

    pub fn log_clients(&self) {
        for client in &self.clients {
            tracing::debug!("registered client: {}", client.username);
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[derive(Debug)]
pub struct SessionList {
    sessions: Vec<SessionHandle>,
    next_id: u64,
}

impl SessionList {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add(&mut self, session: SessionHandle) {
        self.sessions.push(session);
    }

    pub fn remove_by_id(&mut self, id: u64) -> Option<SessionHandle> {
        let index = self.sessions.iter().position(|session| session.id() == id)?;
        Some(self.sessions.remove(index))
    }

    pub fn get_by_id(&self, id: u64) -> Option<&SessionHandle> {
        self.sessions.iter().find(|session| session.id() == id)
    }

    pub fn get_by_player(&self, username: &str) -> Option<&SessionHandle> {
        self.sessions
            .iter()
            .find(|session| session.has_player(username))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionList {
    fn default() -> Self {
        Self::new()
    }
}
