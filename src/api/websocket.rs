use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use crate::api::model::{ClientEvent, ServerEvent};
use crate::lobby::model::LobbyMessage;

pub async fn accept_connection(stream: TcpStream, lobby: mpsc::Sender<LobbyMessage>) {
    let addr = stream
        .peer_addr()
        .expect("connected streams should have a peer address");
    let conn_id = Uuid::new_v4();

    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!("WebSocket handshake failed for address {}: {}", addr, e);
            return;
        }
    };

    tracing::debug!("Accepted connection {} from {}", conn_id, addr);

    let (mut write, mut read) = ws_stream.split();
    let (event_tx, mut event_rx) = mpsc::channel::<ServerEvent>(100);

    let writer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!("Failed to encode event: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(payload.into())).await {
                tracing::debug!("Write side for {} closed: {}", conn_id, e);
                break;
            }
        }
    });

    // Set by the first login; search and build are refused until then.
    let mut username: Option<String> = None;

    while let Some(message) = read.next().await {
        match message {
            Ok(msg) => {
                if !msg.is_text() {
                    continue;
                }
                let event = match serde_json::from_str::<ClientEvent>(&msg.to_string()) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!("Failed to parse message from {}: {}", conn_id, e);
                        continue;
                    }
                };

                let request = match event {
                    ClientEvent::Login { username: name } => {
                        username = Some(name.clone());
                        LobbyMessage::Login {
                            username: name,
                            handle: event_tx.clone(),
                        }
                    }
                    ClientEvent::MatchSearch { .. } => {
                        let Some(name) = username.clone() else {
                            tracing::warn!("match_search from {} before login", conn_id);
                            continue;
                        };
                        LobbyMessage::Search { username: name }
                    }
                    ClientEvent::Build { building, pos } => {
                        let Some(name) = username.clone() else {
                            tracing::warn!("build from {} before login", conn_id);
                            continue;
                        };
                        LobbyMessage::Build {
                            username: name,
                            building,
                            pos,
                        }
                    }
                };

                if let Err(e) = lobby.send(request).await {
                    tracing::error!("Lobby is gone, closing connection {}: {}", conn_id, e);
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Error reading message from {}: {}", conn_id, e);
                break;
            }
        }
    }

    tracing::debug!("Connection {} from {} closed", conn_id, addr);
    writer.abort();
}
