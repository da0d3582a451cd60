use std::env;

use tokio::task::JoinSet;
use town_game::{api::websocket, lobby::Lobby};

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global subscriber");
    tracing::info!("Starting the town server...");

    let mut lobby = Lobby::new();
    let lobby_tx = lobby.sender();
    lobby.start();

    let addr = env::args().nth(1).unwrap_or_else(|| "127.0.0.1:9100".to_string());

    let try_socket = tokio::net::TcpListener::bind(&addr).await;
    let listener = match try_socket {
        Ok(socket) => socket,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return;
        }
    };

    tracing::info!("Listening for TCP connections on {}", addr);

    let mut handles = JoinSet::new();

    loop {
        tokio::select! {
            Ok((stream, _)) = listener.accept() => {
                tracing::info!("New connection from {}", stream.peer_addr().unwrap());
                handles.spawn(websocket::accept_connection(stream, lobby_tx.clone()));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    lobby.stop().await;
    handles.shutdown().await;

    tracing::info!("Server stopped.");
}
