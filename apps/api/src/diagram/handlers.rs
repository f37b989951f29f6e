//! Axum route handlers for diagram generation and its socket delivery.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::AuthUser;
use crate::diagram::generator::generate_diagram;
use crate::diagram::hub::{Delivery, DiagramHub};
use crate::diagram::models::{DiagramRequest, DiagramTicket};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::whiteboard::importer::{import_shapes, ImportResult};

/// POST /api/v1/whiteboard/generate-diagram
///
/// Returns 202 with a client id at once; the imported diagram is pushed to
/// `GET /api/v1/whiteboard/ws/:client_id` when generation finishes.
pub async fn handle_generate_diagram(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<DiagramRequest>,
) -> Result<(StatusCode, Json<DiagramTicket>), AppError> {
    let prompt = request.validate()?;
    let client_id = state.diagrams.open().await;
    info!("Diagram {client_id} requested by {}", user.user_id);

    let llm = state.completion.clone();
    let hub = state.diagrams.clone();
    let slot = client_id.clone();
    tokio::spawn(async move {
        let shapes = generate_diagram(llm.as_ref(), &prompt).await;
        let diagram = import_shapes(&shapes);
        info!(
            "Diagram {slot} ready: {} shapes, {} bindings",
            diagram.shapes.len(),
            diagram.bindings.len()
        );
        hub.publish(&slot, diagram).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(DiagramTicket {
            socket_path: format!("/api/v1/whiteboard/ws/{client_id}"),
            client_id,
        }),
    ))
}

/// GET /api/v1/whiteboard/ws/:client_id
///
/// Pushes the diagram as one JSON text frame once it is available and
/// answers `ping` with `pong` for as long as the socket stays open.
pub async fn handle_diagram_socket(
    ws: WebSocketUpgrade,
    State(hub): State<DiagramHub>,
    Path(client_id): Path<String>,
) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, hub, client_id))
}

async fn serve_socket(mut socket: WebSocket, hub: DiagramHub, client_id: String) {
    info!("Diagram socket connected for {client_id}");
    let mut pending = hub.subscribe(&client_id).await;
    if pending.is_none() {
        warn!("No diagram was requested under {client_id}");
    }
    let mut delivered = false;

    loop {
        if let Some(rx) = pending.as_mut() {
            let ready = rx.borrow_and_update().clone();
            if let Some(diagram) = ready {
                pending = None;
                if let Err(e) = send_diagram(&mut socket, &diagram).await {
                    warn!("Could not push diagram to {client_id}: {e}");
                    break;
                }
                info!("Pushed diagram to {client_id}");
                delivered = true;
            }
        }

        tokio::select! {
            changed = next_change(&mut pending) => {
                if changed.is_err() {
                    pending = None;
                }
            }
            message = socket.recv() => match message {
                Some(Ok(Message::Text(text))) => {
                    debug!("Diagram socket {client_id} received '{text}'");
                    if text == "ping" && socket.send(Message::Text("pong".to_string())).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Diagram socket {client_id} failed: {e}");
                    break;
                }
            },
        }
    }

    if delivered {
        hub.close(&client_id).await;
    }
    info!("Diagram socket for {client_id} closed");
}

/// Resolves when the slot changes; never resolves without a slot.
async fn next_change(
    pending: &mut Option<watch::Receiver<Delivery>>,
) -> Result<(), watch::error::RecvError> {
    match pending {
        Some(rx) => rx.changed().await,
        None => std::future::pending().await,
    }
}

async fn send_diagram(socket: &mut WebSocket, diagram: &ImportResult) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(diagram).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload)).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{routing::get, Router};
    use futures_util::{SinkExt, StreamExt};
    use serde_json::{json, Value};
    use tokio::time::timeout;
    use tokio_tungstenite::{connect_async, tungstenite::Message as ClientMessage};

    use super::*;

    type Client =
        tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

    async fn spawn_socket_server(hub: DiagramHub) -> String {
        let app = Router::new()
            .route("/ws/:client_id", get(handle_diagram_socket))
            .with_state(hub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("ws://{addr}/ws")
    }

    async fn next_text(client: &mut Client) -> String {
        let frame = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("frame before timeout")
            .expect("socket open")
            .unwrap();
        match frame {
            ClientMessage::Text(text) => text,
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    async fn ping(client: &mut Client) {
        client
            .send(ClientMessage::Text("ping".to_string()))
            .await
            .unwrap();
        assert_eq!(next_text(client).await, "pong");
    }

    #[tokio::test]
    async fn test_socket_answers_ping_with_pong() {
        let base = spawn_socket_server(DiagramHub::default()).await;
        let (mut client, _) = connect_async(format!("{base}/client-unknown")).await.unwrap();

        ping(&mut client).await;
        ping(&mut client).await;
    }

    #[tokio::test]
    async fn test_socket_pushes_diagram_published_before_connect() {
        let hub = DiagramHub::default();
        let id = hub.open().await;
        hub.publish(&id, import_shapes(&[json!({ "id": "a", "type": "text" })]))
            .await;

        let base = spawn_socket_server(hub.clone()).await;
        let (mut client, _) = connect_async(format!("{base}/{id}")).await.unwrap();

        let body: Value = serde_json::from_str(&next_text(&mut client).await).unwrap();
        assert_eq!(body["shapes"].as_array().unwrap().len(), 1);
        assert_eq!(body["shapes"][0]["type"], "text");
        ping(&mut client).await;

        client.close(None).await.unwrap();
        for _ in 0..100 {
            if !hub.is_open(&id).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("slot should be closed after delivery");
    }

    #[tokio::test]
    async fn test_socket_pushes_diagram_published_after_connect() {
        let hub = DiagramHub::default();
        let id = hub.open().await;
        let base = spawn_socket_server(hub.clone()).await;
        let (mut client, _) = connect_async(format!("{base}/{id}")).await.unwrap();

        // The pong proves the socket is subscribed before publication.
        ping(&mut client).await;
        hub.publish(
            &id,
            import_shapes(&[
                json!({ "id": "a", "type": "rectangle" }),
                json!({ "id": "b", "type": "oval" }),
            ]),
        )
        .await;

        let body: Value = serde_json::from_str(&next_text(&mut client).await).unwrap();
        assert_eq!(body["shapes"].as_array().unwrap().len(), 2);
    }
}
