//! WebSocket notification fan-out
//!
//! A single broadcast channel carries every entity-change event; each
//! connected client gets its own receiver. Delivery is best-effort: a send
//! with no subscribers is fine, and a client that falls too far behind
//! skips the lagged events rather than stalling the sender.

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{Message, Session};
use async_trait::async_trait;
use futures::StreamExt;
use hotel_core::traits::Notifier;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

/// Entity-change events pushed to WebSocket clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsEvent {
    /// A booking changed
    #[serde(rename = "bookingUpdated")]
    BookingUpdated { id: i32, status: String },
    /// A room's status changed
    #[serde(rename = "roomUpdated")]
    RoomUpdated { id: i32, status: String },
    /// A staff task changed
    #[serde(rename = "taskUpdated")]
    TaskUpdated { id: i32, status: String },
    /// Keepalive reply
    #[serde(rename = "pong")]
    Pong,
}

/// Broadcast hub shared by the services and every WebSocket session
pub struct WsBroadcaster {
    tx: broadcast::Sender<WsEvent>,
}

impl WsBroadcaster {
    /// Create a broadcaster with the given per-client backlog capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe a new client
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.tx.subscribe()
    }

    /// Number of connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn publish(&self, event: WsEvent) {
        // Err only means nobody is listening right now.
        let _ = self.tx.send(event);
    }
}

impl Default for WsBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Notifier for WsBroadcaster {
    async fn booking_updated(&self, id: i32, status: &str) {
        self.publish(WsEvent::BookingUpdated {
            id,
            status: status.to_string(),
        });
    }

    async fn room_updated(&self, id: i32, status: &str) {
        self.publish(WsEvent::RoomUpdated {
            id,
            status: status.to_string(),
        });
    }

    async fn task_updated(&self, id: i32, status: &str) {
        self.publish(WsEvent::TaskUpdated {
            id,
            status: status.to_string(),
        });
    }
}

/// WebSocket connection handler
///
/// GET /ws
pub async fn ws_handler(
    req: HttpRequest,
    body: web::Payload,
    broadcaster: web::Data<WsBroadcaster>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, body)?;

    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    info!(client = %client_ip, "WebSocket connection established");

    let rx = broadcaster.subscribe();
    actix_web::rt::spawn(async move {
        ws_session(session, msg_stream, rx, client_ip).await;
    });

    Ok(response)
}

async fn ws_session(
    mut session: Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: broadcast::Receiver<WsEvent>,
    client_ip: String,
) {
    let mut ping_interval = interval(Duration::from_secs(30));

    loop {
        tokio::select! {
            // Forward entity-change events
            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if session.text(json).await.is_err() {
                                warn!(client = %client_ip, "Failed to send event, closing connection");
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(client = %client_ip, "Client lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }

            // Handle incoming messages
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        debug!(client = %client_ip, "Received text: {}", text);
                        if text.contains("ping") {
                            if let Ok(json) = serde_json::to_string(&WsEvent::Pong) {
                                let _ = session.text(json).await;
                            }
                        }
                    }
                    Ok(Message::Ping(msg)) => {
                        if session.pong(&msg).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Pong(_)) => {}
                    Ok(Message::Close(reason)) => {
                        info!(client = %client_ip, "Client closed connection: {:?}", reason);
                        break;
                    }
                    Ok(Message::Binary(_)) | Ok(Message::Continuation(_)) | Ok(Message::Nop) => {}
                    Err(e) => {
                        error!(client = %client_ip, "WebSocket error: {}", e);
                        break;
                    }
                }
            }

            // Keepalive
            _ = ping_interval.tick() => {
                if session.ping(b"").await.is_err() {
                    warn!(client = %client_ip, "Failed to send ping, closing connection");
                    break;
                }
            }
        }
    }

    info!(client = %client_ip, "WebSocket connection closed");
    let _ = session.close(None).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notifier_reaches_subscriber() {
        let broadcaster = WsBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        broadcaster.booking_updated(17, "Confirmed").await;

        match rx.recv().await.unwrap() {
            WsEvent::BookingUpdated { id, status } => {
                assert_eq!(id, 17);
                assert_eq!(status, "Confirmed");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let broadcaster = WsBroadcaster::new(8);
        broadcaster.room_updated(1, "Available").await;
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn test_event_wire_format() {
        let event = WsEvent::TaskUpdated {
            id: 5,
            status: "Completed".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"taskUpdated\""));
        assert!(json.contains("\"status\":\"Completed\""));
    }
}
