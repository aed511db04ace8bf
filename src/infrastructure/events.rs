//! Game notifications
//!
//! The orchestrator owns one `EventBus` and publishes at the point of each
//! state change. Synchronous subscribers run in subscription order before
//! the event is offered to channel subscribers.

use async_broadcast::{broadcast, Receiver, Sender};
use serde::Serialize;

use crate::domain::entities::{Card, Rank};
use crate::domain::value_objects::PLAYER_COUNT;

/// Where a drawn card came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    Deck,
    Discard,
}

impl DrawSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawSource::Deck => "deck",
            DrawSource::Discard => "discard",
        }
    }
}

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GameEventKind {
    #[serde(rename_all = "camelCase")]
    GameStarted {
        round_number: u32,
        wildcard_definer: Card,
        wildcard_rank: Rank,
    },
    #[serde(rename_all = "camelCase")]
    GameEnded {
        winner: Option<usize>,
        penalties: [u32; PLAYER_COUNT],
    },
    #[serde(rename_all = "camelCase")]
    TurnChanged { player_index: usize },
    #[serde(rename_all = "camelCase")]
    CardDrawn {
        player_index: usize,
        card: Card,
        source: DrawSource,
    },
    #[serde(rename_all = "camelCase")]
    CardDiscarded { player_index: usize, card: Card },
}

/// Game event envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    /// Round generation the event belongs to
    pub generation: u64,
    #[serde(flatten)]
    pub kind: GameEventKind,
    pub timestamp: i64,
}

impl GameEvent {
    pub fn new(generation: u64, kind: GameEventKind) -> Self {
        Self {
            generation,
            kind,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self.kind {
            GameEventKind::GameStarted { .. } => "gameStarted",
            GameEventKind::GameEnded { .. } => "gameEnded",
            GameEventKind::TurnChanged { .. } => "turnChanged",
            GameEventKind::CardDrawn { .. } => "cardDrawn",
            GameEventKind::CardDiscarded { .. } => "cardDiscarded",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Handle returned by `EventBus::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameEvent) + Send>;

/// Ordered subscriber list plus optional broadcast channel
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    channel: Option<Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            channel: None,
        }
    }

    /// Register a synchronous subscriber
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Receive events through an `async-broadcast` channel. Old events are
    /// dropped once `capacity` unread events pile up.
    pub fn subscribe_channel(&mut self, capacity: usize) -> Receiver<GameEvent> {
        match &self.channel {
            Some(sender) if !sender.is_closed() => sender.new_receiver(),
            _ => {
                let (mut sender, receiver) = broadcast(capacity.max(1));
                sender.set_overflow(true);
                self.channel = Some(sender);
                receiver
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver to every subscriber in order, then to the channel
    pub fn publish(&mut self, event: GameEvent) {
        tracing::debug!(
            "Publishing event '{}' to {} subscribers",
            event.event_type(),
            self.subscribers.len()
        );
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }

        if let Some(sender) = &self.channel {
            if sender.receiver_count() == 0 {
                return;
            }
            match sender.try_broadcast(event) {
                Ok(None) => {}
                Ok(Some(_)) => {
                    tracing::debug!("Event channel full, oldest event dropped");
                }
                Err(e) => {
                    tracing::warn!("Failed to broadcast event: {:?}", e);
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("channel", &self.channel.is_some())
            .finish()
    }
}
