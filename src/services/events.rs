use serde::Serialize;
use tokio::sync::broadcast;

/// State changes other views care about. The channel carries the event kind
/// only; subscribers re-read whatever state they depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateEvent {
    ProfileUpdated,
    SettingsUpdated,
}

impl StateEvent {
    pub fn name(self) -> &'static str {
        match self {
            StateEvent::ProfileUpdated => "profile_updated",
            StateEvent::SettingsUpdated => "settings_updated",
        }
    }
}

/// Best-effort broadcast: only currently subscribed, currently polling
/// receivers see an event. There is no delivery guarantee beyond that.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StateEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn publish(&self, event: StateEvent) {
        // A send error only means nobody is listening right now.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }
}
