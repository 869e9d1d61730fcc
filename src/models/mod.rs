use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `servicios (nombre, descripcion)` projection used by menu option 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescription {
    pub name: String,
    pub description: String,
}

/// `servicios (nombre, precio)` projection used by menu option 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePrice {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub start: String,  // hora_inicio, e.g. "09:00"
    pub end: String,    // hora_fin
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub from: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered text segments sent back to one sender.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutgoingReply {
    pub segments: Vec<String>,
}

impl OutgoingReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            segments: vec![text.into()],
        }
    }

    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for OutgoingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("\n"))
    }
}

/// Pairing event emitted by the messaging bridge for a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingCode {
    pub code: String,
    pub image_png: Option<Vec<u8>>,
    pub received_at: DateTime<Utc>,
}
