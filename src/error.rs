use std::fmt;

use thiserror::Error;

use crate::writer::{EventKind, WriterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An event or append arrived where the tree cannot accept it.
    InvalidStructure,
    /// The serde adapter was handed something it cannot map onto nodes.
    Serialize,
}

/// Error raised while building a document tree.
///
/// Structural errors carry the offending event and the writer state at the
/// time it arrived. Node model errors carry neither.
#[derive(Debug, Clone, Error)]
#[error("{message}{}", context_suffix(.event, .state))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub event: Option<EventKind>,
    pub state: Option<WriterState>,
}

impl Error {
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidStructure,
            message: message.into(),
            event: None,
            state: None,
        }
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Serialize,
            message: message.into(),
            event: None,
            state: None,
        }
    }

    pub fn with_event(mut self, event: EventKind) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_state(mut self, state: WriterState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn is_invalid_structure(&self) -> bool {
        self.kind == ErrorKind::InvalidStructure
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::serialize(msg.to_string())
    }
}

fn context_suffix(event: &Option<EventKind>, state: &Option<WriterState>) -> String {
    match (event, state) {
        (Some(event), Some(state)) => format!(" ({event} in {state})"),
        (Some(event), None) => format!(" ({event})"),
        (None, Some(state)) => format!(" (in {state})"),
        (None, None) => String::new(),
    }
}
