use std::fmt;

use smol_str::SmolStr;

use crate::tree::{Scalar, ValueKind};

/// One write call, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    StartConstructor(SmolStr),
    EndConstructor,
    PropertyName(SmolStr),
    Value(Scalar),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StartObject => EventKind::StartObject,
            Event::EndObject => EventKind::EndObject,
            Event::StartArray => EventKind::StartArray,
            Event::EndArray => EventKind::EndArray,
            Event::StartConstructor(_) => EventKind::StartConstructor,
            Event::EndConstructor => EventKind::EndConstructor,
            Event::PropertyName(_) => EventKind::PropertyName,
            Event::Value(value) => EventKind::Value(value.kind()),
        }
    }
}

/// Payload-free event discriminant, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    StartConstructor,
    EndConstructor,
    PropertyName,
    Value(ValueKind),
}

impl EventKind {
    pub fn is_start(self) -> bool {
        matches!(
            self,
            EventKind::StartObject | EventKind::StartArray | EventKind::StartConstructor
        )
    }

    pub fn is_end(self) -> bool {
        matches!(
            self,
            EventKind::EndObject | EventKind::EndArray | EventKind::EndConstructor
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::StartObject => f.write_str("StartObject"),
            EventKind::EndObject => f.write_str("EndObject"),
            EventKind::StartArray => f.write_str("StartArray"),
            EventKind::EndArray => f.write_str("EndArray"),
            EventKind::StartConstructor => f.write_str("StartConstructor"),
            EventKind::EndConstructor => f.write_str("EndConstructor"),
            EventKind::PropertyName => f.write_str("PropertyName"),
            EventKind::Value(kind) => write!(f, "Value({kind})"),
        }
    }
}

/// Shape of the writer's current parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterState {
    TopLevel,
    InsideObject,
    InsideArray,
    InsideConstructor,
    AwaitingPropertyValue,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::TopLevel => "TopLevel",
            WriterState::InsideObject => "InsideObject",
            WriterState::InsideArray => "InsideArray",
            WriterState::InsideConstructor => "InsideConstructor",
            WriterState::AwaitingPropertyValue => "AwaitingPropertyValue",
        };
        f.write_str(name)
    }
}
