//! # Event: one unit of pushed data.
//!
//! An [`Event`] pairs an optional wire-level name with an opaque payload the
//! producer has already serialized. Events are immutable once created:
//! ownership moves from the producer through the fan-in queue to the stream
//! writer, which encodes the event and drops it.

/// One unit of data pushed to the client.
///
/// The name selects the wire-level event type; `None` (or an empty string)
/// means the client's default unnamed type. The payload is written as a
/// single `data:` line, so producers emit compact single-line JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    name: Option<String>,
    payload: Vec<u8>,
}

impl Event {
    /// Creates an event of the default unnamed wire type.
    ///
    /// # Example
    /// ```
    /// use feedcast::Event;
    ///
    /// let ev = Event::unnamed(br#"{"content":{}}"#.to_vec());
    /// assert!(ev.name().is_none());
    /// assert_eq!(ev.payload(), br#"{"content":{}}"#);
    /// ```
    pub fn unnamed(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            payload: payload.into(),
        }
    }

    /// Creates a named event.
    ///
    /// # Example
    /// ```
    /// use feedcast::Event;
    ///
    /// let ev = Event::named("navigation", br#"{"sections":[]}"#.to_vec());
    /// assert_eq!(ev.name(), Some("navigation"));
    /// ```
    pub fn named(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: Some(name.into()),
            payload: payload.into(),
        }
    }

    /// Returns the wire-level event name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
