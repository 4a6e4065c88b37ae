//! Inbound command decoding.

use core::fmt::Write;

use heapless::String;

use crate::config::units::Millimeters;
use crate::error::DispatchError;

use super::topics::Topics;

/// Decoded inbound command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Move every axis to an absolute position.
    MoveTo(Millimeters),
    /// Home the rig, retrying until it succeeds.
    Home,
}

impl Command {
    /// Decode a message.
    ///
    /// Topics match by prefix. A move payload is a decimal number of
    /// millimeters; surrounding whitespace is ignored and anything that is not
    /// a finite number is rejected. The home payload is ignored.
    pub fn parse(topics: &Topics, topic: &str, payload: &[u8]) -> Result<Self, DispatchError> {
        if topic.starts_with(topics.move_to.as_str()) {
            parse_position(payload).map(Command::MoveTo)
        } else if topic.starts_with(topics.home.as_str()) {
            Ok(Command::Home)
        } else {
            let mut name = String::new();
            push_truncated(&mut name, topic);
            Err(DispatchError::UnknownTopic(name))
        }
    }
}

fn parse_position(payload: &[u8]) -> Result<Millimeters, DispatchError> {
    let text = core::str::from_utf8(payload).map_err(|_| invalid(payload))?;
    match text.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(Millimeters(value)),
        _ => Err(invalid(payload)),
    }
}

fn invalid(payload: &[u8]) -> DispatchError {
    let mut shown = String::new();
    match core::str::from_utf8(payload) {
        Ok(text) => push_truncated(&mut shown, text),
        Err(_) => {
            let _ = write!(shown, "<{} bytes>", payload.len());
        }
    }
    DispatchError::InvalidPayload(shown)
}

fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) {
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}
