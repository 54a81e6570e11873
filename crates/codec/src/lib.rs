use std::fmt::{Display, Formatter};

use idna::AsciiDenyList;

/// Marker searched for when deciding whether a label is ASCII-compatible encoded.
///
/// NOTE: this is deliberately shorter than the IDNA `xn--` prefix, so labels such as
/// `my-xn-site` are treated as encoded too.
pub const ACE_MARKER: &str = "xn-";

/// Characters IDNA treats as label separators: full stop, ideographic full stop,
/// fullwidth full stop and halfwidth ideographic full stop.
pub const LABEL_SEPARATORS: [char; 4] = ['.', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// Split a host into labels on any IDNA label separator.
pub fn split_labels(host: &str) -> std::str::Split<'_, [char; 4]> {
    host.split(LABEL_SEPARATORS)
}

/// Direction of a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IDNA input ({direction}): {input}")]
pub struct CodecError {
    direction: Direction,
    input: String,
}

impl CodecError {
    fn new(direction: Direction, input: &str) -> Self {
        Self {
            direction,
            input: input.into(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The text the codec rejected.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Convert a label or a whole host to its ASCII-compatible form.
/// Labels that are already ASCII are only lowercased.
pub fn encode(input: &str) -> Result<String, CodecError> {
    idna::domain_to_ascii_cow(input.as_bytes(), AsciiDenyList::URL)
        .map(|ascii| ascii.into_owned())
        .map_err(|_| CodecError::new(Direction::Encode, input))
}

/// Convert a label or a whole host back to native script.
/// Any `xn--` label that does not hold valid punycode is an error.
pub fn decode(input: &str) -> Result<String, CodecError> {
    let (unicode, result) = idna::domain_to_unicode(input);
    result.map_err(|_| CodecError::new(Direction::Decode, input))?;
    Ok(unicode)
}

/// Whether the label carries the (loose) ASCII-compatible encoding marker.
pub fn has_ace_marker(label: &str) -> bool {
    label.contains(ACE_MARKER)
}
