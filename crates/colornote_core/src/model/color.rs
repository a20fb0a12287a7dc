//! Note display color and the foreground contrast rule.
//!
//! # Responsibility
//! - Represent the RGB triple persisted in note records.
//! - Accept the color tokens found in existing records (`[R, G, B]` or `#RRGGBB`).
//! - Derive the legible foreground for any background.
//!
//! # Invariants
//! - Foreground is black only for the two light backgrounds: pure white and
//!   `LIGHT_GRAY`. Every other background gets a white foreground.
//! - Records always serialize a color as a three-element integer array.

use crate::model::note::{json_type_name, NoteValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$")
        .expect("valid hex color regex")
});

/// RGB color triple attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Light gray background that still reads with black text.
    pub const LIGHT_GRAY: Rgb = Rgb::new(202, 207, 210);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns whether this background takes a black foreground.
    pub fn is_light_background(self) -> bool {
        self == Self::WHITE || self == Self::LIGHT_GRAY
    }

    /// Returns the `#RRGGBB` token for this color.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Color given to notes created through the board without an explicit color.
pub const DEFAULT_NOTE_COLOR: Rgb = Rgb::new(71, 166, 229);

/// Returns the text color to render on top of `background`.
///
/// Binary rule: black on white or light gray, white on everything else.
/// List rows and selection highlight must both go through this function.
pub fn foreground_for(background: Rgb) -> Rgb {
    if background.is_light_background() {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        [value.r, value.g, value.b]
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = NoteValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let caps = HEX_COLOR_RE
            .captures(value.trim())
            .ok_or_else(|| NoteValidationError::InvalidColor(value.to_string()))?;
        let channel = |index: usize| {
            u8::from_str_radix(&caps[index], 16)
                .map_err(|_| NoteValidationError::InvalidColor(value.to_string()))
        };
        Ok(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }
}

/// Decodes the `color` field of a stored record.
///
/// Missing, `null`, `""` and `[]` all mean "no color".
///
/// # Errors
/// - `InvalidColor` when the value is neither a 0..=255 triple nor `#RRGGBB`.
pub fn color_from_record(value: Option<&Value>) -> Result<Option<Rgb>, NoteValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::String(token) if token.is_empty() => Ok(None),
        Value::String(token) => token.parse().map(Some),
        Value::Array(items) if items.is_empty() => Ok(None),
        Value::Array(items) if items.len() == 3 => {
            let mut channels = [0u8; 3];
            for (slot, item) in channels.iter_mut().zip(items) {
                *slot = item
                    .as_u64()
                    .and_then(|channel| u8::try_from(channel).ok())
                    .ok_or_else(|| NoteValidationError::InvalidColor(value.to_string()))?;
            }
            Ok(Some(Rgb::from(channels)))
        }
        Value::Array(_) => Err(NoteValidationError::InvalidColor(value.to_string())),
        other => Err(NoteValidationError::InvalidColor(format!(
            "expected color triple, found {}",
            json_type_name(other)
        ))),
    }
}
