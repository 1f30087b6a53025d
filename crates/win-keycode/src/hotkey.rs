use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{Key, Modifier, Modifiers};

/// Reasons a hotkey descriptor string can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The descriptor was empty or only whitespace.
    #[error("empty hotkey descriptor")]
    Empty,
    /// A `+`-separated component was empty, e.g. "ctrl++p".
    #[error("empty component in hotkey descriptor {0:?}")]
    EmptyComponent(String),
    /// A leading component was not Alt, Ctrl or Shift.
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
    /// The final component did not name a key.
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    /// The final component named a modifier key rather than a primary key.
    #[error("{0:?} is a modifier and cannot be the hotkey's key")]
    ModifierAsKey(String),
}

/// A hotkey descriptor: a set of modifiers plus a single primary key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Hotkey {
    /// Modifier keys held down for this hotkey.
    pub modifiers: Modifiers,
    /// The non-modifier key for this hotkey.
    pub key: Key,
}

impl Hotkey {
    /// Construct a hotkey from parts.
    pub fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Parses a descriptor of the form "Shift+Ctrl+P".
    ///
    /// - Case-insensitive for both modifiers and the key.
    /// - Components are separated by "+"; the last component is always the key spec.
    /// - Whitespace around components is ignored, except that a lone space is
    ///   accepted as the key.
    /// - Repeated modifiers collapse into the set.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_raw = parts.pop().ok_or(ParseError::Empty)?;
        let key_spec = if key_raw == " " { key_raw } else { key_raw.trim() };
        if key_spec.is_empty() {
            return Err(ParseError::EmptyComponent(s.to_string()));
        }
        let key =
            Key::from_spec(key_spec).ok_or_else(|| ParseError::UnknownKey(key_spec.to_string()))?;
        if key.is_modifier() {
            return Err(ParseError::ModifierAsKey(key_spec.to_string()));
        }

        let mut modifiers = Modifiers::empty();
        for m in parts {
            let mt = m.trim();
            if mt.is_empty() {
                return Err(ParseError::EmptyComponent(s.to_string()));
            }
            let mm =
                Modifier::from_spec(mt).ok_or_else(|| ParseError::UnknownModifier(mt.to_string()))?;
            modifiers |= Modifiers::from(mm);
        }
        Ok(Self { modifiers, key })
    }

    /// Returns the canonical string form of this hotkey: lowercase specs,
    /// modifiers in `ctrl`, `alt`, `shift` order, then the key.
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<String> = self
            .modifiers
            .iter_canonical()
            .map(|m| m.to_spec().to_string())
            .collect();
        out.push(self.key.to_spec());
        out.join("+")
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}

impl FromStr for Hotkey {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
