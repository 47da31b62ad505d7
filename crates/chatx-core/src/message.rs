//! Chat export data model
//!
//! Exports are loosely typed: `text` may be a string or a list of fragments,
//! and any field may be missing or hold an unexpected JSON type. Everything is
//! converted once, here, into the typed model below; the rest of the crate
//! never inspects raw JSON.

use crate::{CoreError, Result};
use serde_json::Value;

/// Full parsed export, holding the message log in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Archive {
    pub messages: Vec<Message>,
}

/// One record of the message log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// The `type` field (`"message"`, `"service"`, ...)
    pub kind: Option<String>,
    /// Display name of the author
    pub from: Option<String>,
    pub text: MessageText,
}

/// The `text` field of a message
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MessageText {
    Plain(String),
    Fragments(Vec<TextFragment>),
    /// Absent, null, or any other JSON type
    #[default]
    Empty,
}

/// One element of a fragment list. Only mappings carrying a string `text`
/// contribute; everything else is kept as an empty fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFragment {
    pub text: Option<String>,
}

impl Archive {
    /// Parse an export from JSON text
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Accept either `{"messages": [...]}` or a bare `[...]`
    pub fn from_value(value: Value) -> Result<Self> {
        let records = match value {
            Value::Object(mut map) => match map.remove("messages") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(CoreError::Format(format!(
                        "`messages` must be an array, found {}",
                        json_kind(&other)
                    )));
                }
                None => {
                    return Err(CoreError::Format(
                        "top-level object has no `messages` field".to_string(),
                    ));
                }
            },
            Value::Array(items) => items,
            other => {
                return Err(CoreError::Format(format!(
                    "expected an object or an array at top level, found {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self {
            messages: records.iter().map(Message::from_value).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Message {
    /// Build a message from one log record. Fields with the wrong JSON type
    /// are treated as absent; a non-object record yields an empty message.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };

        Self {
            kind: fields.get("type").and_then(Value::as_str).map(str::to_owned),
            from: fields.get("from").and_then(Value::as_str).map(str::to_owned),
            text: fields
                .get("text")
                .map(MessageText::from_value)
                .unwrap_or_default(),
        }
    }

    /// Whether this is a regular message written by `author` (exact match)
    pub fn is_message_from(&self, author: &str) -> bool {
        self.kind.as_deref() == Some("message") && self.from.as_deref() == Some(author)
    }
}

impl MessageText {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Plain(text.clone()),
            Value::Array(items) => {
                Self::Fragments(items.iter().map(TextFragment::from_value).collect())
            }
            _ => Self::Empty,
        }
    }

    /// Raw text with fragments concatenated, no separator
    pub fn flatten(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Fragments(fragments) => fragments
                .iter()
                .filter_map(|fragment| fragment.text.as_deref())
                .collect(),
            Self::Empty => String::new(),
        }
    }
}

impl TextFragment {
    pub fn from_value(value: &Value) -> Self {
        Self {
            text: value
                .as_object()
                .and_then(|fields| fields.get("text"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
