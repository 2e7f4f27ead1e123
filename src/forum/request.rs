//! What the caller wants changed.

use crate::forum::error::ParseError;
use crate::forum::form::FormFieldMap;
use std::fmt;
use std::str::FromStr;

/// Fields of the edit form a caller may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideField {
    /// Post body.
    Message,
    /// Post title.
    Subject,
    /// Reply notifications, `0` or `1`.
    Notify,
    /// Topic lock, `0` or `1`. Only moderators can undo a lock.
    Lock,
    /// `NS` disables smileys in the post; clearing it re-enables them.
    NoSmileys,
}

impl OverrideField {
    /// Form field name on the edit page.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideField::Message => "message",
            OverrideField::Subject => "subject",
            OverrideField::Notify => "notify",
            OverrideField::Lock => "lock",
            OverrideField::NoSmileys => "ns",
        }
    }
}

impl fmt::Display for OverrideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(OverrideField::Message),
            "subject" => Ok(OverrideField::Subject),
            "notify" => Ok(OverrideField::Notify),
            "lock" => Ok(OverrideField::Lock),
            "ns" => Ok(OverrideField::NoSmileys),
            other => Err(ParseError::UnknownField(other.to_string())),
        }
    }
}

/// New value for an overridden field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Set(String),
    /// Drop the field from the submission, as an unchecked box would.
    Clear,
}

/// Overrides applied on top of the scraped form, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    entries: Vec<(OverrideField, FieldValue)>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, field: OverrideField, value: FieldValue) -> Self {
        if let Some((_, v)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            *v = value;
        } else {
            self.entries.push((field, value));
        }
        self
    }

    pub fn message(self, body: impl Into<String>) -> Self {
        self.with(OverrideField::Message, FieldValue::Set(body.into()))
    }

    pub fn subject(self, title: impl Into<String>) -> Self {
        self.with(OverrideField::Subject, FieldValue::Set(title.into()))
    }

    pub fn notify(self, enabled: bool) -> Self {
        self.with(OverrideField::Notify, FieldValue::Set(flag(enabled)))
    }

    pub fn lock(self, locked: bool) -> Self {
        self.with(OverrideField::Lock, FieldValue::Set(flag(locked)))
    }

    pub fn no_smileys(self, disabled: bool) -> Self {
        let value = if disabled {
            FieldValue::Set("NS".to_string())
        } else {
            FieldValue::Clear
        };
        self.with(OverrideField::NoSmileys, value)
    }

    /// Parse a `name = value` override as a caller would write it.
    ///
    /// `notify` and `lock` accept `0`/`1`; `ns` accepts `NS` or `null`.
    pub fn parse_field(self, name: &str, value: &str) -> Result<Self, ParseError> {
        let field: OverrideField = name.parse()?;
        let invalid = || ParseError::InvalidFieldValue {
            field: name.to_string(),
            value: value.to_string(),
        };
        let parsed = match field {
            OverrideField::Message | OverrideField::Subject => FieldValue::Set(value.to_string()),
            OverrideField::Notify | OverrideField::Lock => match value {
                "0" | "1" => FieldValue::Set(value.to_string()),
                _ => return Err(invalid()),
            },
            OverrideField::NoSmileys => match value {
                "NS" => FieldValue::Set(value.to_string()),
                "null" | "" => FieldValue::Clear,
                _ => return Err(invalid()),
            },
        };
        Ok(self.with(field, parsed))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverrideField, &FieldValue)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    /// Names of the overridden fields, for logging.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(f, _)| f.as_str()).collect()
    }

    /// Shallow-merge onto `fields`: overridden names win, everything else
    /// passes through untouched.
    pub fn apply(&self, fields: &FormFieldMap) -> FormFieldMap {
        let mut merged = fields.clone();
        for (field, value) in &self.entries {
            match value {
                FieldValue::Set(v) => merged.insert(field.as_str(), v.clone()),
                FieldValue::Clear => {
                    merged.remove(field.as_str());
                }
            }
        }
        merged
    }
}

fn flag(on: bool) -> String {
    String::from(if on { "1" } else { "0" })
}

/// One edit: which post, and what to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    message_id: u64,
    topic_id: String,
    overrides: FieldOverrides,
}

impl EditRequest {
    /// `topic_id` is passed through verbatim; SMF accepts both `45557`
    /// and the paged form `45557.0`.
    pub fn new(message_id: u64, topic_id: impl Into<String>, overrides: FieldOverrides) -> Self {
        Self {
            message_id,
            topic_id: topic_id.into(),
            overrides,
        }
    }

    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn overrides(&self) -> &FieldOverrides {
        &self.overrides
    }
}
