//! Shared value types: page properties and task states

use std::fmt;

/// A single property value from front-matter or an inline `key:: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Scalar text (YAML numbers and booleans are rendered to text)
    Text(String),
    /// A YAML sequence, each item rendered to text
    List(Vec<String>),
}

impl PropertyValue {
    /// Text form used in org property drawers
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(", "),
        }
    }

    /// Render as an org `#+FILETAGS:` value.
    ///
    /// Lists become `:a: :b:`; scalars are colon-wrapped unless they already
    /// start with a colon.
    pub fn render_filetags(&self) -> String {
        match self {
            Self::List(items) => items
                .iter()
                .map(|tag| format!(":{tag}:"))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Text(text) if text.starts_with(':') => text.clone(),
            Self::Text(text) => format!(":{text}:"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Ordered property mapping with unique keys.
///
/// Re-inserting an existing key replaces its value in place, so a later
/// inline property overrides front-matter without moving the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous value if the key existed
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Explicit `title` property, if any
    pub fn title(&self) -> Option<String> {
        self.get("title")
            .map(PropertyValue::render)
            .filter(|title| !title.trim().is_empty())
    }
}

/// Org task keyword attached to an outline heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Todo,
    Done,
    Later,
    Doing,
    Waiting,
    Cancelled,
}

impl TaskState {
    /// Map a source task keyword. `NOW` and `OVERDUE` fold into `TODO`.
    ///
    /// Matching is case-sensitive: `todo` is ordinary text.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TODO" | "NOW" | "OVERDUE" => Some(Self::Todo),
            "DONE" => Some(Self::Done),
            "LATER" => Some(Self::Later),
            "DOING" => Some(Self::Doing),
            "WAITING" => Some(Self::Waiting),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Map a checkbox marker (`" "`, `"x"`, `"X"`)
    pub fn from_checkbox(mark: &str) -> Self {
        if mark.eq_ignore_ascii_case("x") {
            Self::Done
        } else {
            Self::Todo
        }
    }

    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Done => "DONE",
            Self::Later => "LATER",
            Self::Doing => "DOING",
            Self::Waiting => "WAITING",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_keyword())
    }
}
