//! Opaque placeholders for text that later rewrite stages must not touch
//!
//! A [`Shield`] swaps a span of text for a token built from private-use
//! characters and a per-shield random tag, then swaps it back on release.
//! Tokens contain no markdown punctuation and no word characters at their
//! edges, so none of the emphasis, link, table or outline patterns can match
//! across them.

use uuid::Uuid;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Holds text spans behind placeholder tokens until released
#[derive(Debug)]
pub struct Shield {
    marker: String,
    held: Vec<String>,
}

impl Shield {
    /// Create a shield; `kind` only helps when reading a token in a debugger
    pub fn new(kind: &str) -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self {
            marker: format!("{OPEN}{kind}{}:", &tag[..8]),
            held: Vec::new(),
        }
    }

    /// Store `text` and return the token that stands in for it
    pub fn hold(&mut self, text: impl Into<String>) -> String {
        self.held.push(text.into());
        format!("{}{}{CLOSE}", self.marker, self.held.len() - 1)
    }

    /// Number of spans currently held
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Replace every token of this shield in `text` with the span it holds.
    ///
    /// Held spans may contain tokens taken earlier from the same shield;
    /// those are expanded too. Tokens from other shields are left alone.
    pub fn release(&self, text: &str) -> String {
        if self.held.is_empty() || !text.contains(OPEN) {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(&self.marker) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.marker.len()..];
            let index = after.find(CLOSE).and_then(|end| {
                after[..end]
                    .parse::<usize>()
                    .ok()
                    .filter(|index| *index < self.held.len())
                    .map(|index| (index, end))
            });

            match index {
                Some((index, end)) => {
                    out.push_str(&self.release(&self.held[index]));
                    rest = &after[end + CLOSE.len_utf8()..];
                }
                None => {
                    out.push_str(&self.marker);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}
