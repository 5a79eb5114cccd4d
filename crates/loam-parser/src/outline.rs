//! List-to-outline conversion
//!
//! Every `- text` line of the outliner becomes an org heading. Depth comes
//! from indentation: a tab counts as two spaces, every two spaces is one
//! level, and org headings stop at level six.
//!
//! The item text is checked for a checkbox first, then for a task keyword:
//!
//! ```text
//! - [x] shipped        ->  * DONE shipped
//!     - NOW write docs ->  *** TODO write docs
//!   - plain note       ->  ** plain note
//! ```

use crate::rewriter::{RewriteContext, RewriteStage};
use crate::types::TaskState;
use regex::Regex;
use std::sync::LazyLock;

/// Deepest heading level produced from list indentation
pub const MAX_OUTLINE_DEPTH: usize = 6;

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)-\s+(.+)$").expect("list item regex"));

static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[( |x|X)\]\s+(.+)").expect("checkbox regex"));

static TASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(TODO|DONE|LATER|NOW|DOING|WAITING|CANCELLED|OVERDUE)\s+(.+)$")
        .expect("task keyword regex")
});

/// One list item, as an org heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Heading level, 1 through [`MAX_OUTLINE_DEPTH`]
    pub depth: usize,
    pub state: Option<TaskState>,
    pub text: String,
}

impl OutlineNode {
    /// Parse a single line; `None` when it is not a list item
    pub fn parse(line: &str) -> Option<Self> {
        let caps = LIST_ITEM.captures(line)?;
        let depth = depth_for_indent(&caps[1]);
        let text = &caps[2];

        if let Some(task) = CHECKBOX.captures(text) {
            return Some(Self {
                depth,
                state: Some(TaskState::from_checkbox(&task[1])),
                text: task[2].to_string(),
            });
        }

        if let Some(task) = TASK.captures(text) {
            return Some(Self {
                depth,
                state: TaskState::from_keyword(&task[1]),
                text: task[2].to_string(),
            });
        }

        Some(Self {
            depth,
            state: None,
            text: text.to_string(),
        })
    }

    /// Render as an org heading line
    pub fn render(&self) -> String {
        let stars = "*".repeat(self.depth);
        match self.state {
            Some(state) => format!("{stars} {state} {}", self.text),
            None => format!("{stars} {}", self.text),
        }
    }
}

/// `min(6, indent / 2 + 1)`, where a tab counts as two spaces
fn depth_for_indent(indent: &str) -> usize {
    let width: usize = indent
        .chars()
        .map(|c| match c {
            '\t' => 2,
            ' ' => 1,
            _ => 0,
        })
        .sum();
    (width / 2 + 1).min(MAX_OUTLINE_DEPTH)
}

/// Turn every list item line into an org heading
pub fn convert_outline(text: &str) -> String {
    text.split('\n')
        .map(|line| match OutlineNode::parse(line) {
            Some(node) => node.render(),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// List items to outline headings
pub struct ListOutline;

impl RewriteStage for ListOutline {
    fn name(&self) -> &'static str {
        "list-outline"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains('-')
    }

    fn apply(&self, text: &str, _cx: &mut RewriteContext<'_>) -> String {
        convert_outline(text)
    }
}
