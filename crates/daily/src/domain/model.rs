//! Bullet trees parsed from the TODO section of a daily entry.

/// Checkbox state of a todo bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    /// `[ ]`
    Open,
    /// `[X]`, or any other single character between the brackets.
    Done,
}

impl Checkbox {
    /// Classify the character found between the brackets.
    pub fn from_mark(mark: char) -> Self {
        if mark == ' ' {
            Checkbox::Open
        } else {
            Checkbox::Done
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Checkbox::Open => "[ ]",
            Checkbox::Done => "[X]",
        }
    }
}

/// One entry of a nested markdown list.
///
/// A node with a checkbox is a todo item; a node without one is a plain bullet. Children
/// always sit exactly one level deeper than their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletNode {
    pub indent: usize,
    pub text: String,
    pub checkbox: Option<Checkbox>,
    children: Vec<BulletNode>,
}

impl BulletNode {
    pub fn plain(indent: usize, text: impl Into<String>) -> Self {
        Self {
            indent,
            text: text.into(),
            checkbox: None,
            children: Vec::new(),
        }
    }

    pub fn todo(indent: usize, text: impl Into<String>, completed: bool) -> Self {
        let checkbox = if completed {
            Checkbox::Done
        } else {
            Checkbox::Open
        };
        Self {
            checkbox: Some(checkbox),
            ..Self::plain(indent, text)
        }
    }

    pub fn is_todo(&self) -> bool {
        self.checkbox.is_some()
    }

    /// `Some(completed)` for todo items, `None` for plain bullets.
    pub fn completed(&self) -> Option<bool> {
        self.checkbox.map(|checkbox| checkbox == Checkbox::Done)
    }

    /// Whether this node is a todo item still waiting to be done.
    pub fn is_open_todo(&self) -> bool {
        self.checkbox == Some(Checkbox::Open)
    }

    pub fn children(&self) -> &[BulletNode] {
        &self.children
    }

    /// Attach `child` if it sits exactly one level below this node.
    ///
    /// Returns the child back untouched when the depth does not line up, leaving the caller to
    /// decide where it goes instead.
    pub fn adopt(&mut self, child: BulletNode) -> Result<(), BulletNode> {
        if child.indent == self.indent + 1 {
            self.children.push(child);
            Ok(())
        } else {
            Err(child)
        }
    }

    /// Append continuation text, separated by a single space.
    pub fn extend_text(&mut self, more: &str) {
        self.text.push(' ');
        self.text.push_str(more);
    }

    /// Serialize this node and its subtree as markdown bullet lines.
    pub fn render_lines(&self, indent_unit: &str, out: &mut Vec<String>) {
        let prefix = indent_unit.repeat(self.indent);
        let line = match self.checkbox {
            Some(checkbox) => format!("{prefix}* {} {}", checkbox.as_str(), self.text),
            None => format!("{prefix}* {}", self.text),
        };
        out.push(line);
        for child in &self.children {
            child.render_lines(indent_unit, out);
        }
    }
}
