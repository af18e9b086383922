//! Fixed entry format and storage layout shared by every pipeline stage.

use std::path::{Path, PathBuf};

use time::Date;

pub const TODO_START: &str = "<!-- [TODO_START] -->";
pub const TODO_END: &str = "<!-- [TODO_END] -->";
pub const DEFAULT_INDENT_WIDTH: usize = 2;

const ENTRY_ROOT: &str = "daily";
const ENTRY_FILE: &str = "daily.md";

/// Markers and indentation used to read and write the TODO section.
///
/// The marker text is part of the on-disk format; entries written with different markers are
/// invisible to later runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFormat {
    todo_start: &'static str,
    todo_end: &'static str,
    indent_width: usize,
}

impl EntryFormat {
    /// Build a format with a custom indent width. A width of zero is bumped to one.
    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
            ..Self::default()
        }
    }

    pub fn todo_start(&self) -> &str {
        self.todo_start
    }

    pub fn todo_end(&self) -> &str {
        self.todo_end
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// The whitespace emitted per nesting level.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Depth for a run of leading spaces, rounding down.
    pub fn depth_of(&self, leading_spaces: usize) -> usize {
        leading_spaces / self.indent_width
    }
}

impl Default for EntryFormat {
    fn default() -> Self {
        Self {
            todo_start: TODO_START,
            todo_end: TODO_END,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Maps dates onto `daily/<yyyy>/<mm>/<dd>/daily.md`, optionally under a base directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryLayout {
    base_dir: Option<PathBuf>,
}

impl EntryLayout {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn path_for(&self, date: Date) -> PathBuf {
        let root = match &self.base_dir {
            Some(base) => base.join(ENTRY_ROOT),
            None => PathBuf::from(ENTRY_ROOT),
        };
        root.join(format!("{:04}", date.year()))
            .join(format!("{:02}", u8::from(date.month())))
            .join(format!("{:02}", date.day()))
            .join(ENTRY_FILE)
    }
}
