//! Selection and serialization of unfinished todo items.

use crate::domain::format::EntryFormat;
use crate::domain::model::BulletNode;

/// Top-level nodes that are open todo items. Their subtrees come along unfiltered.
pub fn open_todos(forest: &[BulletNode]) -> impl Iterator<Item = &BulletNode> {
    forest.iter().filter(|node| node.is_open_todo())
}

/// Render every open top-level todo with its full subtree, one bullet per line.
///
/// Returns an empty string when nothing is left to carry over.
pub fn render_open_todos(forest: &[BulletNode], format: &EntryFormat) -> String {
    let indent_unit = format.indent_unit();
    let mut lines = Vec::new();
    for node in open_todos(forest) {
        node.render_lines(&indent_unit, &mut lines);
    }
    lines.join("\n")
}
