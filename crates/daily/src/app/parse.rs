//! Tolerant parser turning TODO section lines into bullet trees.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::format::EntryFormat;
use crate::domain::model::{BulletNode, Checkbox};

static TODO_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent> *)(?P<bullet>\* )?(?:\[(?P<mark>.)\])? *(?P<text>.*)$")
        .expect("todo item pattern compiles")
});

/// A single classified line of the TODO section.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedLine<'a> {
    Bullet(BulletNode),
    Continuation { depth: usize, text: &'a str },
}

fn classify<'a>(line: &'a str, format: &EntryFormat) -> Option<ParsedLine<'a>> {
    let caps = TODO_ITEM.captures(line)?;
    let depth = format.depth_of(caps.name("indent").map_or(0, |m| m.as_str().len()));
    let text = caps.name("text").map_or("", |m| m.as_str());

    if caps.name("bullet").is_none() {
        return Some(ParsedLine::Continuation { depth, text });
    }

    let node = match caps.name("mark").and_then(|m| m.as_str().chars().next()) {
        Some(mark) => BulletNode::todo(depth, text, Checkbox::from_mark(mark) == Checkbox::Done),
        None => BulletNode::plain(depth, text),
    };
    Some(ParsedLine::Bullet(node))
}

/// Parse extracted lines into an ordered forest of top-level bullets.
///
/// Nesting is tracked against the most recent top-level entry only: a bullet exactly one level
/// deeper becomes its child, anything else starts a new top-level entry. Unbulleted lines
/// deeper than that entry extend its text; shallower ones are dropped. No input is rejected.
pub fn parse_bullets<S: AsRef<str>>(lines: &[S], format: &EntryFormat) -> Vec<BulletNode> {
    let mut forest: Vec<BulletNode> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        match classify(line, format) {
            Some(ParsedLine::Bullet(node)) => match forest.last_mut() {
                Some(last) => {
                    if let Err(node) = last.adopt(node) {
                        forest.push(node);
                    }
                }
                None => forest.push(node),
            },
            Some(ParsedLine::Continuation { depth, text }) => match forest.last_mut() {
                Some(last) if depth > last.indent => last.extend_text(text),
                _ => tracing::trace!(line, "dropping unattached line"),
            },
            None => tracing::trace!(line, "unrecognised line"),
        }
    }

    tracing::debug!(top_level = forest.len(), "parsed TODO section");
    forest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Vec<BulletNode> {
        parse_bullets(lines, &EntryFormat::default())
    }

    #[test]
    fn nests_one_level_under_previous_top_level() {
        let forest = parse(&["* [ ] task A", "  * [X] subtask", "* [X] task B"]);
        assert_eq!(forest.len(), 2);

        let a = &forest[0];
        assert_eq!(a.text, "task A");
        assert_eq!(a.completed(), Some(false));
        assert_eq!(a.children().len(), 1);
        assert_eq!(a.children()[0].text, "subtask");
        assert_eq!(a.children()[0].completed(), Some(true));

        let b = &forest[1];
        assert_eq!(b.text, "task B");
        assert_eq!(b.completed(), Some(true));
        assert!(b.children().is_empty());
    }

    #[test]
    fn continuation_extends_text() {
        let forest = parse(&["* [ ] task A", "  more detail"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "task A more detail");
        assert!(forest[0].children().is_empty());
    }

    #[test]
    fn shallow_continuation_is_discarded() {
        let forest = parse(&["* [ ] task", "not indented", "  indented"]);
        assert_eq!(forest[0].text, "task indented");
    }

    #[test]
    fn leading_continuation_is_discarded() {
        let forest = parse(&["    orphan text", "* [ ] task"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "task");
    }

    #[test]
    fn plain_bullets_and_checkbox_marks() {
        let forest = parse(&["* note", "* [x] lower", "* [-] dash", "* [ ]   spaced"]);
        assert_eq!(forest[0], BulletNode::plain(0, "note"));
        assert_eq!(forest[1].completed(), Some(true));
        assert_eq!(forest[2].completed(), Some(true));
        assert_eq!(forest[3], BulletNode::todo(0, "spaced", false));
    }

    #[test]
    fn skipped_levels_flatten_to_top_level() {
        let forest = parse(&["* [ ] a", "  * [ ] b", "    * [ ] c", "  * [ ] d"]);
        assert_eq!(forest.len(), 3);
        assert_eq!(forest[0].children().len(), 1);
        assert_eq!(forest[0].children()[0].text, "b");
        assert_eq!(forest[1].text, "c");
        assert_eq!(forest[1].indent, 2);
        assert_eq!(forest[2].text, "d");
        assert_eq!(forest[2].indent, 1);
    }

    #[test]
    fn deeper_top_level_entry_collects_its_own_children() {
        let forest = parse(&["  * [ ] indented", "    * [ ] child", "* [ ] top"]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].indent, 1);
        assert_eq!(forest[0].children()[0].indent, 2);
        assert_eq!(forest[1].text, "top");
    }

    #[test]
    fn odd_indentation_rounds_down() {
        let forest = parse(&["* [ ] a", "   * [ ] three spaces"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children()[0].indent, 1);
    }

    #[test]
    fn marker_without_space_is_continuation() {
        let forest = parse(&["* [ ] a", "  *b", "\t* tabbed"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "a *b");
    }

    #[test]
    fn wider_indent_width() {
        let format = EntryFormat::with_indent_width(4);
        let forest = parse_bullets(&["* [ ] a", "  * [ ] same", "    * [ ] child"], &format);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].children()[0].text, "child");
    }

    #[test]
    fn empty_input_is_empty_forest() {
        assert!(parse(&[]).is_empty());
    }
}
