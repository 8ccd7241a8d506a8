//! Indented outline input, one label per line:
//!
//! ```text
//! Project Planning
//!     Research
//!         Market Analysis
//!     Design
//! ```
//!
//! A line becomes a child of the nearest earlier line with a smaller indent.

use crate::node::Node;
use crate::{Error, Result};

const TAB_WIDTH: usize = 4;

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

struct Entry {
    indent: usize,
    text: String,
    children: Vec<usize>,
}

/// Parses an outline. Returns `Ok(None)` when the input has no labels at all.
pub fn parse_outline(text: &str) -> Result<Option<Node>> {
    let mut entries: Vec<Entry> = Vec::new();
    // Indices of the entries on the current ancestor chain.
    let mut chain: Vec<usize> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        let indent = indent_width(line);

        while chain
            .last()
            .is_some_and(|&open| entries[open].indent >= indent)
        {
            chain.pop();
        }

        let id = entries.len();
        match chain.last() {
            Some(&parent) => entries[parent].children.push(id),
            None if entries.is_empty() => {}
            None => {
                return Err(Error::OutlineParse {
                    line: line_idx + 1,
                    message: format!(
                        "there can be only one root, no parent could be found for {label:?}"
                    ),
                });
            }
        }
        entries.push(Entry {
            indent,
            text: label.to_string(),
            children: Vec::new(),
        });
        chain.push(id);
    }

    if entries.is_empty() {
        return Ok(None);
    }
    tracing::trace!(lines = entries.len(), "parsed outline");

    // Children always come after their parent, so a reverse sweep assembles leaves first.
    let mut built: Vec<Option<Node>> = std::iter::repeat_with(|| None)
        .take(entries.len())
        .collect();
    for (id, entry) in entries.iter_mut().enumerate().rev() {
        let children = entry
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[id] = Some(Node::new(std::mem::take(&mut entry.text), children));
    }
    Ok(built[0].take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_by_indentation() {
        let root = parse_outline(
            "Project\n  Research\n    Market\n    Users\n  Design\n\n  Launch\n\tDeploy\n",
        )
        .unwrap()
        .unwrap();
        assert_eq!(root.text, "Project");
        let top: Vec<&str> = root.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(top, vec!["Research", "Design", "Launch"]);
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[2].children[0].text, "Deploy");
    }

    #[test]
    fn dedent_attaches_to_nearest_shallower_line() {
        let root = parse_outline("R\n    a\n        b\n      c\n")
            .unwrap()
            .unwrap();
        // `c` is shallower than `b` but deeper than `a`.
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[0].children[1].text, "c");
    }

    #[test]
    fn second_root_is_rejected() {
        let err = parse_outline("Root\n  child\nOther root\n").unwrap_err();
        match err {
            Error::OutlineParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("only one root"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_absent() {
        assert!(parse_outline("\n   \n").unwrap().is_none());
    }
}
