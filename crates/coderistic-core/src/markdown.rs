//! Minimal line-based markdown renderer.
//!
//! Each source line maps to exactly one block. Rules are checked in order
//! and the first match wins; there is no nesting and no inline parsing.
//!
//! | Line              | Block                  |
//! |-------------------|------------------------|
//! | `# text`          | `Heading { level: 1 }` |
//! | `## text`         | `Heading { level: 2 }` |
//! | `### text`        | `Heading { level: 3 }` |
//! | `> text`          | `Quote`                |
//! | blank/whitespace  | `Spacer`               |
//! | anything else     | `Paragraph`            |

use std::str::Split;

/// One display block. Text borrows from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    Heading { level: u8, text: &'a str },
    Quote(&'a str),
    Spacer,
    Paragraph(&'a str),
}

const HEADING_PREFIXES: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];

/// Classifies a single line.
pub fn classify_line(line: &str) -> Block<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    for (prefix, level) in HEADING_PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            return Block::Heading { level, text };
        }
    }
    if let Some(text) = line.strip_prefix("> ") {
        return Block::Quote(text);
    }
    if line.trim().is_empty() {
        return Block::Spacer;
    }
    Block::Paragraph(line)
}

/// Lazily renders `text` into blocks, one per `\n`-separated line.
///
/// Calling this again on the same text yields the same sequence.
pub fn render_blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.split('\n'),
    }
}

/// Iterator returned by [`render_blocks`].
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    lines: Split<'a, char>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(classify_line)
    }
}
