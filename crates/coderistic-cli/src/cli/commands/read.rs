//! Read command handler: fetch one essay and print it as plain text.

use anyhow::Result;
use coderistic_core::config::Config;
use coderistic_core::content::{CONTENT_FALLBACK, ContentLoader, ContentOutcome};
use coderistic_core::markdown::{Block, render_blocks};
use coderistic_core::Catalog;

pub async fn run(config: &Config, catalog: &Catalog, id: &str) -> Result<()> {
    let Some(post) = catalog.find(id) else {
        anyhow::bail!("Unknown post: {id} (see `coderistic posts`)");
    };
    let language = config.language;

    let mut loader = ContentLoader::new(config.content_base()?);
    let request = loader.activate(post, language);
    tracing::debug!(post = %post.id, %language, url = request.url(), "Reading post");

    let body = match request.run().await {
        ContentOutcome::Loaded(text) => text,
        ContentOutcome::Failed(_) | ContentOutcome::Cancelled => CONTENT_FALLBACK.to_string(),
    };

    println!("{}", header(post.title(language), &post.date, &post.reading_time));
    println!();
    print!("{}", render_plain(&body));
    Ok(())
}

fn header(title: &str, date: &str, reading_time: &str) -> String {
    format!("{title}\n{date} · {reading_time}")
}

/// Renders markdown blocks as plain text, one output line per block.
pub fn render_plain(text: &str) -> String {
    let mut out = String::new();
    for block in render_blocks(text) {
        match block {
            Block::Heading { text, .. } => out.push_str(&text.to_uppercase()),
            Block::Paragraph(text) => out.push_str(text),
            Block::Quote(text) => {
                out.push_str("│ ");
                out.push_str(text);
            }
            Block::Spacer => {}
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_blocks() {
        let rendered = render_plain("# Title\n\n## Part\n> Quoted\nBody line");
        assert_eq!(rendered, "TITLE\n\nPART\n│ Quoted\nBody line\n");
    }

    #[test]
    fn test_crlf_lines_are_clean() {
        assert_eq!(render_plain("# A\r\nB\r"), "A\nB\n");
    }
}
