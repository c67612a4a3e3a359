//! Post catalog: the static table of essays and social links.
//!
//! The built-in catalog is embedded from `assets/catalog.toml` at compile
//! time. A custom catalog can replace it via `catalog_path` in the config.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::language::Language;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

/// Essay bodies shipped with the binary, keyed by their relative URL in the
/// built-in catalog.
const BUNDLED_CONTENTS: &[(&str, &str)] = &[
    (
        "contents/quiet-code-en.md",
        include_str!("../assets/contents/quiet-code-en.md"),
    ),
    (
        "contents/quiet-code-kh.md",
        include_str!("../assets/contents/quiet-code-kh.md"),
    ),
    (
        "contents/digital-stoicism-en.md",
        include_str!("../assets/contents/digital-stoicism-en.md"),
    ),
    (
        "contents/digital-stoicism-kh.md",
        include_str!("../assets/contents/digital-stoicism-kh.md"),
    ),
];

/// Looks up a bundled essay body by relative URL.
pub fn bundled_content(relative_url: &str) -> Option<&'static str> {
    let key = relative_url.trim_start_matches("./");
    BUNDLED_CONTENTS
        .iter()
        .find(|(path, _)| *path == key)
        .map(|(_, text)| *text)
}

/// A published essay. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub title_kh: String,
    pub date: String,
    pub reading_time: String,
    pub excerpt: String,
    pub excerpt_kh: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Body in the primary language
    pub content_url: String,
    /// Body in the secondary language
    pub content_url_kh: String,
}

impl Post {
    pub fn title(&self, language: Language) -> &str {
        match language {
            Language::En => &self.title,
            Language::Kh => &self.title_kh,
        }
    }

    pub fn excerpt(&self, language: Language) -> &str {
        match language {
            Language::En => &self.excerpt,
            Language::Kh => &self.excerpt_kh,
        }
    }

    /// URL of the body for the given language.
    pub fn content_url(&self, language: Language) -> &str {
        if language.is_secondary() {
            &self.content_url_kh
        } else {
            &self.content_url
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Shown under "Branding"
    Public,
    /// Shown under "Private Signal"
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub kind: LinkKind,
}

/// The full static table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "post")]
    posts: Vec<Post>,
    #[serde(default, rename = "link")]
    links: Vec<SocialLink>,
}

impl Catalog {
    /// Returns the catalog embedded in the binary.
    ///
    /// # Errors
    /// Returns an error if the embedded table fails validation.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse catalog from {}", path.display()))
    }

    /// Loads the catalog at `path`, or the built-in one when unset.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::builtin(),
        }
    }

    /// Parses and validates a catalog document.
    ///
    /// # Errors
    /// Returns an error on malformed TOML, empty ids, or duplicate ids.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for post in &self.posts {
            if post.id.trim().is_empty() {
                bail!("Post with title '{}' has an empty id", post.title);
            }
            if !seen.insert(post.id.as_str()) {
                bail!("Duplicate post id: {}", post.id);
            }
        }
        Ok(())
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn links(&self, kind: LinkKind) -> impl Iterator<Item = &SocialLink> {
        self.links.iter().filter(move |link| link.kind == kind)
    }

}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_builtin_catalog_has_both_essays() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["the-art-of-quiet-code", "digital-stoicism"]);
    }

    #[test]
    fn test_builtin_content_is_bundled_for_every_post() {
        let catalog = Catalog::builtin().unwrap();
        for post in catalog.posts() {
            for &language in Language::all() {
                let url = post.content_url(language);
                assert!(
                    bundled_content(url).is_some(),
                    "missing bundled content for {url}"
                );
            }
        }
    }

    #[test]
    fn test_content_url_selects_by_language() {
        let catalog = Catalog::builtin().unwrap();
        let post = catalog.find("digital-stoicism").unwrap();
        assert_eq!(
            post.content_url(Language::En),
            "contents/digital-stoicism-en.md"
        );
        assert_eq!(
            post.content_url(Language::Kh),
            "contents/digital-stoicism-kh.md"
        );
    }

    #[test]
    fn test_links_split_by_kind() {
        let catalog = Catalog::builtin().unwrap();
        let public: Vec<&str> = catalog
            .links(LinkKind::Public)
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(public, ["YouTube", "Facebook", "Telegram"]);
        assert_eq!(catalog.links(LinkKind::Private).count(), 3);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let doc = r#"
[[post]]
id = "same"
title = "A"
title_kh = "A"
date = "d"
reading_time = "1 min"
excerpt = "e"
excerpt_kh = "e"
content_url = "a.md"
content_url_kh = "a-kh.md"

[[post]]
id = "same"
title = "B"
title_kh = "B"
date = "d"
reading_time = "1 min"
excerpt = "e"
excerpt_kh = "e"
content_url = "b.md"
content_url_kh = "b-kh.md"
"#;
        let err = Catalog::from_toml(doc).unwrap_err();
        assert!(err.to_string().contains("Duplicate post id"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
[[post]]
id = "only"
title = "Only"
title_kh = "Only"
date = "Today"
reading_time = "1 min read"
excerpt = "One post."
excerpt_kh = "One post."
tags = ["solo"]
content_url = "only.md"
content_url_kh = "only-kh.md"
"#,
        )
        .unwrap();

        let catalog = Catalog::load_from(&path).unwrap();
        assert_eq!(catalog.posts().len(), 1);
        assert!(catalog.find("only").is_some());
        assert_eq!(catalog.links(LinkKind::Public).count(), 0);
    }

    #[test]
    fn test_resolve_missing_file_errors() {
        let dir = tempdir().unwrap();
        let result = Catalog::resolve(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }
}
