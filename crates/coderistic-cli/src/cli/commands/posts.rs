//! Posts command handler.

use coderistic_core::{Catalog, Language};

pub fn list(catalog: &Catalog, language: Language) {
    if catalog.posts().is_empty() {
        println!("No posts found.");
        return;
    }

    let id_width = catalog
        .posts()
        .iter()
        .map(|post| post.id.len())
        .max()
        .unwrap_or(0);
    for post in catalog.posts() {
        println!(
            "{:<id_width$}  {}  {}",
            post.id,
            post.date,
            post.title(language)
        );
    }
}
