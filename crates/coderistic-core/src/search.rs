//! Post search: a case-insensitive substring predicate.

use crate::catalog::Post;
use crate::language::Language;

/// Returns true if `post` matches an already-lowercased query.
///
/// Checks the title and excerpt for `language`, then every tag.
pub fn matches(post: &Post, query_lower: &str, language: Language) -> bool {
    post.title(language).to_lowercase().contains(query_lower)
        || post.excerpt(language).to_lowercase().contains(query_lower)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query_lower))
}

/// Filters posts by `query`. An empty query returns every post.
pub fn filter<'a>(posts: &'a [Post], query: &str, language: Language) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }
    let query_lower = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches(post, &query_lower, language))
        .collect()
}
