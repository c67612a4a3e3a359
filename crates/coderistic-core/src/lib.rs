//! Core library for the Coderistic reader.
//!
//! Holds everything that is independent of the terminal UI: the post
//! catalog, the content loader, the wisdom streamer, the line-based
//! markdown renderer, search, configuration and logging setup.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod language;
pub mod logging;
pub mod markdown;
pub mod search;
pub mod strings;
pub mod wisdom;

pub use catalog::{Catalog, LinkKind, Post, SocialLink};
pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use language::{Language, Theme};
