//! Full-screen views selected by `Route`.

pub mod essays;
pub mod persona;
pub mod post;
