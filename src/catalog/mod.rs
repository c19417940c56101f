//! Catalog generation.
//!
//! Turns a seed and a locale bank into pages of [`SongRecord`]s. Metadata
//! for a page comes from one stream salted with the page number; likes come
//! from a separate stream per global index so page size never affects them.
//!
//! [`SongRecord`]: crate::types::SongRecord

pub mod generator;
pub mod likes;

// Re-export commonly used items
pub use generator::{
    build_page, build_page_with, DrawKind, PageParams, PageRequest, BURN_IN_DRAWS,
    ITEM_DRAW_PROTOCOL, MAX_PAGE_SIZE,
};
pub use likes::{likes_for, likes_from_avg, likes_stream};
