//! In-memory email search
//!
//! Whitespace tokenizer, inverted index and prefix query resolution over
//! the currently loaded email set.

pub mod filter;
pub mod index;
pub mod tokenizer;

pub use filter::FilterCategory;
pub use index::InvertedIndex;
pub use tokenizer::tokenize;
