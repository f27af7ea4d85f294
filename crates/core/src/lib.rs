pub mod error;
pub mod logging;
pub mod util;

pub mod cache;
pub mod classify;
pub mod engine;
pub mod node;
pub mod resolve;
pub mod service;
pub mod trie;

pub use error::Result;
pub use resolve::ResolvedPath;
pub use service::SuggestionService;
