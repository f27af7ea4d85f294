pub mod metadata;
pub mod suggestion;
pub mod types;

pub use metadata::*;
pub use suggestion::*;
pub use types::*;
