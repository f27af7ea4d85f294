pub mod error;
pub mod introspection;
pub mod models;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use introspection::TypeIntrospector;
pub use models::*;
