//! Data models for Rango

pub mod category;
pub mod page;
pub mod search;
pub mod visit;

// Re-export commonly used types
pub use category::{Category, CategoryDetail};
pub use page::Page;
pub use search::SearchResult;
pub use visit::{SessionState, VisitRecord};
