pub mod builder;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod models;
pub mod reporter;
pub mod source;

// Re-export commonly used items
pub use builder::*;
pub use classifier::*;
pub use config::*;
pub use dispatcher::*;
pub use engine::*;
pub use error::*;
pub use models::*;
pub use reporter::*;
pub use source::*;
