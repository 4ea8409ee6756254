pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod correlation;
pub mod decade;
pub mod error;
pub mod expander;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod profile;
pub mod render;
pub mod schema;
