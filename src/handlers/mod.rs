//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `assets` - Static asset surface backed by the versioned cache
//! - `speak` - Text-to-speech relay endpoint

pub mod api;
pub mod assets;
pub mod speak;
