/// Statik - an embeddable static file resolver
///
/// This crate serves files from a filesystem directory in response to
/// path-based requests, with features like:
/// - Slash-collapsing and trailing-slash redirects
/// - Directory index resolution
/// - Dotfile policies
/// - Standalone handler and middleware modes for axum hosts
// Re-export public modules with explicit visibility controls
pub mod config;
pub mod ports;

// These modules are implementation details and should not be directly used by users
pub(crate) mod adapters;
pub(crate) mod core;

// Re-export the specific types needed by embedding servers
pub use crate::adapters::file_system::TokioFileProbe;
pub use crate::adapters::handler::StaticHandler;
pub use crate::adapters::middleware::{create_static_middleware, serve_static};
pub use crate::core::{ResolveError, ResolveResult, StaticResolver};
