//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (holds each panel's mirrored collections)

pub mod session;

pub use pharmaconnect_core::http::request_id_middleware;
pub use session::create_session_layer;
