//! PharmaConnect Core - Shared domain library.
//!
//! This crate provides the types and pure logic used by both web binaries:
//! - `storefront` - Public product catalog
//! - `admin` - Moderation console for orders, pharmacists and products
//!
//! # Architecture
//!
//! Without the `web` feature the core crate contains only types and pure
//! functions - no I/O, no HTTP clients, no sessions. Everything a view does
//! to its local copy of backend data (filtering, optimistic patches, form
//! resets) lives here so it can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, review statuses
//! - [`models`] - Records mirrored from the REST backend
//! - [`catalog`] - Client-side product filtering
//! - [`mirror`] - Optimistic local copies of fetched collections
//! - [`form`] - Add-product form validation
//! - [`view`] - The single view-level error
//! - `http` - Request ID middleware (`web` feature)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod form;
#[cfg(feature = "web")]
pub mod http;
pub mod mirror;
pub mod models;
pub mod types;
pub mod view;

pub use catalog::{CATEGORIES, Category, FEATURED_COUNT, ProductFilter, featured};
pub use form::{FormError, ProductForm};
pub use mirror::{Mirror, Record, ReviewOutcome, Reviewable};
pub use models::{Envelope, NewProduct, Order, Pharmacist, Product};
pub use types::*;
pub use view::ViewError;
