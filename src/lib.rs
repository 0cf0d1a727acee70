//! Generate Knative build, serving, secret, and service-account documents.
//!
//! The [`knative`] module holds the typed documents and the option builders;
//! [`encoding`] parses the compact strings the CLI accepts and [`request`]
//! turns CLI inputs into option lists. [`document::Document`] ties the kinds
//! together for serialization.
pub mod credentials;
pub mod document;
pub mod encoding;
pub mod error;
pub mod knative;
pub mod kubectl;
pub mod request;

pub use document::{Document, OutputFormat};
pub use error::ParseError;
