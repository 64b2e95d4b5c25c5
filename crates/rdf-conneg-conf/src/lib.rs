//! # rdf-conneg conf
//!
//! Loads negotiation settings from TOML files and `RDF_CONNEG_*` environment
//! variables and applies them to a registry or selector.
//!
//! ## Settings file
//!
//! ```toml
//! default_mimetype = "text/turtle"
//! wildcard_mimetype = "text/turtle"
//!
//! [[formats]]
//! mimetype = "application/x-custom"
//! format = "custom"
//! requires_context = false
//! ```
//!
//! ## Environment
//!
//! - `RDF_CONNEG_DEFAULT_MIMETYPE`
//! - `RDF_CONNEG_WILDCARD_MIMETYPE`

pub mod env;
pub mod error;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use settings::{FormatDeclaration, NegotiationSettings, is_concrete_mimetype};
