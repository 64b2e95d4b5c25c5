//! # rdf-conneg core
//!
//! Chooses which RDF representation to send for a request's `Accept` header.
//!
//! A [`FormatRegistry`] holds the process-wide formats and settings and is
//! shared by handle. A [`FormatSelector`] adds formats and settings of its own
//! on top of a registry. Both answer two questions:
//!
//! - [`decide`]: which `(mimetype, format)` to respond with, or `None` when
//!   nothing the client asked for can be produced
//! - [`wants_rdf`]: whether the client explicitly asked for a registered
//!   representation, ignoring `*/*`
//!
//! ```
//! use rdf_conneg_core::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! let mut selector = registry.selector();
//! selector.set_wildcard_mimetype("text/custom");
//! selector.register("text/custom", "turtle", false);
//!
//! let chosen = selector
//!     .decide("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8", false)
//!     .unwrap();
//! assert_eq!(chosen.mimetype, "text/custom");
//! assert_eq!(chosen.format, "turtle");
//! ```

pub mod accept;
pub mod conf;
pub mod engine;
pub mod format;
pub mod registry;
pub mod selector;

pub use accept::{AcceptHeader, MediaRange, WILDCARD};
pub use conf::{ConfigKey, MimetypeOverrides};
pub use engine::{FormatSource, decide, negotiate, wants_rdf};
pub use format::{
	BUILTIN_DEFAULT_FORMAT, BUILTIN_DEFAULT_MIMETYPE, BUILTIN_WILDCARD_MIMETYPE, FormatEntry,
	Negotiation,
};
pub use registry::FormatRegistry;
pub use selector::FormatSelector;

/// Joins every UTF-8 `Accept` value of a request; `None` when there is none.
pub(crate) fn accept_from_headers(headers: &http::HeaderMap) -> Option<String> {
	let values: Vec<&str> = headers
		.get_all(http::header::ACCEPT)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.collect();
	if values.is_empty() {
		None
	} else {
		Some(values.join(","))
	}
}
