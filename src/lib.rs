//! # rdf-conneg
//!
//! HTTP content negotiation for RDF representations.
//!
//! Given a request's `Accept` header and whether the backing store supports
//! named graphs, rdf-conneg picks the mimetype to respond with and the format
//! identifier of the serializer to use. It does no serialization and no I/O;
//! a framework integration calls it once per request and answers
//! `406 Not Acceptable` when it returns `None`.
//!
//! ## Feature Flags
//!
//! - `conf` (default) - TOML and environment based settings via [`conf`]
//!
//! ## Quick Example
//!
//! ```rust
//! use rdf_conneg::prelude::*;
//!
//! // Created once at startup and shared by handle
//! let registry = FormatRegistry::new();
//! registry.register("application/x-custom", "custom", false);
//!
//! // One selector per endpoint, with its own extra formats if needed
//! let mut selector = registry.selector();
//! selector.register("text/x-local", "local", false);
//!
//! // A client that asked for nothing gets the default
//! let chosen = selector.decide(None, false).unwrap();
//! assert_eq!(chosen.mimetype, "application/rdf+xml");
//!
//! // Quads need a store that supports named graphs
//! assert!(selector.decide("application/n-quads", false).is_none());
//! assert_eq!(selector.decide("application/n-quads", true).unwrap().format, "nquads");
//!
//! // Browsers send */*, which is not a request for RDF
//! assert!(!selector.wants_rdf("text/html,*/*;q=0.8"));
//! ```

pub use rdf_conneg_core as negotiation;
pub use rdf_conneg_core::{
	AcceptHeader, ConfigKey, FormatEntry, FormatRegistry, FormatSelector, FormatSource,
	MediaRange, Negotiation, decide, negotiate, wants_rdf,
};

#[cfg(feature = "conf")]
pub use rdf_conneg_conf as conf;

/// Commonly used types
pub mod prelude {
	pub use rdf_conneg_core::{
		ConfigKey, FormatEntry, FormatRegistry, FormatSelector, Negotiation, decide, wants_rdf,
	};

	#[cfg(feature = "conf")]
	pub use rdf_conneg_conf::{NegotiationSettings, SettingsError, SettingsResult};
}
