//! The negotiation algorithm
//!
//! [`decide`] and [`wants_rdf`] work against any [`FormatSource`]. Passing a
//! [`FormatRegistry`](crate::FormatRegistry) gives the process-wide path;
//! passing a [`FormatSelector`](crate::FormatSelector) additionally consults
//! the selector's own formats and settings.

use crate::accept::{AcceptHeader, MediaRange};
use crate::conf::ConfigKey;
use crate::format::{FormatEntry, Negotiation};

/// A layered view of registered formats and configuration
pub trait FormatSource {
	/// Returns the nearest entry registered for `mimetype`
	fn lookup(&self, mimetype: &str) -> Option<FormatEntry>;

	/// Returns the effective value of a configuration key
	fn resolve(&self, key: ConfigKey) -> String;
}

/// Picks the representation to send for an Accept header.
///
/// An absent or blank header yields the configured default. A header that
/// names nothing usable yields `None` (not acceptable), never the default.
///
/// # Examples
///
/// ```
/// use rdf_conneg_core::{FormatRegistry, decide};
///
/// let registry = FormatRegistry::new();
///
/// let chosen = decide(&registry, "text/turtle;q=0.5, application/n-quads;q=0.9", false).unwrap();
/// assert_eq!(chosen.mimetype, "text/turtle");
///
/// let chosen = decide(&registry, "text/turtle;q=0.5, application/n-quads;q=0.9", true).unwrap();
/// assert_eq!(chosen.format, "nquads");
///
/// assert_eq!(decide(&registry, None, false).unwrap().format, "xml");
/// assert!(decide(&registry, "text/strangerdf", false).is_none());
/// ```
pub fn decide<'a, S>(
	source: &S,
	header: impl Into<Option<&'a str>>,
	context_aware: bool,
) -> Option<Negotiation>
where
	S: FormatSource + ?Sized,
{
	let accept = AcceptHeader::from_option(header.into());
	negotiate(source, &accept, context_aware)
}

/// Runs negotiation over an already parsed header
pub fn negotiate<S>(source: &S, accept: &AcceptHeader, context_aware: bool) -> Option<Negotiation>
where
	S: FormatSource + ?Sized,
{
	if accept.is_empty() {
		let chosen = default_negotiation(source);
		tracing::debug!(
			mimetype = %chosen.mimetype,
			format = %chosen.format,
			"no preference expressed, using default"
		);
		return Some(chosen);
	}

	for range in accept.by_preference() {
		if let Some(chosen) = candidate(source, range, context_aware) {
			tracing::debug!(
				mimetype = %chosen.mimetype,
				format = %chosen.format,
				quality = range.quality,
				"negotiated representation"
			);
			return Some(chosen);
		}
	}

	tracing::debug!(context_aware, "no acceptable representation");
	None
}

/// Resolves the default representation.
///
/// The default is returned even when its entry requires context. A default
/// configured to an unregistered mimetype falls back to the builtin default.
pub fn default_negotiation<S>(source: &S) -> Negotiation
where
	S: FormatSource + ?Sized,
{
	let mimetype = source.resolve(ConfigKey::DefaultMimetype);
	match source.lookup(&mimetype) {
		Some(entry) => Negotiation::new(mimetype, entry.format()),
		None => {
			tracing::warn!(
				%mimetype,
				"configured default mimetype is not registered, using builtin default"
			);
			Negotiation::builtin_default()
		}
	}
}

/// Evaluates one media range. `None` excludes the range for good.
fn candidate<S>(source: &S, range: &MediaRange, context_aware: bool) -> Option<Negotiation>
where
	S: FormatSource + ?Sized,
{
	if range.is_refused() {
		tracing::trace!(mimetype = %range.mimetype, "range refused with q=0");
		return None;
	}

	let mimetype = if range.is_wildcard() {
		source.resolve(ConfigKey::WildcardMimetype)
	} else {
		range.mimetype.clone()
	};

	let Some(entry) = source.lookup(&mimetype) else {
		tracing::trace!(range = %range.mimetype, %mimetype, "not registered");
		return None;
	};

	if !entry.is_available(context_aware) {
		tracing::trace!(%mimetype, "requires a context aware source, excluded");
		return None;
	}

	Some(Negotiation::new(mimetype, entry.format()))
}

/// Whether the header explicitly asks for a registered representation.
///
/// Wildcard ranges never count, so a browser's `*/*` does not read as a wish
/// for RDF.
///
/// # Examples
///
/// ```
/// use rdf_conneg_core::{FormatRegistry, wants_rdf};
///
/// let registry = FormatRegistry::new();
/// assert!(wants_rdf(&registry, "text/html, application/rdf+xml"));
/// assert!(!wants_rdf(&registry, "text/html, */*;q=0.2"));
/// assert!(!wants_rdf(&registry, None));
/// ```
pub fn wants_rdf<'a, S>(source: &S, header: impl Into<Option<&'a str>>) -> bool
where
	S: FormatSource + ?Sized,
{
	let accept = AcceptHeader::from_option(header.into());
	accept
		.by_preference()
		.into_iter()
		.filter(|range| !range.is_wildcard() && !range.is_refused())
		.any(|range| source.lookup(&range.mimetype).is_some())
}
