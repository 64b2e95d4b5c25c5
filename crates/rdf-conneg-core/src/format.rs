//! Registered output formats and negotiation results

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Mimetype used when no default has been configured anywhere.
pub const BUILTIN_DEFAULT_MIMETYPE: &str = "application/rdf+xml";

/// Format identifier of [`BUILTIN_DEFAULT_MIMETYPE`].
pub const BUILTIN_DEFAULT_FORMAT: &str = "xml";

/// Mimetype used for `*/*` when no wildcard target has been configured anywhere.
pub const BUILTIN_WILDCARD_MIMETYPE: &str = BUILTIN_DEFAULT_MIMETYPE;

/// Seed formats: (mimetype, format identifier, requires context).
const SEED_FORMATS: &[(&str, &str, bool)] = &[
	(BUILTIN_DEFAULT_MIMETYPE, BUILTIN_DEFAULT_FORMAT, false),
	("application/n-triples", "nt", false),
	("text/n3", "n3", false),
	("text/turtle", "turtle", false),
	("application/ld+json", "json-ld", false),
	("application/n-quads", "nquads", true),
	("application/trix", "trix", true),
	("application/trig", "trig", true),
];

static BUILTIN_FORMATS: Lazy<HashMap<&'static str, FormatEntry>> = Lazy::new(|| {
	SEED_FORMATS
		.iter()
		.map(|&(mimetype, format, requires_context)| {
			(mimetype, FormatEntry::new(format, requires_context))
		})
		.collect()
});

/// Looks up one of the formats that exist unconditionally.
pub fn builtin_format(mimetype: &str) -> Option<&'static FormatEntry> {
	BUILTIN_FORMATS.get(mimetype)
}

/// Returns the mimetypes of every builtin format.
pub fn builtin_mimetypes() -> impl Iterator<Item = &'static str> {
	SEED_FORMATS.iter().map(|&(mimetype, _, _)| mimetype)
}

/// What a mimetype resolves to in a registry layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
	format: String,
	requires_context: bool,
}

impl FormatEntry {
	/// Creates a new entry
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::FormatEntry;
	///
	/// let quads = FormatEntry::new("nquads", true);
	/// assert_eq!(quads.format(), "nquads");
	/// assert!(!quads.is_available(false));
	/// assert!(quads.is_available(true));
	/// ```
	pub fn new(format: impl Into<String>, requires_context: bool) -> Self {
		Self {
			format: format.into(),
			requires_context,
		}
	}

	/// The internal format identifier handed to a serializer
	pub fn format(&self) -> &str {
		&self.format
	}

	/// Whether producing this format needs a named-graph aware data source
	pub fn requires_context(&self) -> bool {
		self.requires_context
	}

	/// Whether this format can be produced from a source with the given context support
	pub fn is_available(&self, context_aware: bool) -> bool {
		!self.requires_context || context_aware
	}
}

/// The outcome of a successful negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
	/// Mimetype to send as the response content type
	pub mimetype: String,
	/// Format identifier used to pick a serializer
	pub format: String,
}

impl Negotiation {
	pub fn new(mimetype: impl Into<String>, format: impl Into<String>) -> Self {
		Self {
			mimetype: mimetype.into(),
			format: format.into(),
		}
	}

	/// The builtin default representation
	pub fn builtin_default() -> Self {
		Self::new(BUILTIN_DEFAULT_MIMETYPE, BUILTIN_DEFAULT_FORMAT)
	}

	/// Splits into a `(mimetype, format)` pair
	pub fn into_pair(self) -> (Option<String>, Option<String>) {
		(Some(self.mimetype), Some(self.format))
	}

	/// Flattens a negotiation outcome into a `(mimetype, format)` pair.
	///
	/// A not-acceptable outcome becomes `(None, None)`; one half is never set
	/// without the other.
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::Negotiation;
	///
	/// assert_eq!(Negotiation::pair_of(None), (None, None));
	/// assert_eq!(
	///     Negotiation::pair_of(Some(Negotiation::new("text/n3", "n3"))),
	///     (Some("text/n3".to_string()), Some("n3".to_string())),
	/// );
	/// ```
	pub fn pair_of(outcome: Option<Self>) -> (Option<String>, Option<String>) {
		outcome.map_or((None, None), Self::into_pair)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_builtin_default_is_never_context_bound() {
		let entry = builtin_format(BUILTIN_DEFAULT_MIMETYPE).unwrap();
		assert_eq!(entry.format(), BUILTIN_DEFAULT_FORMAT);
		assert!(!entry.requires_context());
	}

	#[rstest]
	#[case("application/rdf+xml", "xml", false)]
	#[case("application/n-triples", "nt", false)]
	#[case("text/n3", "n3", false)]
	#[case("text/turtle", "turtle", false)]
	#[case("application/ld+json", "json-ld", false)]
	#[case("application/n-quads", "nquads", true)]
	#[case("application/trix", "trix", true)]
	#[case("application/trig", "trig", true)]
	fn test_builtin_formats(
		#[case] mimetype: &str,
		#[case] format: &str,
		#[case] requires_context: bool,
	) {
		assert_eq!(
			builtin_format(mimetype),
			Some(&FormatEntry::new(format, requires_context))
		);
	}

	#[rstest]
	#[case("application/xml")]
	#[case("text/html")]
	#[case("*/*")]
	fn test_unknown_mimetypes_are_not_builtin(#[case] mimetype: &str) {
		assert!(builtin_format(mimetype).is_none());
	}

	#[rstest]
	fn test_builtin_mimetypes_lists_every_seed() {
		assert_eq!(builtin_mimetypes().count(), SEED_FORMATS.len());
		assert!(builtin_mimetypes().all(|m| builtin_format(m).is_some()));
	}
}
