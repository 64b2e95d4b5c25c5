//! Per-owner negotiation with private formats and settings

use std::collections::HashMap;

use crate::accept::normalize_mimetype;
use crate::conf::{ConfigKey, MimetypeOverrides, resolve};
use crate::engine::{self, FormatSource};
use crate::format::{FormatEntry, Negotiation};
use crate::registry::FormatRegistry;

/// Negotiates against its own formats first, then the shared registry.
///
/// Formats registered on a selector are invisible to the shared registry and
/// to other selectors. Settings left unset on the selector follow the shared
/// registry's current values.
///
/// # Examples
///
/// ```
/// use rdf_conneg_core::FormatRegistry;
///
/// let registry = FormatRegistry::new();
/// let mut selector = registry.selector();
///
/// selector.register("test/instanceformat", "test", false);
/// assert_eq!(selector.decide("test/instanceformat", false).unwrap().format, "test");
/// assert!(registry.decide("test/instanceformat", false).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FormatSelector {
	shared: FormatRegistry,
	formats: HashMap<String, FormatEntry>,
	overrides: MimetypeOverrides,
}

impl FormatSelector {
	pub fn new(shared: &FormatRegistry) -> Self {
		Self {
			shared: shared.clone(),
			formats: HashMap::new(),
			overrides: MimetypeOverrides::new(),
		}
	}

	/// The shared registry this selector falls back to
	pub fn shared(&self) -> &FormatRegistry {
		&self.shared
	}

	/// Registers a format visible only to this selector
	pub fn register(&mut self, mimetype: impl AsRef<str>, format: impl Into<String>, requires_context: bool) {
		let mimetype = normalize_mimetype(mimetype.as_ref());
		let entry = FormatEntry::new(format, requires_context);
		tracing::debug!(%mimetype, format = entry.format(), requires_context, "registered selector format");
		self.formats.insert(mimetype, entry);
	}

	/// Returns the nearest entry: selector, then shared registry, then builtin
	pub fn lookup(&self, mimetype: &str) -> Option<FormatEntry> {
		let mimetype = normalize_mimetype(mimetype);
		match self.formats.get(&mimetype) {
			Some(entry) => Some(entry.clone()),
			None => self.shared.lookup(&mimetype),
		}
	}

	pub fn contains(&self, mimetype: &str) -> bool {
		self.lookup(mimetype).is_some()
	}

	/// Returns every mimetype this selector can resolve, sorted
	pub fn mimetypes(&self) -> Vec<String> {
		let mut mimetypes = self.shared.mimetypes();
		mimetypes.extend(self.formats.keys().cloned());
		mimetypes.sort();
		mimetypes.dedup();
		mimetypes
	}

	/// Returns the selector's own value of a key, if one is set
	pub fn configured(&self, key: ConfigKey) -> Option<&str> {
		self.overrides.get(key)
	}

	/// Returns the value of a key after falling through every tier
	pub fn effective(&self, key: ConfigKey) -> String {
		FormatSource::resolve(self, key)
	}

	pub fn set_config(&mut self, key: ConfigKey, mimetype: impl AsRef<str>) {
		self.overrides.set(key, mimetype);
	}

	/// Unsets the selector's value so the shared value applies again
	pub fn clear_config(&mut self, key: ConfigKey) {
		self.overrides.clear(key);
	}

	pub fn set_default_mimetype(&mut self, mimetype: impl AsRef<str>) {
		self.set_config(ConfigKey::DefaultMimetype, mimetype);
	}

	pub fn clear_default_mimetype(&mut self) {
		self.clear_config(ConfigKey::DefaultMimetype);
	}

	pub fn set_wildcard_mimetype(&mut self, mimetype: impl AsRef<str>) {
		self.set_config(ConfigKey::WildcardMimetype, mimetype);
	}

	pub fn clear_wildcard_mimetype(&mut self) {
		self.clear_config(ConfigKey::WildcardMimetype);
	}

	/// Picks the representation for an Accept header; `None` means not acceptable
	pub fn decide<'a>(&self, header: impl Into<Option<&'a str>>, context_aware: bool) -> Option<Negotiation> {
		engine::decide(self, header, context_aware)
	}

	/// Negotiates using the `Accept` header(s) of a request
	pub fn decide_headers(&self, headers: &http::HeaderMap, context_aware: bool) -> Option<Negotiation> {
		let accept = crate::accept_from_headers(headers);
		engine::decide(self, accept.as_deref(), context_aware)
	}

	/// Whether the header explicitly asks for a format this selector knows
	pub fn wants_rdf<'a>(&self, header: impl Into<Option<&'a str>>) -> bool {
		engine::wants_rdf(self, header)
	}
}

impl FormatSource for FormatSelector {
	fn lookup(&self, mimetype: &str) -> Option<FormatEntry> {
		FormatSelector::lookup(self, mimetype)
	}

	fn resolve(&self, key: ConfigKey) -> String {
		resolve(key, self.overrides.get(key), self.shared.configured(key).as_deref())
	}
}
