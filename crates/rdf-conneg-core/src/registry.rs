//! Process-wide format registry.
//!
//! A [`FormatRegistry`] is created once by the host and cloned into whatever
//! needs it; every clone shares the same formats and configuration. Builtin
//! formats sit below the registered ones and cannot be removed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::accept::normalize_mimetype;
use crate::conf::{ConfigKey, MimetypeOverrides, resolve};
use crate::engine::{self, FormatSource};
use crate::format::{self, FormatEntry, Negotiation};
use crate::selector::FormatSelector;

#[derive(Debug, Default)]
struct SharedState {
	formats: HashMap<String, FormatEntry>,
	overrides: MimetypeOverrides,
}

/// Handle to the process-wide format layer and configuration
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
	state: Arc<RwLock<SharedState>>,
}

impl FormatRegistry {
	/// Creates a registry holding only the builtin formats.
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::FormatRegistry;
	///
	/// let registry = FormatRegistry::new();
	/// assert!(registry.contains("application/rdf+xml"));
	/// assert!(!registry.contains("test/moduleformat"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a format for every holder of this registry.
	///
	/// Registering the same mimetype again replaces the previous entry. A
	/// registered entry shadows a builtin one with the same mimetype.
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::FormatRegistry;
	///
	/// let registry = FormatRegistry::new();
	/// let selector = registry.selector();
	///
	/// registry.register("test/moduleformat", "test", false);
	/// assert_eq!(registry.decide("test/moduleformat", false).unwrap().format, "test");
	/// assert_eq!(selector.decide("test/moduleformat", false).unwrap().format, "test");
	/// ```
	pub fn register(&self, mimetype: impl AsRef<str>, format: impl Into<String>, requires_context: bool) {
		let mimetype = normalize_mimetype(mimetype.as_ref());
		let entry = FormatEntry::new(format, requires_context);
		tracing::debug!(%mimetype, format = entry.format(), requires_context, "registered process-wide format");
		self.state.write().formats.insert(mimetype, entry);
	}

	/// Returns the registered or builtin entry for `mimetype`
	pub fn lookup(&self, mimetype: &str) -> Option<FormatEntry> {
		let mimetype = normalize_mimetype(mimetype);
		if let Some(entry) = self.state.read().formats.get(&mimetype) {
			return Some(entry.clone());
		}
		format::builtin_format(&mimetype).cloned()
	}

	pub fn contains(&self, mimetype: &str) -> bool {
		self.lookup(mimetype).is_some()
	}

	/// Returns every resolvable mimetype, sorted
	pub fn mimetypes(&self) -> Vec<String> {
		self.collect_mimetypes(|_| true)
	}

	/// Returns the mimetypes that can be produced without context support, sorted
	pub fn context_free_mimetypes(&self) -> Vec<String> {
		self.collect_mimetypes(|entry| !entry.requires_context())
	}

	fn collect_mimetypes(&self, keep: impl Fn(&FormatEntry) -> bool) -> Vec<String> {
		let state = self.state.read();
		let mut mimetypes = BTreeSet::new();
		for (mimetype, entry) in &state.formats {
			if keep(entry) {
				mimetypes.insert(mimetype.clone());
			}
		}
		for mimetype in format::builtin_mimetypes() {
			if state.formats.contains_key(mimetype) {
				continue;
			}
			if let Some(entry) = format::builtin_format(mimetype)
				&& keep(entry)
			{
				mimetypes.insert(mimetype.to_string());
			}
		}
		mimetypes.into_iter().collect()
	}

	/// Returns the process-wide value of a key, if one is set
	pub fn configured(&self, key: ConfigKey) -> Option<String> {
		self.state.read().overrides.get(key).map(str::to_string)
	}

	/// Sets a process-wide value, seen by every selector without its own value
	pub fn set_config(&self, key: ConfigKey, mimetype: impl AsRef<str>) {
		let mut state = self.state.write();
		state.overrides.set(key, mimetype);
		tracing::debug!(%key, value = state.overrides.get(key), "process-wide mimetype set");
	}

	/// Unsets a process-wide value, falling back to the builtin literal
	pub fn clear_config(&self, key: ConfigKey) {
		self.state.write().overrides.clear(key);
		tracing::debug!(%key, "process-wide mimetype cleared");
	}

	pub fn set_default_mimetype(&self, mimetype: impl AsRef<str>) {
		self.set_config(ConfigKey::DefaultMimetype, mimetype);
	}

	pub fn clear_default_mimetype(&self) {
		self.clear_config(ConfigKey::DefaultMimetype);
	}

	pub fn set_wildcard_mimetype(&self, mimetype: impl AsRef<str>) {
		self.set_config(ConfigKey::WildcardMimetype, mimetype);
	}

	pub fn clear_wildcard_mimetype(&self) {
		self.clear_config(ConfigKey::WildcardMimetype);
	}

	/// Drops every registered format and process-wide setting. Builtins remain.
	pub fn clear(&self) {
		let mut state = self.state.write();
		state.formats.clear();
		state.overrides = MimetypeOverrides::new();
	}

	/// Creates a selector layered on top of this registry
	pub fn selector(&self) -> FormatSelector {
		FormatSelector::new(self)
	}

	/// Negotiates against the process-wide layer only
	pub fn decide<'a>(&self, header: impl Into<Option<&'a str>>, context_aware: bool) -> Option<Negotiation> {
		engine::decide(self, header, context_aware)
	}

	/// Negotiates using the `Accept` header(s) of a request
	pub fn decide_headers(&self, headers: &http::HeaderMap, context_aware: bool) -> Option<Negotiation> {
		let accept = crate::accept_from_headers(headers);
		engine::decide(self, accept.as_deref(), context_aware)
	}

	/// Whether the header explicitly asks for a format known to the process-wide layer
	pub fn wants_rdf<'a>(&self, header: impl Into<Option<&'a str>>) -> bool {
		engine::wants_rdf(self, header)
	}
}

impl FormatSource for FormatRegistry {
	fn lookup(&self, mimetype: &str) -> Option<FormatEntry> {
		FormatRegistry::lookup(self, mimetype)
	}

	fn resolve(&self, key: ConfigKey) -> String {
		resolve(key, None, self.configured(key).as_deref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn registry() -> FormatRegistry {
		FormatRegistry::new()
	}

	#[rstest]
	fn test_register_and_lookup(registry: FormatRegistry) {
		assert!(registry.lookup("test/format").is_none());

		registry.register("Test/Format", "test", false);

		assert_eq!(registry.lookup("test/format"), Some(FormatEntry::new("test", false)));
		assert!(registry.contains("TEST/FORMAT"));
	}

	#[rstest]
	fn test_reregistering_overwrites(registry: FormatRegistry) {
		registry.register("test/format", "first", false);
		registry.register("test/format", "second", true);
		assert_eq!(registry.lookup("test/format"), Some(FormatEntry::new("second", true)));
	}

	#[rstest]
	fn test_registered_entry_shadows_builtin(registry: FormatRegistry) {
		registry.register("text/turtle", "ttl", false);
		assert_eq!(registry.lookup("text/turtle").unwrap().format(), "ttl");

		registry.clear();
		assert_eq!(registry.lookup("text/turtle").unwrap().format(), "turtle");
	}

	#[rstest]
	fn test_clones_share_state(registry: FormatRegistry) {
		let handle = registry.clone();
		handle.register("test/shared", "shared", false);
		handle.set_default_mimetype("text/turtle");

		assert!(registry.contains("test/shared"));
		assert_eq!(
			registry.configured(ConfigKey::DefaultMimetype).as_deref(),
			Some("text/turtle")
		);
	}

	#[rstest]
	fn test_config_set_and_clear(registry: FormatRegistry) {
		assert_eq!(FormatSource::resolve(&registry, ConfigKey::WildcardMimetype), "application/rdf+xml");

		registry.set_wildcard_mimetype("text/turtle");
		assert_eq!(FormatSource::resolve(&registry, ConfigKey::WildcardMimetype), "text/turtle");

		registry.clear_wildcard_mimetype();
		assert_eq!(registry.configured(ConfigKey::WildcardMimetype), None);
		assert_eq!(FormatSource::resolve(&registry, ConfigKey::WildcardMimetype), "application/rdf+xml");
	}

	#[rstest]
	fn test_mimetype_listings(registry: FormatRegistry) {
		registry.register("test/ctxformat", "ctxtest", true);
		registry.register("test/format", "test", false);

		let all = registry.mimetypes();
		assert!(all.contains(&"test/ctxformat".to_string()));
		assert!(all.contains(&"application/n-quads".to_string()));
		assert!(all.windows(2).all(|pair| pair[0] < pair[1]));

		let context_free = registry.context_free_mimetypes();
		assert!(context_free.contains(&"test/format".to_string()));
		assert!(context_free.contains(&"text/turtle".to_string()));
		assert!(!context_free.contains(&"test/ctxformat".to_string()));
		assert!(!context_free.contains(&"application/n-quads".to_string()));
	}

	#[rstest]
	fn test_shadowing_changes_context_listing(registry: FormatRegistry) {
		registry.register("application/n-quads", "nquads", false);
		assert!(
			registry
				.context_free_mimetypes()
				.contains(&"application/n-quads".to_string())
		);
	}

	#[rstest]
	fn test_decide_headers(registry: FormatRegistry) {
		let mut headers = http::HeaderMap::new();
		assert_eq!(registry.decide_headers(&headers, false), Some(Negotiation::builtin_default()));

		headers.append(http::header::ACCEPT, http::HeaderValue::from_static("text/html"));
		headers.append(http::header::ACCEPT, http::HeaderValue::from_static("text/n3;q=0.5"));
		let chosen = registry.decide_headers(&headers, false).unwrap();
		assert_eq!(chosen, Negotiation::new("text/n3", "n3"));
	}

	#[rstest]
	fn test_registry_is_send_and_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<FormatRegistry>();
	}
}
