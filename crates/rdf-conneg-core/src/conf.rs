//! Resolution of the default and wildcard mimetypes
//!
//! Each key resolves through three tiers: a selector-local value, the
//! process-wide value held by the shared registry, and a builtin literal.
//! Resolution happens on every decision, so a process-wide change is seen by
//! every selector that has not set its own value.

use std::fmt;

use crate::accept::normalize_mimetype;
use crate::format::{BUILTIN_DEFAULT_MIMETYPE, BUILTIN_WILDCARD_MIMETYPE};

/// A configurable mimetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
	/// Returned when the client expressed no preference
	DefaultMimetype,
	/// What `*/*` resolves to
	WildcardMimetype,
}

impl ConfigKey {
	/// The literal used when neither tier above it is set
	pub fn builtin(self) -> &'static str {
		match self {
			Self::DefaultMimetype => BUILTIN_DEFAULT_MIMETYPE,
			Self::WildcardMimetype => BUILTIN_WILDCARD_MIMETYPE,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::DefaultMimetype => "default_mimetype",
			Self::WildcardMimetype => "wildcard_mimetype",
		}
	}
}

impl fmt::Display for ConfigKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Optional values for both keys at one scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimetypeOverrides {
	default_mimetype: Option<String>,
	wildcard_mimetype: Option<String>,
}

impl MimetypeOverrides {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: ConfigKey) -> Option<&str> {
		match key {
			ConfigKey::DefaultMimetype => self.default_mimetype.as_deref(),
			ConfigKey::WildcardMimetype => self.wildcard_mimetype.as_deref(),
		}
	}

	pub fn set(&mut self, key: ConfigKey, mimetype: impl AsRef<str>) {
		*self.slot(key) = Some(normalize_mimetype(mimetype.as_ref()));
	}

	/// Unsets a key so that resolution falls through to the next tier
	pub fn clear(&mut self, key: ConfigKey) {
		*self.slot(key) = None;
	}

	fn slot(&mut self, key: ConfigKey) -> &mut Option<String> {
		match key {
			ConfigKey::DefaultMimetype => &mut self.default_mimetype,
			ConfigKey::WildcardMimetype => &mut self.wildcard_mimetype,
		}
	}
}

/// Returns the first set value among the local and shared tiers, or the builtin literal.
///
/// # Examples
///
/// ```
/// use rdf_conneg_core::conf::{ConfigKey, resolve};
///
/// assert_eq!(resolve(ConfigKey::DefaultMimetype, Some("text/n3"), Some("text/turtle")), "text/n3");
/// assert_eq!(resolve(ConfigKey::DefaultMimetype, None, Some("text/turtle")), "text/turtle");
/// assert_eq!(resolve(ConfigKey::DefaultMimetype, None, None), "application/rdf+xml");
/// ```
pub fn resolve(key: ConfigKey, local: Option<&str>, shared: Option<&str>) -> String {
	local.or(shared).unwrap_or(key.builtin()).to_string()
}
