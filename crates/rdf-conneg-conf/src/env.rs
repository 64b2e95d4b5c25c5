//! Environment variable overrides
//!
//! Variables take precedence over values loaded from a settings file. Empty
//! values are ignored.

use rdf_conneg_core::ConfigKey;

/// Prefix shared by every recognised variable
pub const ENV_PREFIX: &str = "RDF_CONNEG_";

/// Overrides `default_mimetype`
pub const DEFAULT_MIMETYPE_VAR: &str = "RDF_CONNEG_DEFAULT_MIMETYPE";

/// Overrides `wildcard_mimetype`
pub const WILDCARD_MIMETYPE_VAR: &str = "RDF_CONNEG_WILDCARD_MIMETYPE";

/// Returns the variable that overrides a key
pub fn variable_for(key: ConfigKey) -> &'static str {
	match key {
		ConfigKey::DefaultMimetype => DEFAULT_MIMETYPE_VAR,
		ConfigKey::WildcardMimetype => WILDCARD_MIMETYPE_VAR,
	}
}

/// Collects the non-empty overrides visible through `lookup`
///
/// # Examples
///
/// ```
/// use rdf_conneg_conf::env::read_overrides;
/// use rdf_conneg_core::ConfigKey;
///
/// let overrides = read_overrides(|name| {
///     (name == "RDF_CONNEG_WILDCARD_MIMETYPE").then(|| "text/turtle".to_string())
/// });
/// assert_eq!(overrides, vec![(ConfigKey::WildcardMimetype, "text/turtle".to_string())]);
/// ```
pub fn read_overrides<F>(lookup: F) -> Vec<(ConfigKey, String)>
where
	F: Fn(&str) -> Option<String>,
{
	[ConfigKey::DefaultMimetype, ConfigKey::WildcardMimetype]
		.into_iter()
		.filter_map(|key| {
			let value = lookup(variable_for(key))?;
			let value = value.trim();
			if value.is_empty() {
				None
			} else {
				Some((key, value.to_string()))
			}
		})
		.collect()
}
