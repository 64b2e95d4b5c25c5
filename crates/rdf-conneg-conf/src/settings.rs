//! Declarative negotiation settings
//!
//! Settings are loaded from TOML, optionally overridden by environment
//! variables, validated, and then applied either process-wide (to a
//! [`FormatRegistry`]) or to a single [`FormatSelector`].

use std::fs;
use std::path::Path;

use rdf_conneg_core::{ConfigKey, FormatRegistry, FormatSelector, WILDCARD};
use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::{SettingsError, SettingsResult};

/// One additional output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatDeclaration {
	pub mimetype: String,
	pub format: String,
	#[serde(default)]
	pub requires_context: bool,
}

impl FormatDeclaration {
	pub fn new(mimetype: impl Into<String>, format: impl Into<String>, requires_context: bool) -> Self {
		Self {
			mimetype: mimetype.into(),
			format: format.into(),
			requires_context,
		}
	}
}

/// Settings for one negotiation scope
///
/// # Examples
///
/// ```
/// use rdf_conneg_conf::NegotiationSettings;
/// use rdf_conneg_core::FormatRegistry;
///
/// let settings = NegotiationSettings::from_toml_str(r#"
///     wildcard_mimetype = "text/turtle"
///
///     [[formats]]
///     mimetype = "application/x-custom"
///     format = "custom"
/// "#).unwrap();
///
/// let registry = FormatRegistry::new();
/// settings.apply_to_registry(&registry).unwrap();
///
/// assert_eq!(registry.decide("*/*", false).unwrap().format, "turtle");
/// assert_eq!(registry.decide("application/x-custom", false).unwrap().format, "custom");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NegotiationSettings {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_mimetype: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wildcard_mimetype: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub formats: Vec<FormatDeclaration>,
}

impl NegotiationSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), formats = settings.formats.len(), "loaded negotiation settings");
		Ok(settings)
	}

	/// Renders the settings back to TOML
	pub fn to_toml_string(&self) -> SettingsResult<String> {
		Ok(toml::to_string(self)?)
	}

	/// Adds a format declaration
	pub fn with_format(mut self, mimetype: impl Into<String>, format: impl Into<String>, requires_context: bool) -> Self {
		self.formats
			.push(FormatDeclaration::new(mimetype, format, requires_context));
		self
	}

	pub fn get(&self, key: ConfigKey) -> Option<&str> {
		match key {
			ConfigKey::DefaultMimetype => self.default_mimetype.as_deref(),
			ConfigKey::WildcardMimetype => self.wildcard_mimetype.as_deref(),
		}
	}

	pub fn set(&mut self, key: ConfigKey, mimetype: impl Into<String>) {
		let slot = match key {
			ConfigKey::DefaultMimetype => &mut self.default_mimetype,
			ConfigKey::WildcardMimetype => &mut self.wildcard_mimetype,
		};
		*slot = Some(mimetype.into());
	}

	/// Applies `RDF_CONNEG_*` variables from the process environment
	pub fn with_env_overrides(self) -> Self {
		self.with_env_lookup(|name| std::env::var(name).ok())
	}

	/// Applies overrides read through `lookup` instead of the process environment
	pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		for (key, value) in env::read_overrides(lookup) {
			tracing::debug!(%key, %value, "setting overridden from environment");
			self.set(key, value);
		}
		self
	}

	/// Checks every mimetype and format identifier
	pub fn validate(&self) -> SettingsResult<()> {
		for key in [ConfigKey::DefaultMimetype, ConfigKey::WildcardMimetype] {
			if let Some(value) = self.get(key) {
				check_mimetype(key.as_str(), value)?;
			}
		}
		for declaration in &self.formats {
			check_mimetype("formats.mimetype", &declaration.mimetype)?;
			if declaration.format.trim().is_empty() {
				return Err(SettingsError::EmptyFormat(declaration.mimetype.clone()));
			}
		}
		Ok(())
	}

	/// Registers the formats and sets the mimetypes process-wide
	///
	/// Keys left unset here leave the registry's current values alone.
	pub fn apply_to_registry(&self, registry: &FormatRegistry) -> SettingsResult<()> {
		self.validate()?;
		for declaration in &self.formats {
			registry.register(
				&declaration.mimetype,
				declaration.format.trim(),
				declaration.requires_context,
			);
		}
		for key in [ConfigKey::DefaultMimetype, ConfigKey::WildcardMimetype] {
			if let Some(value) = self.get(key) {
				registry.set_config(key, value);
			}
		}
		Ok(())
	}

	/// Registers the formats and sets the mimetypes on one selector only
	pub fn apply_to_selector(&self, selector: &mut FormatSelector) -> SettingsResult<()> {
		self.validate()?;
		for declaration in &self.formats {
			selector.register(
				&declaration.mimetype,
				declaration.format.trim(),
				declaration.requires_context,
			);
		}
		for key in [ConfigKey::DefaultMimetype, ConfigKey::WildcardMimetype] {
			if let Some(value) = self.get(key) {
				selector.set_config(key, value);
			}
		}
		Ok(())
	}
}

/// Accepts `type/subtype` without wildcards, parameters or whitespace.
pub fn is_concrete_mimetype(value: &str) -> bool {
	let value = value.trim();
	if value == WILDCARD || value.contains(['*', ';', ',']) || value.contains(char::is_whitespace) {
		return false;
	}
	match value.split_once('/') {
		Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/'),
		None => false,
	}
}

fn check_mimetype(field: &str, value: &str) -> SettingsResult<()> {
	if is_concrete_mimetype(value) {
		Ok(())
	} else {
		Err(SettingsError::InvalidMimetype {
			field: field.to_string(),
			value: value.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("text/turtle", true)]
	#[case(" application/rdf+xml ", true)]
	#[case("*/*", false)]
	#[case("text/*", false)]
	#[case("text", false)]
	#[case("/turtle", false)]
	#[case("text/", false)]
	#[case("text/turtle;q=0.5", false)]
	#[case("text/tur tle", false)]
	#[case("a/b/c", false)]
	fn test_is_concrete_mimetype(#[case] value: &str, #[case] expected: bool) {
		assert_eq!(is_concrete_mimetype(value), expected);
	}

	#[rstest]
	fn test_validate_rejects_wildcard_default() {
		let mut settings = NegotiationSettings::new();
		settings.set(ConfigKey::DefaultMimetype, "*/*");
		let err = settings.validate().unwrap_err();
		assert!(matches!(err, SettingsError::InvalidMimetype { ref field, .. } if field == "default_mimetype"));
	}

	#[rstest]
	fn test_validate_rejects_empty_format() {
		let settings = NegotiationSettings::new().with_format("text/custom", "  ", false);
		assert!(matches!(settings.validate(), Err(SettingsError::EmptyFormat(m)) if m == "text/custom"));
	}

	#[rstest]
	fn test_env_lookup_overrides_file_values() {
		let settings = NegotiationSettings::from_toml_str(r#"default_mimetype = "text/n3""#)
			.unwrap()
			.with_env_lookup(|name| (name == env::DEFAULT_MIMETYPE_VAR).then(|| "text/turtle".to_string()));
		assert_eq!(settings.default_mimetype.as_deref(), Some("text/turtle"));
		assert_eq!(settings.wildcard_mimetype, None);
	}

	#[rstest]
	fn test_invalid_settings_are_not_applied() {
		let registry = FormatRegistry::new();
		let settings = NegotiationSettings::new()
			.with_format("text/custom", "custom", false)
			.with_format("text/*", "broken", false);

		assert!(settings.apply_to_registry(&registry).is_err());
		assert!(!registry.contains("text/custom"));
	}
}
