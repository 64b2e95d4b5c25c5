//! Error types for loading and applying negotiation settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or applying settings.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Settings file could not be read.
	#[error("IO error reading {}: {source}", .path.display())]
	Io {
		/// File that failed to load.
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Settings document is not valid TOML or does not match the schema.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Settings could not be rendered as TOML.
	#[error("TOML serialization error: {0}")]
	TomlSerialize(#[from] toml::ser::Error),

	/// A mimetype is not of the form `type/subtype` or is a wildcard.
	#[error("Invalid mimetype for {field}: {value:?}")]
	InvalidMimetype {
		/// Setting that holds the value.
		field: String,
		/// Offending value.
		value: String,
	},

	/// A format declaration has an empty format identifier.
	#[error("Empty format identifier for mimetype {0}")]
	EmptyFormat(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
