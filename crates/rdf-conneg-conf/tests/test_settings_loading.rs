use std::io::Write;

use rdf_conneg_conf::{FormatDeclaration, NegotiationSettings, SettingsError};
use rdf_conneg_core::{ConfigKey, FormatRegistry, Negotiation};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

const SETTINGS: &str = r#"
default_mimetype = "text/turtle"
wildcard_mimetype = "application/x-custom"

[[formats]]
mimetype = "application/x-custom"
format = "custom"

[[formats]]
mimetype = "application/x-quads"
format = "xquads"
requires_context = true
"#;

#[fixture]
fn settings_file() -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(SETTINGS.as_bytes()).unwrap();
	file
}

#[rstest]
fn test_load_from_file(settings_file: NamedTempFile) {
	let settings = NegotiationSettings::from_file(settings_file.path()).unwrap();

	assert_eq!(settings.default_mimetype.as_deref(), Some("text/turtle"));
	assert_eq!(settings.wildcard_mimetype.as_deref(), Some("application/x-custom"));
	assert_eq!(
		settings.formats,
		vec![
			FormatDeclaration::new("application/x-custom", "custom", false),
			FormatDeclaration::new("application/x-quads", "xquads", true),
		]
	);
}

#[rstest]
fn test_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	let err = NegotiationSettings::from_file(&path).unwrap_err();

	assert!(matches!(err, SettingsError::Io { .. }));
	assert!(err.to_string().contains("absent.toml"));
}

#[rstest]
#[case("default_mimetype = 3")]
#[case("unknown_key = \"text/turtle\"")]
#[case("[[formats]]\nmimetype = \"text/custom\"")]
fn test_malformed_documents_are_rejected(#[case] source: &str) {
	let err = NegotiationSettings::from_toml_str(source).unwrap_err();
	assert!(matches!(err, SettingsError::Toml(_)));
}

#[rstest]
fn test_empty_document_is_default() {
	assert_eq!(
		NegotiationSettings::from_toml_str("").unwrap(),
		NegotiationSettings::default()
	);
}

#[rstest]
fn test_apply_to_registry(settings_file: NamedTempFile) {
	let registry = FormatRegistry::new();
	let selector = registry.selector();
	NegotiationSettings::from_file(settings_file.path())
		.unwrap()
		.apply_to_registry(&registry)
		.unwrap();

	assert_eq!(selector.decide(None, false), Some(Negotiation::new("text/turtle", "turtle")));
	assert_eq!(
		registry.decide("text/html, */*;q=0.1", false),
		Some(Negotiation::new("application/x-custom", "custom"))
	);
	assert_eq!(registry.decide("application/x-quads", false), None);
	assert_eq!(registry.decide("application/x-quads", true).unwrap().format, "xquads");
}

#[rstest]
fn test_apply_to_selector_stays_local(settings_file: NamedTempFile) {
	let registry = FormatRegistry::new();
	let mut selector = registry.selector();
	NegotiationSettings::from_file(settings_file.path())
		.unwrap()
		.apply_to_selector(&mut selector)
		.unwrap();

	assert_eq!(selector.configured(ConfigKey::DefaultMimetype), Some("text/turtle"));
	assert!(selector.contains("application/x-custom"));
	assert!(!registry.contains("application/x-custom"));
	assert_eq!(registry.decide(None, false), Some(Negotiation::builtin_default()));
}

#[rstest]
fn test_environment_wins_over_file(settings_file: NamedTempFile) {
	let registry = FormatRegistry::new();
	NegotiationSettings::from_file(settings_file.path())
		.unwrap()
		.with_env_lookup(|name| match name {
			"RDF_CONNEG_DEFAULT_MIMETYPE" => Some("application/n-triples".to_string()),
			_ => None,
		})
		.apply_to_registry(&registry)
		.unwrap();

	assert_eq!(registry.decide("", false).unwrap().format, "nt");
}

#[rstest]
fn test_toml_round_trip_of_loaded_settings(settings_file: NamedTempFile) {
	let settings = NegotiationSettings::from_file(settings_file.path()).unwrap();
	let rendered = settings.to_toml_string().unwrap();
	assert_eq!(NegotiationSettings::from_toml_str(&rendered).unwrap(), settings);
}
