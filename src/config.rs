use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::{Attribute, Species};

/// Environment variable naming a settings file when no CLI argument is given.
pub const SETTINGS_ENV: &str = "PENGUIN_DASH_SETTINGS";

/// Start-up values for the dashboard controls. Every field is optional in
/// the JSON file; omitted fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub title: String,
    /// Attribute shared by both histograms and the scatter x axis.
    pub attribute: Attribute,
    /// Scatter y axis; defaults to the last continuous column.
    pub scatter_y: Option<Attribute>,
    /// Raw value for the stacked histogram's unbounded input.
    pub stacked_bins: i64,
    /// Raw value for the layered histogram's slider, clamped on use.
    pub layered_bins: i64,
    pub species: Vec<Species>,
    pub source_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Penguin Measurements".to_string(),
            attribute: Attribute::BillLengthMm,
            scatter_y: None,
            stacked_bins: 50,
            layered_bins: 50,
            species: Species::ALL.to_vec(),
            source_url: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings path from the first CLI argument, else from [`SETTINGS_ENV`].
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(SETTINGS_ENV))
            .map(PathBuf::from)
    }

    /// Load the configured settings, falling back to defaults on any error.
    /// The second value is a user-facing status message when that happens.
    pub fn from_env_or_default() -> (Self, Option<String>) {
        Self::resolve(Self::path_from_env().as_deref())
    }

    pub fn resolve(path: Option<&Path>) -> (Self, Option<String>) {
        let Some(path) = path else {
            return (Self::default(), None);
        };
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(e) => {
                log::error!("Failed to load settings, using defaults: {e:#}");
                (Self::default(), Some(format!("Settings not loaded, using defaults: {e:#}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.species.len(), 3);
    }

    #[test]
    fn parses_column_and_species_names() {
        let s: Settings = serde_json::from_str(
            r#"{ "attribute": "body_mass_g", "scatter_y": "bill_depth_mm",
                 "stacked_bins": 0, "layered_bins": 5, "species": ["Gentoo"] }"#,
        )
        .unwrap();
        assert_eq!(s.attribute, Attribute::BodyMassG);
        assert_eq!(s.scatter_y, Some(Attribute::BillDepthMm));
        assert_eq!(s.stacked_bins, 0);
        assert_eq!(s.species, vec![Species::Gentoo]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{ "attribute": "year" }"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{ "species": ["Emperor"] }"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{ "bins": 3 }"#).is_err());
    }

    #[test]
    fn resolve_without_path_is_silent() {
        assert_eq!(Settings::resolve(None), (Settings::default(), None));
    }

    #[test]
    fn resolve_falls_back_with_status() {
        let (settings, status) = Settings::resolve(Some(Path::new("/nonexistent/dash.json")));
        assert_eq!(settings, Settings::default());
        let status = status.unwrap();
        assert!(status.contains("using defaults"), "{status}");
        assert!(status.contains("/nonexistent/dash.json"), "{status}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/penguins.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/penguins.json"));
    }
}
