use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NarrateError, Result};
use crate::narrative::{FormSet, ListForm};

/// Documents root used when nothing else is configured.
pub const DEFAULT_ROOT: &str = "client/src/data/courses";

/// Project config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "narrate.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load defaults, then global and project files (or a single explicit
    /// file), then `NARRATE_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("NARRATE_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                NarrateError::Config(format!("config file not found: {}", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_dir.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("narrate/config.toml")),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| NarrateError::Config(format!("read config {}: {err}", path.display())))?;
        Self::parse_patch(&raw)
            .map(Some)
            .map_err(|err| NarrateError::Config(format!("parse config {}: {err}", path.display())))
    }

    fn parse_patch(raw: &str) -> std::result::Result<ConfigPatch, toml::de::Error> {
        toml::from_str(raw)
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.convert {
            self.convert.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    /// Apply `NARRATE_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("NARRATE_ROOT") {
            self.convert.root = PathBuf::from(value);
        }
        if let Some(values) = lookup("NARRATE_EXTENSIONS").map(|value| split_list(&value)) {
            self.convert.extensions = normalize_extensions(values);
        }
        if let Some(value) = lookup("NARRATE_FOLLOW_LINKS") {
            self.convert.follow_links = parse_bool(&value);
        }
        if let Some(values) = lookup("NARRATE_FORMS").map(|value| split_list(&value)) {
            self.convert.forms = values
                .iter()
                .map(|value| value.parse::<ListForm>())
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(value) = lookup("NARRATE_OUTPUT_FORMAT") {
            self.output.format = value;
        }
        self.validate()
    }

    /// Reject values that would only fail later.
    pub fn validate(&self) -> Result<()> {
        if self.convert.extensions.is_empty() {
            return Err(NarrateError::Config(
                "convert.extensions must not be empty".to_string(),
            ));
        }
        if self.convert.form_set().is_empty() {
            return Err(NarrateError::Config(
                "convert.forms must name at least one list form".to_string(),
            ));
        }
        match self.output.format.to_lowercase().as_str() {
            "human" | "json" => Ok(()),
            other => Err(NarrateError::Config(format!(
                "unknown output format: {other} (expected human or json)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Directory scanned recursively for documents.
    pub root: PathBuf,
    /// File extensions (without the dot) treated as documents.
    pub extensions: Vec<String>,
    pub follow_links: bool,
    /// List forms that may be rewritten.
    pub forms: Vec<ListForm>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extensions: vec!["md".to_string()],
            follow_links: false,
            forms: ListForm::ALL.to_vec(),
        }
    }
}

impl ConvertConfig {
    fn merge(&mut self, patch: ConvertPatch) {
        if let Some(root) = patch.root {
            self.root = root;
        }
        if let Some(extensions) = patch.extensions {
            self.extensions = normalize_extensions(extensions);
        }
        if let Some(follow_links) = patch.follow_links {
            self.follow_links = follow_links;
        }
        if let Some(forms) = patch.forms {
            self.forms = forms;
        }
    }

    #[must_use]
    pub fn form_set(&self) -> FormSet {
        FormSet::only(&self.forms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `human` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(format) = patch.format {
            self.format = format;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    convert: Option<ConvertPatch>,
    output: Option<OutputPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConvertPatch {
    root: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    follow_links: Option<bool>,
    forms: Option<Vec<ListForm>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    format: Option<String>,
}

fn normalize_extensions(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().trim_start_matches('.').to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_course_tree() {
        let config = Config::default();
        assert_eq!(config.convert.root, PathBuf::from("client/src/data/courses"));
        assert_eq!(config.convert.extensions, vec!["md"]);
        assert!(!config.convert.follow_links);
        assert_eq!(config.convert.form_set(), FormSet::all());
        assert_eq!(config.output.format, "human");
        config.validate().unwrap();
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let mut config = Config::default();
        let patch = Config::parse_patch(
            r#"
            [convert]
            root = "docs"
            extensions = [".md", "markdown"]
            "#,
        )
        .unwrap();
        config.merge_patch(patch);
        assert_eq!(config.convert.root, PathBuf::from("docs"));
        assert_eq!(config.convert.extensions, vec!["md", "markdown"]);
        assert_eq!(config.convert.forms, ListForm::ALL.to_vec());
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn patch_rejects_unknown_fields_and_forms() {
        assert!(Config::parse_patch("[convert]\nrooot = \"x\"\n").is_err());
        assert!(Config::parse_patch("[convert]\nforms = [\"bullets\"]\n").is_err());
    }

    #[test]
    fn patch_parses_forms() {
        let patch = Config::parse_patch("[convert]\nforms = [\"numbered\"]\n").unwrap();
        let mut config = Config::default();
        config.merge_patch(patch);
        assert_eq!(
            config.convert.form_set(),
            FormSet::only(&[ListForm::Numbered])
        );
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[
                ("NARRATE_ROOT", "content"),
                ("NARRATE_EXTENSIONS", "md, .mdx"),
                ("NARRATE_FOLLOW_LINKS", "yes"),
                ("NARRATE_FORMS", "keyed,plain"),
                ("NARRATE_OUTPUT_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.convert.root, PathBuf::from("content"));
        assert_eq!(config.convert.extensions, vec!["md", "mdx"]);
        assert!(config.convert.follow_links);
        assert_eq!(config.convert.forms, vec![ListForm::Keyed, ListForm::Plain]);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn env_override_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config
            .apply_env_overrides(env(&[("NARRATE_FORMS", "keyed,bogus")]))
            .is_err());

        let mut config = Config::default();
        assert!(config
            .apply_env_overrides(env(&[("NARRATE_OUTPUT_FORMAT", "yaml")]))
            .is_err());

        let mut config = Config::default();
        assert!(config
            .apply_env_overrides(env(&[("NARRATE_EXTENSIONS", " , ")]))
            .is_err());

        let mut config = Config::default();
        let err = config
            .apply_env_overrides(env(&[("NARRATE_FORMS", ",")]))
            .unwrap_err();
        assert!(err.to_string().contains("at least one list form"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = Config::load(Some(&missing), temp.path()).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[convert]\nroot = \"lessons\"\n").unwrap();
        let config = Config::load(Some(&path), temp.path()).unwrap();
        assert_eq!(config.convert.root, PathBuf::from("lessons"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[convert\n").unwrap();
        let err = Config::load(Some(&path), temp.path()).unwrap_err();
        assert!(matches!(err, NarrateError::Config(_)));
    }
}
