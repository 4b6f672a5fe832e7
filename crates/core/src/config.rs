//! Serializable configuration of a match run.
//!
//! Stored as JSON or YAML (chosen by extension). Every field is optional in the file and
//! falls back to its default; unknown fields are rejected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filters::FilterConfig;
use crate::matching::{ClassMatcher, DEFAULT_MAX_CANDIDATES};
use crate::model::ClassDump;
use crate::obfuscation::set_membership::DEFAULT_EXTERNAL_PREFIXES;
use crate::obfuscation::{build_detector, ClassifierKind, Dictionary, ObfuscationDetector, WordList};
use crate::signature::{
    SignatureCalculator, SignatureWeights, WeightedSignatureDistance, DEFAULT_SHINGLE_SIZE,
};

/// Options recognised by a match run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Obfuscation classifier strategy.
    pub classifier: ClassifierKind,
    /// Cache classifier answers per identifier.
    pub memoize: bool,
    /// Per-feature signature distance weights.
    pub weights: SignatureWeights,
    /// Maximum number of candidates kept per class (K).
    pub max_candidates: usize,
    /// Scope matching by identically named packages first.
    pub match_packages: bool,
    /// Match identically named, non-obfuscated classes before comparing signatures.
    pub match_by_name: bool,
    /// Opcodes per instruction shingle.
    pub shingle_size: usize,
    pub filters: FilterConfig,
    /// Namespaces treated as externally defined by the set-membership classifier.
    pub external_prefixes: Vec<String>,
    /// Newline-separated word list replacing the bundled dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            memoize: true,
            weights: SignatureWeights::default(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            match_packages: true,
            match_by_name: true,
            shingle_size: DEFAULT_SHINGLE_SIZE,
            filters: FilterConfig::default(),
            external_prefixes: DEFAULT_EXTERNAL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            dictionary_path: None,
        }
    }
}

impl MatchConfig {
    /// Read and validate a configuration file (`.json`, `.yaml` or `.yml`).
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config at {}", path.display()))?;
        let config: MatchConfig = match config_format(path)? {
            ConfigFormat::Json => serde_json::from_str(&body).context("Failed to parse match config JSON")?,
            ConfigFormat::Yaml => serde_yaml::from_str(&body).context("Failed to parse match config YAML")?,
        };
        config
            .validate()
            .with_context(|| format!("Invalid match config at {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let body = match config_format(path)? {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize match config")?
            }
            ConfigFormat::Yaml => serde_yaml::to_string(self).context("Failed to serialize match config")?,
        };
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write match config to {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if self.max_candidates == 0 {
            return Err(ConfigError::InvalidOption {
                option: "max_candidates",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.shingle_size == 0 {
            return Err(ConfigError::InvalidOption {
                option: "shingle_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The configured word list, or the bundled one.
    pub fn dictionary(&self) -> Result<Arc<dyn Dictionary>> {
        match &self.dictionary_path {
            Some(path) => Ok(Arc::new(WordList::load(path)?)),
            None => Ok(WordList::bundled()),
        }
    }

    /// Classifier for comparing `old` against `new`.
    pub fn detector(&self, old: &ClassDump, new: &ClassDump) -> Result<Arc<dyn ObfuscationDetector>> {
        let detector = build_detector(
            self.classifier,
            self.memoize,
            self.dictionary()?,
            Some((old, new)),
            &self.external_prefixes,
        )?;
        Ok(detector)
    }

    /// Class matcher wired with `detector` and these options.
    pub fn matcher(&self, detector: Arc<dyn ObfuscationDetector>) -> Result<ClassMatcher, ConfigError> {
        let calculator = SignatureCalculator::new(Arc::clone(&detector)).with_shingle_size(self.shingle_size)?;
        let distance = Arc::new(WeightedSignatureDistance::new(self.weights)?);
        Ok(ClassMatcher::new(detector, calculator, distance)
            .with_max_candidates(self.max_candidates)?
            .with_package_matching(self.match_packages)
            .with_name_matching(self.match_by_name))
    }
}

enum ConfigFormat {
    Json,
    Yaml,
}

fn config_format(path: &Path) -> Result<ConfigFormat> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Ok(ConfigFormat::Json),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        _ => bail!("Unsupported config extension for {} (expected .json, .yaml or .yml)", path.display()),
    }
}
