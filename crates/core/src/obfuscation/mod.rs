//! Obfuscation classifiers.
//!
//! A classifier decides whether a class or package identifier looks machine generated.
//! Strategies are interchangeable behind [`ObfuscationDetector`]; [`build_detector`] turns
//! a [`ClassifierKind`] from configuration into a shared detector.

pub mod dictionary;
pub mod memoize;
pub mod score_based;
pub mod scoring;
pub mod set_membership;
pub mod split;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::ClassDump;

pub use dictionary::{Dictionary, WordList};
pub use memoize::MemoizingDetector;
pub use score_based::ScoreBasedDetector;
pub use set_membership::SetMembershipDetector;

/// Capability: classify identifiers as obfuscated or human authored.
///
/// Implementations must be pure: the answer for a given identifier never changes.
pub trait ObfuscationDetector: Send + Sync {
    /// `class_name` is a fully-qualified identifier such as `Lcom/app/Foo;`.
    fn is_class_name_obfuscated(&self, class_name: &str) -> bool;

    /// `package_prefix` is a package prefix such as `Lcom/app`.
    fn is_package_name_obfuscated(&self, package_prefix: &str) -> bool;

    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;
}

impl<T: ObfuscationDetector + ?Sized> ObfuscationDetector for Arc<T> {
    fn is_class_name_obfuscated(&self, class_name: &str) -> bool {
        (**self).is_class_name_obfuscated(class_name)
    }

    fn is_package_name_obfuscated(&self, package_prefix: &str) -> bool {
        (**self).is_package_name_obfuscated(package_prefix)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Detector that gives the same answer for every identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDetector {
    obfuscated: bool,
}

impl ConstantDetector {
    pub fn always() -> Self {
        Self { obfuscated: true }
    }

    pub fn never() -> Self {
        Self { obfuscated: false }
    }
}

impl ObfuscationDetector for ConstantDetector {
    fn is_class_name_obfuscated(&self, _class_name: &str) -> bool {
        self.obfuscated
    }

    fn is_package_name_obfuscated(&self, _package_prefix: &str) -> bool {
        self.obfuscated
    }

    fn name(&self) -> &'static str {
        if self.obfuscated {
            "always"
        } else {
            "never"
        }
    }
}

/// Classifier strategy selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    #[default]
    Score,
    SetMembership,
    Always,
    Never,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Score => "score",
            ClassifierKind::SetMembership => "set-membership",
            ClassifierKind::Always => "always",
            ClassifierKind::Never => "never",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClassifierKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "score" => Ok(ClassifierKind::Score),
            "set-membership" => Ok(ClassifierKind::SetMembership),
            "always" => Ok(ClassifierKind::Always),
            "never" => Ok(ClassifierKind::Never),
            other => Err(ConfigError::InvalidOption {
                option: "classifier",
                reason: format!(
                    "unknown classifier '{other}' (expected score, set-membership, always or never)"
                ),
            }),
        }
    }
}

/// Build the detector selected by `kind`.
///
/// The set-membership strategy needs both compared versions; other strategies ignore them.
/// With `memoize` the detector is wrapped in a [`MemoizingDetector`].
pub fn build_detector(
    kind: ClassifierKind,
    memoize: bool,
    dictionary: Arc<dyn Dictionary>,
    versions: Option<(&ClassDump, &ClassDump)>,
    external_prefixes: &[String],
) -> Result<Arc<dyn ObfuscationDetector>, ConfigError> {
    let detector: Arc<dyn ObfuscationDetector> = match kind {
        ClassifierKind::Score => Arc::new(ScoreBasedDetector::new(dictionary)?),
        ClassifierKind::SetMembership => {
            let (old, new) = versions.ok_or_else(|| ConfigError::InvalidOption {
                option: "classifier",
                reason: "set-membership needs both compared versions".to_string(),
            })?;
            Arc::new(SetMembershipDetector::from_dumps(old, new, external_prefixes, dictionary))
        }
        ClassifierKind::Always => Arc::new(ConstantDetector::always()),
        ClassifierKind::Never => Arc::new(ConstantDetector::never()),
    };

    if memoize {
        Ok(Arc::new(MemoizingDetector::new(detector)))
    } else {
        Ok(detector)
    }
}
