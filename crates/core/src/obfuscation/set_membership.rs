//! Cheap corpus-scale classifier based on presence in both versions.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::descriptor::{is_primitive, is_primitive_array, package_leaf_name};
use crate::model::ClassDump;
use crate::obfuscation::dictionary::{Dictionary, MINIMUM_WORD_LENGTH};
use crate::obfuscation::split::{split_descriptor_words, split_words};
use crate::obfuscation::ObfuscationDetector;

/// Default "externally defined" namespaces.
pub const DEFAULT_EXTERNAL_PREFIXES: &[&str] = &["Landroid/", "Ljava/"];

/// A class name is human authored only when it exists in both compared versions, is not
/// externally defined, and decomposes entirely into dictionary words.
///
/// Quick, with few false negatives. Early checks short-circuit in this order: primitive,
/// present in both versions, external, all words real.
pub struct SetMembershipDetector {
    old_classes: HashSet<String>,
    new_classes: HashSet<String>,
    external_classes: HashSet<String>,
    external_prefixes: Vec<String>,
    dictionary: Arc<dyn Dictionary>,
}

impl SetMembershipDetector {
    /// `external_prefixes` is caller policy; classes flagged external in the new version
    /// count as external too.
    pub fn from_dumps(
        old: &ClassDump,
        new: &ClassDump,
        external_prefixes: &[String],
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        Self {
            old_classes: old.class_names().map(str::to_string).collect(),
            new_classes: new.class_names().map(str::to_string).collect(),
            external_classes: new
                .classes
                .iter()
                .filter(|class| class.external)
                .map(|class| class.name.clone())
                .collect(),
            external_prefixes: external_prefixes.to_vec(),
            dictionary,
        }
    }

    fn is_in_both_versions(&self, descriptor: &str) -> bool {
        self.old_classes.contains(descriptor) && self.new_classes.contains(descriptor)
    }

    fn is_external(&self, descriptor: &str) -> bool {
        self.external_prefixes.iter().any(|prefix| descriptor.starts_with(prefix.as_str()))
            || self.external_classes.contains(descriptor)
    }

    fn all_real_words(&self, words: &[&str]) -> bool {
        !words.is_empty()
            && words
                .iter()
                .all(|word| word.len() >= MINIMUM_WORD_LENGTH && self.dictionary.contains(word))
    }
}

impl ObfuscationDetector for SetMembershipDetector {
    fn is_class_name_obfuscated(&self, class_name: &str) -> bool {
        if is_primitive(class_name) || is_primitive_array(class_name) {
            return false;
        }
        let descriptor = class_name.trim_start_matches('[');
        if !self.is_in_both_versions(descriptor) {
            return true;
        }
        if self.is_external(descriptor) {
            return false;
        }
        !self.all_real_words(&split_descriptor_words(descriptor))
    }

    fn is_package_name_obfuscated(&self, package_prefix: &str) -> bool {
        !self.all_real_words(&split_words(package_leaf_name(package_prefix)))
    }

    fn name(&self) -> &'static str {
        "set-membership"
    }
}
