//! Signature extraction from class definitions.

use std::sync::Arc;

use tracing::trace;

use crate::error::ConfigError;
use crate::model::descriptor::{parse_method_descriptor, referenced_class};
use crate::model::ClassDefinition;
use crate::obfuscation::ObfuscationDetector;
use crate::signature::simhash::{simhash, token_hash, EMPTY_FINGERPRINT};
use crate::signature::{Signature, OBFUSCATED_SUPERCLASS_HASH};

/// Default number of consecutive opcodes per shingle.
pub const DEFAULT_SHINGLE_SIZE: usize = 4;

/// Computes [`Signature`]s, masking descriptors that reference obfuscated classes.
#[derive(Clone)]
pub struct SignatureCalculator {
    detector: Arc<dyn ObfuscationDetector>,
    shingle_size: usize,
}

impl SignatureCalculator {
    pub fn new(detector: Arc<dyn ObfuscationDetector>) -> Self {
        Self { detector, shingle_size: DEFAULT_SHINGLE_SIZE }
    }

    /// Override the shingle window; zero is rejected.
    pub fn with_shingle_size(mut self, shingle_size: usize) -> Result<Self, ConfigError> {
        if shingle_size == 0 {
            return Err(ConfigError::InvalidOption {
                option: "shingle_size",
                reason: "must be at least 1".to_string(),
            });
        }
        self.shingle_size = shingle_size;
        Ok(self)
    }

    pub fn shingle_size(&self) -> usize {
        self.shingle_size
    }

    pub fn detector(&self) -> &Arc<dyn ObfuscationDetector> {
        &self.detector
    }

    pub fn calculate(&self, class: &ClassDefinition) -> Signature {
        let opcodes: Vec<&str> = class.instructions().map(|i| i.opcode.as_str()).collect();
        let literals: Vec<&str> = class.instructions().filter_map(|i| i.string.as_deref()).collect();
        let (params, returns) = self.method_types(class);

        let (member_count, members_simhash) = match &class.fields {
            Some(fields) => (
                fields.len() as u64,
                simhash(self.unmasked(fields.iter().map(|f| f.descriptor.as_str()))),
            ),
            None => {
                trace!(class = %class.name, "no field metadata, members feature left empty");
                (0, EMPTY_FINGERPRINT)
            }
        };

        Signature {
            member_count,
            method_count: class.methods.len() as u64,
            instructions_count: opcodes.len() as u64,
            members_simhash,
            methods_params_simhash: simhash(params),
            methods_returns_simhash: simhash(returns),
            instructions_simhash: simhash(&opcodes),
            instruction_shingles_simhash: simhash(self.shingles(&opcodes)),
            implemented_interfaces_count: class.interfaces.len() as u64,
            implemented_interfaces_simhash: simhash(
                self.unmasked(class.interfaces.iter().map(String::as_str)),
            ),
            superclass_hash: self.superclass_hash(class),
            string_literals_count: literals.len() as u64,
            string_literals_simhash: simhash(&literals),
        }
    }

    /// Keeps primitives and descriptors of human-authored classes.
    fn unmasked<'a>(&self, descriptors: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        descriptors
            .filter(|descriptor| match referenced_class(descriptor) {
                Some(class_name) => !self.detector.is_class_name_obfuscated(class_name),
                None => true,
            })
            .collect()
    }

    fn method_types<'a>(&self, class: &'a ClassDefinition) -> (Vec<&'a str>, Vec<&'a str>) {
        let mut params = Vec::new();
        let mut returns = Vec::new();
        for method in &class.methods {
            // Malformed descriptors contribute no tokens.
            if let Some(parsed) = parse_method_descriptor(&method.descriptor) {
                params.extend(parsed.params);
                returns.push(parsed.returns);
            }
        }
        (self.unmasked(params.into_iter()), self.unmasked(returns.into_iter()))
    }

    fn shingles(&self, opcodes: &[&str]) -> Vec<String> {
        if opcodes.is_empty() {
            return Vec::new();
        }
        if opcodes.len() < self.shingle_size {
            return vec![opcodes.join(" ")];
        }
        opcodes.windows(self.shingle_size).map(|window| window.join(" ")).collect()
    }

    fn superclass_hash(&self, class: &ClassDefinition) -> u64 {
        match class.superclass.as_deref() {
            Some(superclass) if !self.detector.is_class_name_obfuscated(superclass) => {
                token_hash(superclass)
            }
            _ => OBFUSCATED_SUPERCLASS_HASH,
        }
    }
}
