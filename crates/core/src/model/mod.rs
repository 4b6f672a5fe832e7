//! Input model: the parsed structure of one application version.
//!
//! A bytecode parser (outside this crate) produces one [`ClassDump`] per compared version.
//! The core never re-parses binary containers; it only consumes these records.

pub mod descriptor;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DumpError;

/// One instruction of a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Opcode mnemonic only (e.g. `invoke-virtual`), never operands.
    pub opcode: String,
    /// Literal loaded by a string-constant instruction (`const-string` and friends).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
}

impl Instruction {
    pub fn new(opcode: impl Into<String>) -> Self {
        Self { opcode: opcode.into(), string: None }
    }

    /// Builder-style helper for string-constant loads.
    pub fn const_string(opcode: impl Into<String>, literal: impl Into<String>) -> Self {
        Self { opcode: opcode.into(), string: Some(literal.into()) }
    }
}

/// Declared field of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Type descriptor, e.g. `I` or `Lcom/app/Foo;`.
    pub descriptor: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self { name: name.into(), descriptor: descriptor.into() }
    }
}

/// Declared method of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    /// Method descriptor `(<params>)<return>`.
    pub descriptor: String,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self { name: name.into(), descriptor: descriptor.into(), instructions: Vec::new() }
    }

    pub fn with_instructions(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = instructions;
        self
    }
}

/// Parsed structure of a single class as exposed by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Fully-qualified class identifier, e.g. `Lcom/app/Foo;`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// `None` when the parser could not retrieve field metadata for this class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
    /// Platform/library class referenced but not defined by the application.
    #[serde(default)]
    pub external: bool,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Some(Vec::new()),
            methods: Vec::new(),
            external: false,
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn with_fields(mut self, fields: Option<Vec<FieldDefinition>>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_methods(mut self, methods: Vec<MethodDefinition>) -> Self {
        self.methods = methods;
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// All instructions of all methods, in declaration order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.methods.iter().flat_map(|method| method.instructions.iter())
    }
}

/// Every class exposed by the parser for one application version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDump {
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

impl ClassDump {
    pub fn new(classes: Vec<ClassDefinition>) -> Self {
        Self { classes }
    }

    /// Read a dump from disk; the format is chosen by extension (`.json`, `.yaml`, `.yml`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        if !matches!(ext.as_str(), "json" | "yaml" | "yml") {
            return Err(DumpError::UnsupportedFormat(path.to_path_buf()));
        }
        let body = std::fs::read_to_string(path)
            .map_err(|source| DumpError::Io { path: path.to_path_buf(), source })?;
        if ext == "json" {
            Ok(serde_json::from_str(&body)?)
        } else {
            Ok(serde_yaml::from_str(&body)?)
        }
    }

    /// Names of every class in the dump, external ones included.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.name.as_str())
    }
}
