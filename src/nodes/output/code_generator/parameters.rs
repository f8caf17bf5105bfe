//! Code generator parameters

use crate::codegen::{EmitOptions, Hardware, Language};
use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct CodeGeneratorParameters {
    pub language: String,
    pub horner: bool,
    pub smart_libs: bool,
    pub hardware: String,
    pub network_tables: bool,
    /// Team number or server address for the NetworkTables client
    pub nt_team: String,
}

impl Default for CodeGeneratorParameters {
    fn default() -> Self {
        Self {
            language: Language::Python.name().to_string(),
            horner: false,
            smart_libs: true,
            hardware: Hardware::Cpu.label().to_string(),
            network_tables: false,
            nt_team: String::new(),
        }
    }
}

impl CodeGeneratorParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            node.parameter(key)
                .and_then(ParamValue::as_str)
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        let flag = |key: &str, fallback: bool| {
            node.parameter(key).and_then(ParamValue::as_bool).unwrap_or(fallback)
        };
        Self {
            language: text("language", defaults.language),
            horner: flag("horner", defaults.horner),
            smart_libs: flag("smart_libs", defaults.smart_libs),
            hardware: text("hardware", defaults.hardware),
            network_tables: flag("network_tables", defaults.network_tables),
            nt_team: text("nt_team", defaults.nt_team),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("language", ParamValue::from(self.language.as_str())),
            ("horner", ParamValue::from(self.horner)),
            ("smart_libs", ParamValue::from(self.smart_libs)),
            ("hardware", ParamValue::from(self.hardware.as_str())),
            ("network_tables", ParamValue::from(self.network_tables)),
            ("nt_team", ParamValue::from(self.nt_team.as_str())),
        ]
    }

    /// Unrecognised language or hardware names fall back to Python and CPU
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            language: Language::parse(&self.language).unwrap_or_default(),
            horner: self.horner,
            smart_libs: self.smart_libs,
            hardware: Hardware::parse(&self.hardware).unwrap_or_default(),
            network_tables: self.network_tables.then(|| self.nt_team.clone()),
        }
    }
}
