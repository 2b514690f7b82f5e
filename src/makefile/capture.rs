//! Reading back the variables `ndk-build` wrote through the capture preamble.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Variables captured while `ndk-build` evaluated a generated makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedVariables {
    pub c_includes: String,
    pub local_path: String,
    pub module_filename: String,
    pub module: String,
    pub cflags: String,
    /// Lines with keys the preamble does not write.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl CapturedVariables {
    /// Load a capture file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read capture file: {}", path.display()))?;

        Ok(Self::parse(&content))
    }

    /// Parse `KEY=VALUE` lines. Lines without `=` are ignored; a repeated key
    /// keeps its last value.
    pub fn parse(content: &str) -> Self {
        let mut vars = CapturedVariables::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();

            match key.trim() {
                "LOCAL_C_INCLUDES" => vars.c_includes = value,
                "LOCAL_PATH" => vars.local_path = value,
                "LOCAL_MODULE_FILENAME" => vars.module_filename = value,
                "LOCAL_MODULE" => vars.module = value,
                "LOCAL_CFLAGS" => vars.cflags = value,
                other => {
                    vars.extra.insert(other.to_string(), value);
                }
            }
        }

        vars
    }

    /// Include paths, split on whitespace.
    pub fn include_paths(&self) -> Vec<&str> {
        self.c_includes.split_whitespace().collect()
    }

    /// Compiler flags, split on whitespace.
    pub fn compiler_flags(&self) -> Vec<&str> {
        self.cflags.split_whitespace().collect()
    }
}
