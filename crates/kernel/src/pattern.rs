//! Pattern files: a dense starting grid plus optional name and rule.
//!
//! ```json
//! { "name": "glider", "rule": "B3/S23", "cells": [[0,1,0],[0,0,1],[1,1,1]] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dense::Dense;
use crate::rule::Rule;
use crate::world::World;

/// Errors from loading pattern files.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported pattern format {0:?}: expected .json, .yaml or .yml")]
    UnsupportedFormat(String),
}

/// A named starting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
    pub cells: Dense,
}

impl Pattern {
    pub fn from_json_str(s: &str) -> Result<Self, PatternError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, PatternError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a pattern, choosing the parser from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let parse: fn(&str) -> Result<Self, PatternError> = match ext.as_str() {
            "json" => Self::from_json_str,
            "yaml" | "yml" => Self::from_yaml_str,
            _ => return Err(PatternError::UnsupportedFormat(path.display().to_string())),
        };
        let pattern = parse(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), name = ?pattern.name, "pattern loaded");
        Ok(pattern)
    }

    /// The live cells this pattern starts with.
    pub fn world(&self) -> World {
        World::from_dense(&self.cells)
    }

    /// The pattern's rule, Conway's when none is given.
    pub fn rule(&self) -> Rule {
        self.rule.unwrap_or_default()
    }
}
