// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hydration options.

use serde::{Deserialize, Serialize};

/// Default nesting limit for recursive hydration.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How the default-reconciliation pass runs after explicit input.
///
/// The second pass re-populates every field that is still empty from the
/// object's own current values, so structured defaults go through the same
/// typed pipeline as explicit input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultsPass {
    /// Run on every fill, setter hooks included.
    #[default]
    EveryFill,
    /// Run on every fill, but never invoke setter hooks from it.
    SkipSetters,
    /// Never run.
    Disabled,
}

/// Options shared by every object hydrated from one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrateOptions {
    /// Maximum nesting depth of hydrated objects (root is depth 0).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Default-reconciliation behaviour.
    #[serde(default)]
    pub defaults_pass: DefaultsPass,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for HydrateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            defaults_pass: DefaultsPass::EveryFill,
        }
    }
}

impl HydrateOptions {
    /// Set the nesting limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the default-reconciliation behaviour.
    pub fn defaults_pass(mut self, defaults_pass: DefaultsPass) -> Self {
        self.defaults_pass = defaults_pass;
        self
    }
}
