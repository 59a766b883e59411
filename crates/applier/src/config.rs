// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The default kubectl executable, resolved through `PATH`.
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Applier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplierConfig {
    /// The kubectl executable to run. May be a bare name or a path.
    pub program: String,
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self {
            program: String::from(DEFAULT_KUBECTL),
        }
    }
}

impl ApplierConfig {
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}
