// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Options for a single apply.
///
/// Options are built per call and never reused by the applier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// The target namespace. Empty means the current namespace.
    pub namespace: String,
    /// The manifest document, delivered verbatim on standard input.
    ///
    /// Manifests are UTF-8 text. Callers holding arbitrary bytes must decode
    /// them first; the bytes of this string are written unchanged.
    pub manifest: String,
    /// Whether kubectl should validate the manifest.
    pub validate: bool,
    /// Extra arguments appended verbatim, in order, after `--validate`.
    pub extra_args: Vec<String>,
}

impl ApplyOptions {
    /// Creates options for the given manifest with all other fields defaulted.
    #[must_use]
    pub fn new(manifest: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub const fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Replaces the extra arguments.
    #[must_use]
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a single extra argument.
    #[must_use]
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}
