// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A fully constructed external command.
///
/// Built fresh for each apply and handed to a [`CommandSite`](crate::CommandSite).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// The program to execute.
    pub program: String,
    /// The arguments, not including the program.
    pub args: Vec<String>,
    /// Bytes written to the process's standard input.
    pub stdin: String,
}

impl CommandInvocation {
    #[must_use]
    pub const fn new(program: String, args: Vec<String>, stdin: String) -> Self {
        Self {
            program,
            args,
            stdin,
        }
    }

    /// Returns the full argument vector: the program followed by its arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl std::fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
