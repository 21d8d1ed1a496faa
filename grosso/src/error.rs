// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for grosso.

use std::fmt;
use std::path::Path;

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A transaction or pattern line could not be parsed.
    MalformedInput,
    /// A parameter or call sequence violates a documented precondition.
    InvalidArgument,
    /// A dataset contains no valid transaction.
    EmptyDataset,
    /// A deviation bound turned out to be NaN or infinite.
    NonFiniteBound,
    /// Reading or writing a file failed.
    Io,
    /// The external pattern miner failed.
    Miner,
}

impl ErrorKind {
    /// Returns the string representation of the error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::EmptyDataset => "EmptyDataset",
            ErrorKind::NonFiniteBound => "NonFiniteBound",
            ErrorKind::Io => "Io",
            ErrorKind::Miner => "Miner",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every fallible operation in this crate.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
            source: None,
        }
    }

    /// Adds a key/value pair describing where the error happened.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Sets the underlying cause of this error.
    pub fn set_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        debug_assert!(self.source.is_none(), "the source error has been set");
        self.source = Some(source.into());
        self
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the context attached to this error.
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }
}

// Constructors used throughout the crate.
impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn empty_dataset() -> Self {
        Self::new(
            ErrorKind::EmptyDataset,
            "dataset contains no valid transaction",
        )
    }

    pub(crate) fn non_finite_bound(value: f64) -> Self {
        Self::new(
            ErrorKind::NonFiniteBound,
            format!("deviation bound is not finite: {value}"),
        )
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, "i/o failure")
            .with_context("path", path.display())
            .set_source(source)
    }

    pub(crate) fn miner(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Miner, message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("source", &self.source);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "Source:")?;
            writeln!(f, "   {source:#}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref() as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_context() {
        let err = Error::malformed("empty itemset")
            .with_context("line_number", 3)
            .with_context("line", "1 -1 -1 -2");
        assert_eq!(
            err.to_string(),
            "MalformedInput, context: { line_number: 3, line: 1 -1 -1 -2 } => empty itemset"
        );
        assert_eq!(err.context().len(), 2);
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::io(Path::new("q1.txt"), source);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("q1.txt"));
    }
}
