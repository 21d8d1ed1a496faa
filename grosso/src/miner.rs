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

//! Adapters to the external frequent sequential pattern miner that seeds the candidates.
//!
//! Pattern discovery is delegated: a [`SequentialPatternMiner`] receives a dataset file and a
//! minimum frequency and returns every pattern at least that frequent, with its support count.
//! Miners in the SPMF tradition write one line per pattern:
//!
//! ```text
//! 10 20 -1 30 -1 #SUP: 42
//! ```
//!
//! [`CommandMiner`] runs such a program in a child process and parses its output file,
//! [`PatternFile`] reads patterns mined beforehand, and any closure with the right signature is
//! a miner too.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::sequence::Sequence;

const SUPPORT_MARKER: &str = "#SUP:";

/// A pattern returned by a miner, with its absolute support in the mined dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedPattern {
    /// The pattern.
    pub pattern: Sequence,
    /// Number of transactions containing the pattern.
    pub support: u64,
}

/// A frequent sequential pattern miner.
pub trait SequentialPatternMiner {
    /// Mines the dataset stored at `input` for patterns with frequency at least
    /// `min_frequency`.
    fn mine(&self, input: &Path, min_frequency: f64) -> Result<Vec<MinedPattern>, Error>;
}

impl<F> SequentialPatternMiner for F
where
    F: Fn(&Path, f64) -> Result<Vec<MinedPattern>, Error>,
{
    fn mine(&self, input: &Path, min_frequency: f64) -> Result<Vec<MinedPattern>, Error> {
        self(input, min_frequency)
    }
}

fn parse_mined_pattern(line: &str) -> Result<MinedPattern, Error> {
    let Some((pattern, support)) = line.split_once(SUPPORT_MARKER) else {
        return Err(Error::malformed(format!("missing {SUPPORT_MARKER:?}")));
    };
    let pattern = Sequence::parse_pattern(pattern.trim())?;
    let support = support.trim();
    let support = support.parse::<u64>().map_err(|err| {
        Error::malformed(format!("invalid support {support:?}")).set_source(err)
    })?;
    Ok(MinedPattern { pattern, support })
}

/// Parses miner output, one `<pattern> #SUP: <support>` per line.
///
/// Malformed lines are logged and skipped.
pub fn parse_mined_patterns<R: BufRead>(reader: R) -> Result<Vec<MinedPattern>, Error> {
    let mut patterns = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            Error::new(ErrorKind::Io, "failed to read mined patterns")
                .with_context("line_number", i + 1)
                .set_source(err)
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_mined_pattern(&line) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => {
                tracing::warn!(
                    line_number = i + 1,
                    %line,
                    reason = err.message(),
                    "skipping malformed mined pattern"
                );
            }
        }
    }
    Ok(patterns)
}

fn read_pattern_file(path: &Path) -> Result<Vec<MinedPattern>, Error> {
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    parse_mined_patterns(BufReader::new(file))
        .map_err(|err| err.with_context("path", path.display()))
}

/// Runs an external miner program.
///
/// Arguments may contain the placeholders `{input}`, `{output}` and `{minsup}`, replaced by the
/// dataset path, a temporary output path and the minimum frequency. The output file is removed
/// once parsed.
#[derive(Debug, Clone)]
pub struct CommandMiner {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandMiner {
    /// Creates a miner running `program` with `args`.
    pub fn new(
        program: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs PrefixSpan from the SPMF library at `jar`.
    pub fn spmf(jar: impl AsRef<Path>) -> Self {
        Self::new(
            "java",
            [
                "-jar".to_string(),
                jar.as_ref().display().to_string(),
                "run".to_string(),
                "PrefixSpan".to_string(),
                "{input}".to_string(),
                "{output}".to_string(),
                "{minsup}".to_string(),
            ],
        )
    }

    /// Returns the program that is run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn expand_args(&self, input: &Path, output: &Path, min_frequency: f64) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let minsup = min_frequency.to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{output}", &output)
                    .replace("{minsup}", &minsup)
            })
            .collect()
    }
}

impl SequentialPatternMiner for CommandMiner {
    fn mine(&self, input: &Path, min_frequency: f64) -> Result<Vec<MinedPattern>, Error> {
        let output = tempfile::Builder::new()
            .prefix("grosso-mined-")
            .suffix(".txt")
            .tempfile()
            .map_err(|err| {
                Error::new(ErrorKind::Io, "failed to create miner output file").set_source(err)
            })?;
        let args = self.expand_args(input, output.path(), min_frequency);
        tracing::debug!(program = %self.program.display(), ?args, "running miner");

        let result = Command::new(&self.program).args(&args).output().map_err(|err| {
            Error::miner("failed to start miner")
                .with_context("program", self.program.display())
                .set_source(err)
        })?;
        if !result.status.success() {
            return Err(Error::miner(format!("miner exited with {}", result.status))
                .with_context("program", self.program.display())
                .with_context("stderr", String::from_utf8_lossy(&result.stderr).trim()));
        }
        read_pattern_file(output.path())
    }
}

/// Patterns mined beforehand and stored in a file; the dataset and threshold are ignored.
#[derive(Debug, Clone)]
pub struct PatternFile {
    path: PathBuf,
}

impl PatternFile {
    /// Reads patterns from `path` on every call to [`SequentialPatternMiner::mine`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SequentialPatternMiner for PatternFile {
    fn mine(&self, _input: &Path, min_frequency: f64) -> Result<Vec<MinedPattern>, Error> {
        tracing::debug!(path = %self.path.display(), min_frequency, "reading mined patterns");
        read_pattern_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_mined_patterns() {
        let text = "10 20 -1 30 -1 #SUP: 42\n1 -1 #SUP: 7\nbroken #SUP: 3\n1 -1 #SUP: many\n\n";
        let patterns = parse_mined_patterns(Cursor::new(text)).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].pattern.to_string(), "10 20 -1 30 -1");
        assert_eq!(patterns[0].support, 42);
        assert_eq!(patterns[1].support, 7);
    }

    #[test]
    fn test_expand_args() {
        let miner = CommandMiner::new("miner", ["-i", "{input}", "-o={output}", "{minsup}"]);
        let args = miner.expand_args(Path::new("in.txt"), Path::new("out.txt"), 0.25);
        assert_eq!(args, vec!["-i", "in.txt", "-o=out.txt", "0.25"]);
    }

    #[test]
    fn test_closure_is_a_miner() {
        let miner = |_: &Path, min_frequency: f64| -> Result<Vec<MinedPattern>, Error> {
            assert_eq!(min_frequency, 0.5);
            Ok(vec![MinedPattern {
                pattern: "1 -1".parse()?,
                support: 3,
            }])
        };
        let patterns = miner.mine(Path::new("unused"), 0.5).unwrap();
        assert_eq!(patterns[0].support, 3);
    }

    #[test]
    fn test_missing_program_is_a_miner_error() {
        let miner = CommandMiner::new("/nonexistent/grosso-miner", ["{input}"]);
        let err = miner.mine(Path::new("in.txt"), 0.1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Miner);
    }
}
