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

//! Reading and writing surviving candidates.
//!
//! One line per candidate: the pattern encoding followed by `freq_k: <value>` for every
//! dataset `k` (one-based, in run order). Unknown frequencies are written as `-1`.

use std::fmt;
use std::io;
use std::io::BufRead;
use std::io::Write;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::sequence::Sequence;

const UNKNOWN_FREQUENCY: &str = "-1";
const FREQUENCY_PREFIX: &str = "freq_";

/// A surviving candidate and its observed frequency in every dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The pattern.
    pub pattern: Sequence,
    /// Observed frequency per dataset; `None` if the dataset was not processed.
    pub frequencies: Vec<Option<f64>>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        for (k, frequency) in self.frequencies.iter().enumerate() {
            write!(f, " {FREQUENCY_PREFIX}{}: ", k + 1)?;
            match frequency {
                Some(frequency) => write!(f, "{frequency}")?,
                None => f.write_str(UNKNOWN_FREQUENCY)?,
            }
        }
        Ok(())
    }
}

/// Writes one line per candidate.
pub fn write_candidates<W: Write>(mut writer: W, candidates: &[Candidate]) -> io::Result<()> {
    for candidate in candidates {
        writeln!(writer, "{candidate}")?;
    }
    writer.flush()
}

fn parse_candidate(line: &str) -> Result<Candidate, Error> {
    let Some(split) = line.find(FREQUENCY_PREFIX) else {
        return Err(Error::malformed("no frequency column"));
    };
    let pattern = Sequence::parse_pattern(line[..split].trim())?;

    let mut frequencies = Vec::new();
    let mut tokens = line[split..].split_whitespace();
    while let Some(label) = tokens.next() {
        let expected = format!("{FREQUENCY_PREFIX}{}:", frequencies.len() + 1);
        if label != expected {
            return Err(Error::malformed(format!(
                "expected {expected:?}, got {label:?}"
            )));
        }
        let value = tokens
            .next()
            .ok_or_else(|| Error::malformed(format!("missing value for {label}")))?;
        let value = value.parse::<f64>().map_err(|err| {
            Error::malformed(format!("invalid frequency {value:?}")).set_source(err)
        })?;
        frequencies.push((value >= 0.0).then_some(value));
    }
    Ok(Candidate {
        pattern,
        frequencies,
    })
}

/// Reads candidates written by [`write_candidates`].
///
/// Blank lines are ignored; any other line that does not parse is an error.
pub fn read_candidates<R: BufRead>(reader: R) -> Result<Vec<Candidate>, Error> {
    let mut candidates = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            Error::new(ErrorKind::Io, "failed to read candidates")
                .with_context("line_number", i + 1)
                .set_source(err)
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let candidate = parse_candidate(&line)
            .map_err(|err| err.with_context("line_number", i + 1))?;
        candidates.push(candidate);
    }
    Ok(candidates)
}
