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

//! Comparing the patterns a run reports with a known ground truth.
//!
//! On synthetic datasets the truly stable, emerging or descending patterns are known in
//! advance. A found pattern absent from the ground truth is a false positive.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::candidate::Candidate;
use crate::candidate::read_candidates;
use crate::error::Error;
use crate::sequence::Sequence;

/// Counts of a comparison against the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundTruthReport {
    found: usize,
    truth: usize,
    false_positives: usize,
}

impl GroundTruthReport {
    /// Compares `found` patterns with `truth`. Duplicates are counted once.
    pub fn compare<'a>(
        truth: impl IntoIterator<Item = &'a Sequence>,
        found: impl IntoIterator<Item = &'a Sequence>,
    ) -> Self {
        let truth: HashSet<&Sequence> = truth.into_iter().collect();
        let found: HashSet<&Sequence> = found.into_iter().collect();
        let false_positives = found.difference(&truth).count();
        Self {
            found: found.len(),
            truth: truth.len(),
            false_positives,
        }
    }

    /// Compares two sets of candidates by pattern.
    pub fn compare_candidates(truth: &[Candidate], found: &[Candidate]) -> Self {
        Self::compare(
            truth.iter().map(|c| &c.pattern),
            found.iter().map(|c| &c.pattern),
        )
    }

    /// Compares two candidate files.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be read or holds a malformed line.
    pub fn compare_files(truth: &Path, found: &Path) -> Result<Self, Error> {
        let truth = read_candidate_file(truth)?;
        let found = read_candidate_file(found)?;
        Ok(Self::compare_candidates(&truth, &found))
    }

    /// Returns the number of distinct found patterns.
    pub fn found(&self) -> usize {
        self.found
    }

    /// Returns the number of distinct ground-truth patterns.
    pub fn truth(&self) -> usize {
        self.truth
    }

    /// Returns the number of found patterns not in the ground truth.
    pub fn false_positives(&self) -> usize {
        self.false_positives
    }

    /// Returns the share of found patterns that are false positives; zero if nothing was found.
    pub fn false_positive_ratio(&self) -> f64 {
        if self.found == 0 {
            0.0
        } else {
            self.false_positives as f64 / self.found as f64
        }
    }

    /// Returns found patterns over ground-truth patterns, or `None` for an empty ground truth.
    pub fn found_to_truth_ratio(&self) -> Option<f64> {
        (self.truth > 0).then(|| self.found as f64 / self.truth as f64)
    }
}

fn read_candidate_file(path: &Path) -> Result<Vec<Candidate>, Error> {
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    read_candidates(BufReader::new(file)).map_err(|err| err.with_context("path", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(texts: &[&str]) -> Vec<Sequence> {
        texts.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_compare() {
        let truth = patterns(&["1 -1", "2 -1", "1 -1 2 -1", "3 -1"]);
        let found = patterns(&["1 -1", "2 -1", "4 -1"]);
        let report = GroundTruthReport::compare(&truth, &found);
        assert_eq!(report.found(), 3);
        assert_eq!(report.truth(), 4);
        assert_eq!(report.false_positives(), 1);
        assert_eq!(report.false_positive_ratio(), 1.0 / 3.0);
        assert_eq!(report.found_to_truth_ratio(), Some(0.75));
    }

    #[test]
    fn test_compare_empty() {
        let none: Vec<Sequence> = vec![];
        let report = GroundTruthReport::compare(&none, &patterns(&["1 -1"]));
        assert_eq!(report.false_positive_ratio(), 1.0);
        assert_eq!(report.found_to_truth_ratio(), None);
        let report = GroundTruthReport::compare(&patterns(&["1 -1"]), &none);
        assert_eq!(report.false_positive_ratio(), 0.0);
        assert_eq!(report.found_to_truth_ratio(), Some(0.0));
    }
}
