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

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::sequence::Sequence;

/// The temporal behavior candidates must exhibit to survive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    /// Frequency stays within `alpha` across all datasets.
    Stable {
        /// Maximum bound-adjusted gap between any two datasets.
        alpha: f64,
        /// Minimum bound-adjusted frequency required in every dataset, if any.
        theta: Option<f64>,
    },
    /// Frequency increases by more than `epsilon` from each dataset to the next.
    Emerging {
        /// Minimum bound-adjusted increase.
        epsilon: f64,
    },
    /// Frequency decreases by more than `epsilon` from each dataset to the next.
    Descending {
        /// Minimum bound-adjusted decrease.
        epsilon: f64,
    },
}

impl Trend {
    /// Returns the dataset the candidates must be mined from, if it is fixed by the trend.
    pub fn fixed_anchor(&self, num_datasets: usize) -> Option<usize> {
        match self {
            Trend::Stable { .. } => None,
            Trend::Emerging { .. } => num_datasets.checked_sub(1),
            Trend::Descending { .. } => Some(0),
        }
    }

    /// Returns the order in which datasets other than `anchor` must be processed.
    pub fn visiting_order(&self, num_datasets: usize, anchor: usize) -> Vec<usize> {
        match self {
            Trend::Emerging { .. } => (0..num_datasets).rev().filter(|&i| i != anchor).collect(),
            Trend::Stable { .. } | Trend::Descending { .. } => {
                (0..num_datasets).filter(|&i| i != anchor).collect()
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Trend::Stable { .. } => "stable",
            Trend::Emerging { .. } => "emerging",
            Trend::Descending { .. } => "descending",
        }
    }
}

/// Evolving map from candidate pattern to its per-dataset observed frequency.
///
/// A `None` slot is a dataset that has not been processed yet.
#[derive(Debug, Clone)]
pub struct CandidateTracker {
    trend: Trend,
    mu: Vec<f64>,
    processed: Vec<bool>,
    candidates: BTreeMap<Sequence, Vec<Option<f64>>>,
}

impl CandidateTracker {
    /// Creates a tracker over `mu.len()` datasets, seeded with `(pattern, frequency)` pairs
    /// observed in dataset `anchor`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidArgument`] if `anchor` is out of range or
    /// not the dataset the trend is anchored on, or if a bound is negative or not finite.
    pub fn new(
        trend: Trend,
        mu: Vec<f64>,
        anchor: usize,
        seeds: impl IntoIterator<Item = (Sequence, f64)>,
    ) -> Result<Self, Error> {
        let num_datasets = mu.len();
        if anchor >= num_datasets {
            return Err(Error::invalid_argument(format!(
                "anchor {anchor} out of range for {num_datasets} datasets"
            )));
        }
        if let Some(expected) = trend.fixed_anchor(num_datasets) {
            if anchor != expected {
                return Err(Error::invalid_argument(format!(
                    "{} patterns must be anchored on dataset {expected}, got {anchor}",
                    trend.name()
                )));
            }
        }
        if let Some(bad) = mu.iter().find(|mu| !(mu.is_finite() && **mu >= 0.0)) {
            return Err(Error::invalid_argument(format!(
                "deviation bounds must be finite and non-negative, got {bad}"
            )));
        }

        let candidates = seeds
            .into_iter()
            .map(|(pattern, frequency)| {
                let mut slots = vec![None; num_datasets];
                slots[anchor] = Some(frequency);
                (pattern, slots)
            })
            .collect();
        let mut processed = vec![false; num_datasets];
        processed[anchor] = true;

        Ok(Self {
            trend,
            mu,
            processed,
            candidates,
        })
    }

    /// Returns the trend candidates are checked against.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Returns the deviation bounds, one per dataset.
    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    /// Returns the number of surviving candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if no candidate survives.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns true if dataset `index` has been processed, or is the anchor.
    pub fn is_processed(&self, index: usize) -> bool {
        self.processed.get(index).copied().unwrap_or(false)
    }

    /// Returns the recorded frequencies of `pattern`, if it survives.
    pub fn frequencies(&self, pattern: &Sequence) -> Option<&[Option<f64>]> {
        self.candidates.get(pattern).map(Vec::as_slice)
    }

    /// Iterates over surviving candidates in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sequence, &[Option<f64>])> + '_ {
        self.candidates
            .iter()
            .map(|(pattern, slots)| (pattern, slots.as_slice()))
    }

    /// Consumes the tracker, returning the surviving candidates in pattern order.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
            .into_iter()
            .map(|(pattern, frequencies)| Candidate {
                pattern,
                frequencies,
            })
            .collect()
    }

    /// Prunes the candidates against dataset `index`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidArgument`] if `index` is out of range,
    /// already processed, or visited out of the trend's order, and with
    /// [`crate::error::ErrorKind::EmptyDataset`] if `dataset` is empty.
    pub fn process(&mut self, index: usize, dataset: &Dataset) -> Result<usize, Error> {
        self.check_order(index)?;
        dataset.ensure_not_empty()?;

        let item_index = dataset.index();
        let frequencies: Vec<f64> = {
            let patterns: Vec<&Sequence> = self.candidates.keys().collect();
            patterns
                .par_iter()
                .map(|pattern| item_index.frequency(pattern))
                .collect()
        };

        let before = self.candidates.len();
        for ((_, slots), frequency) in self.candidates.iter_mut().zip(frequencies) {
            if survives(self.trend, &self.mu, slots, index, frequency) {
                slots[index] = Some(frequency);
            }
        }
        // failed candidates still have an empty slot for this dataset
        self.candidates.retain(|_, slots| slots[index].is_some());
        self.processed[index] = true;

        let removed = before - self.candidates.len();
        tracing::info!(
            trend = self.trend.name(),
            dataset = index,
            removed,
            remaining = self.candidates.len(),
            "dataset processed"
        );
        Ok(removed)
    }

    fn check_order(&self, index: usize) -> Result<(), Error> {
        let num_datasets = self.mu.len();
        if index >= num_datasets {
            return Err(Error::invalid_argument(format!(
                "dataset {index} out of range for {num_datasets} datasets"
            )));
        }
        if self.processed[index] {
            return Err(Error::invalid_argument(format!(
                "dataset {index} already processed"
            )));
        }
        // the anchor is always processed, so the predecessor exists
        let predecessor = match self.trend {
            Trend::Stable { .. } => return Ok(()),
            Trend::Emerging { .. } => index + 1,
            Trend::Descending { .. } => index.saturating_sub(1),
        };
        if !self.is_processed(predecessor) {
            return Err(Error::invalid_argument(format!(
                "{} patterns: dataset {index} visited before dataset {predecessor}",
                self.trend.name()
            )));
        }
        Ok(())
    }
}

/// Decides whether a candidate with recorded `slots` survives `frequency` in dataset `i`.
///
/// Every recorded dataset is taken into account before deciding.
fn survives(trend: Trend, mu: &[f64], slots: &[Option<f64>], i: usize, frequency: f64) -> bool {
    let upper = frequency + mu[i];
    let lower = frequency - mu[i];
    match trend {
        Trend::Stable { alpha, theta } => {
            if theta.is_some_and(|theta| lower < theta) {
                return false;
            }
            slots.iter().enumerate().all(|(j, recorded)| match recorded {
                Some(f_j) => upper - (f_j - mu[j]) <= alpha && (f_j + mu[j]) - lower <= alpha,
                None => true,
            })
        }
        Trend::Emerging { epsilon } => match slots[i + 1] {
            Some(next) => next - mu[i + 1] - upper > epsilon,
            None => false,
        },
        Trend::Descending { epsilon } => match slots[i - 1] {
            Some(previous) => previous - mu[i - 1] - upper > epsilon,
            None => false,
        },
    }
}
