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

//! End-to-end runs: bound every dataset, mine the anchor, prune the rest.
//!
//! # Overview
//!
//! A run over datasets `D_1, ..., D_n` (in temporal order) proceeds as follows:
//!
//! 1. Every dataset's deviation bound `mu_i` is computed with confidence `delta / n`, so that
//!    all bounds hold together with probability at least `1 - delta`. Datasets are bounded in
//!    parallel.
//! 2. The anchor dataset and the minimum frequency handed to the miner are derived from the
//!    trend, the optional threshold `theta`, and the bounds (see [`mining_threshold`]).
//! 3. The miner seeds a [`CandidateTracker`] with the anchor's frequent patterns.
//! 4. The remaining datasets are processed in the trend's order.
//!
//! With [`BoundMode::Observed`] every `mu_i` is zero, which reproduces the observed-frequency
//! baseline the statistical bounds are compared against.
//!
//! # Examples
//!
//! ```no_run
//! # use grosso::miner::CommandMiner;
//! # use grosso::run::Grosso;
//! # use grosso::run::RunConfig;
//! # use grosso::run::Threshold;
//! let config = RunConfig::stable(0.1)
//!     .delta(0.1)
//!     .threshold(Threshold::All(0.2))
//!     .build()
//!     .unwrap();
//! let grosso = Grosso::new(config, CommandMiner::spmf("spmf.jar"));
//! let report = grosso.run(&["q1.txt", "q2.txt", "q3.txt"]).unwrap();
//! report.write_to(std::io::stdout()).unwrap();
//! ```

use std::io;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;

use crate::bound::ShatterBound;
use crate::candidate::Candidate;
use crate::candidate::CandidateTracker;
use crate::candidate::Trend;
use crate::candidate::write_candidates;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::miner::SequentialPatternMiner;

const DEFAULT_DELTA: f64 = 0.1;

/// Minimum frequency requirement of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Threshold {
    /// No minimum frequency: only the trend constrains candidates.
    #[default]
    None,
    /// `theta` applies to the anchor dataset only.
    Anchor(f64),
    /// `theta` applies to every dataset.
    All(f64),
}

impl Threshold {
    /// Returns `theta`, if any.
    pub fn theta(&self) -> Option<f64> {
        match self {
            Threshold::None => None,
            Threshold::Anchor(theta) | Threshold::All(theta) => Some(*theta),
        }
    }
}

/// How per-dataset deviation bounds are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundMode {
    /// VC-dimension based bounds.
    #[default]
    Statistical,
    /// No bounds: observed frequencies are trusted as they are.
    Observed,
}

/// Validated parameters of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    trend: Trend,
    delta: f64,
    threshold: Threshold,
    bound_mode: BoundMode,
}

impl RunConfig {
    /// Starts configuring a run for stable patterns with margin `alpha`.
    pub fn stable(alpha: f64) -> RunConfigBuilder {
        RunConfigBuilder::new(TrendKind::Stable, alpha)
    }

    /// Starts configuring a run for emerging patterns with margin `epsilon`.
    pub fn emerging(epsilon: f64) -> RunConfigBuilder {
        RunConfigBuilder::new(TrendKind::Emerging, epsilon)
    }

    /// Starts configuring a run for descending patterns with margin `epsilon`.
    pub fn descending(epsilon: f64) -> RunConfigBuilder {
        RunConfigBuilder::new(TrendKind::Descending, epsilon)
    }

    /// Returns the trend candidates are pruned against.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Returns the confidence parameter of the whole run.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the minimum frequency requirement.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Returns how deviation bounds are obtained.
    pub fn bound_mode(&self) -> BoundMode {
        self.bound_mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrendKind {
    Stable,
    Emerging,
    Descending,
}

/// Builder for [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    kind: TrendKind,
    margin: f64,
    delta: f64,
    threshold: Threshold,
    bound_mode: BoundMode,
}

impl RunConfigBuilder {
    fn new(kind: TrendKind, margin: f64) -> Self {
        Self {
            kind,
            margin,
            delta: DEFAULT_DELTA,
            threshold: Threshold::None,
            bound_mode: BoundMode::Statistical,
        }
    }

    /// Sets the confidence parameter; must be in `(0, 1)`. Defaults to 0.1.
    pub fn delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the minimum frequency requirement; `theta` must be in `[0, 1]`.
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets how deviation bounds are obtained.
    pub fn bound_mode(mut self, bound_mode: BoundMode) -> Self {
        self.bound_mode = bound_mode;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidArgument`] if `delta` is not in `(0, 1)`,
    /// the margin is negative or not finite, or `theta` is not in `[0, 1]`.
    pub fn build(self) -> Result<RunConfig, Error> {
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(Error::invalid_argument(format!(
                "delta must be in (0, 1), got {}",
                self.delta
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "margin must be finite and non-negative, got {}",
                self.margin
            )));
        }
        if let Some(theta) = self.threshold.theta() {
            if !(0.0..=1.0).contains(&theta) {
                return Err(Error::invalid_argument(format!(
                    "theta must be in [0, 1], got {theta}"
                )));
            }
        }

        let trend = match self.kind {
            TrendKind::Stable => Trend::Stable {
                alpha: self.margin,
                theta: match self.threshold {
                    Threshold::All(theta) => Some(theta),
                    Threshold::None | Threshold::Anchor(_) => None,
                },
            },
            TrendKind::Emerging => Trend::Emerging {
                epsilon: self.margin,
            },
            TrendKind::Descending => Trend::Descending {
                epsilon: self.margin,
            },
        };
        Ok(RunConfig {
            trend,
            delta: self.delta,
            threshold: self.threshold,
            bound_mode: self.bound_mode,
        })
    }
}

/// Returns the dataset to mine and the minimum frequency to mine it with.
///
/// * Stable: the dataset maximizing `theta + mu_i` (the first one on ties), mined at that value;
///   `theta` is zero without a threshold.
/// * Emerging: the last dataset. With `m_0 = 0` (`theta + mu_0` for [`Threshold::All`]) and
///   `m_i = mu_i + mu_{i-1} + m_{i-1} + epsilon`, it is mined at `m_{n-1}`, or at
///   `max(m_{n-1}, theta + mu_{n-1})` for [`Threshold::Anchor`]. A pattern below `m_{n-1}` in
///   the last dataset cannot have increased by more than `epsilon` at every step.
/// * Descending: the mirror image, anchored on the first dataset.
///
/// # Panics
///
/// Panics if `mu` is empty.
pub fn mining_threshold(trend: Trend, threshold: Threshold, mu: &[f64]) -> (usize, f64) {
    assert!(!mu.is_empty(), "at least one dataset is required");
    let n = mu.len();
    let theta = threshold.theta().unwrap_or(0.0);
    let chain_start = |i: usize| match threshold {
        Threshold::All(theta) => theta + mu[i],
        Threshold::None | Threshold::Anchor(_) => 0.0,
    };
    let anchor_floor = |i: usize, chained: f64| match threshold {
        Threshold::Anchor(theta) => chained.max(theta + mu[i]),
        Threshold::None | Threshold::All(_) => chained,
    };

    match trend {
        Trend::Stable { .. } => {
            let mut anchor = 0;
            for i in 1..n {
                if mu[i] > mu[anchor] {
                    anchor = i;
                }
            }
            (anchor, theta + mu[anchor])
        }
        Trend::Emerging { epsilon } => {
            let mut m = chain_start(0);
            for i in 1..n {
                m += mu[i] + mu[i - 1] + epsilon;
            }
            (n - 1, anchor_floor(n - 1, m))
        }
        Trend::Descending { epsilon } => {
            let mut m = chain_start(n - 1);
            for i in (0..n - 1).rev() {
                m += mu[i] + mu[i + 1] + epsilon;
            }
            (0, anchor_floor(0, m))
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    bounds: Vec<ShatterBound>,
    anchor: usize,
    min_frequency: f64,
    num_mined: usize,
    candidates: Vec<Candidate>,
}

impl RunReport {
    /// Returns the deviation bound of every dataset, in run order.
    pub fn bounds(&self) -> &[ShatterBound] {
        &self.bounds
    }

    /// Returns the index of the mined dataset.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Returns the minimum frequency the anchor was mined with.
    pub fn min_frequency(&self) -> f64 {
        self.min_frequency
    }

    /// Returns the number of patterns the miner returned.
    pub fn num_mined(&self) -> usize {
        self.num_mined
    }

    /// Returns the surviving candidates in pattern order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Writes the surviving candidates, one per line.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        write_candidates(writer, &self.candidates)
    }
}

/// Runs the whole pipeline with a given miner.
#[derive(Debug, Clone)]
pub struct Grosso<M> {
    config: RunConfig,
    miner: M,
}

impl<M: SequentialPatternMiner> Grosso<M> {
    /// Creates a runner.
    pub fn new(config: RunConfig, miner: M) -> Self {
        Self { config, miner }
    }

    /// Returns the run parameters.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs over `datasets`, given in temporal order.
    ///
    /// # Errors
    ///
    /// Fails if no dataset is given, if a dataset cannot be read or is empty, if a bound is not
    /// finite, or if the miner fails.
    pub fn run<P: AsRef<Path> + Sync>(&self, datasets: &[P]) -> Result<RunReport, Error> {
        if datasets.is_empty() {
            return Err(Error::invalid_argument("at least one dataset is required"));
        }
        let bounds = self.bound_datasets(datasets)?;
        let mu: Vec<f64> = bounds.iter().map(ShatterBound::mu).collect();

        let trend = self.config.trend;
        let (anchor, min_frequency) = mining_threshold(trend, self.config.threshold, &mu);
        tracing::info!(anchor, min_frequency, "mining anchor dataset");
        let mined = self
            .miner
            .mine(datasets[anchor].as_ref(), min_frequency)
            .map_err(|err| err.with_context("dataset", anchor))?;
        let num_mined = mined.len();
        let anchor_size = bounds[anchor].dataset_size() as f64;
        let seeds = mined
            .into_iter()
            .map(|mined| (mined.pattern, mined.support as f64 / anchor_size));

        let mut tracker = CandidateTracker::new(trend, mu, anchor, seeds)?;
        for i in trend.visiting_order(datasets.len(), anchor) {
            if tracker.is_empty() {
                tracing::info!(dataset = i, "no candidate left, stopping early");
                break;
            }
            let dataset = open_dataset(datasets[i].as_ref(), i)?;
            tracker
                .process(i, &dataset)
                .map_err(|err| err.with_context("dataset", i))?;
        }

        Ok(RunReport {
            bounds,
            anchor,
            min_frequency,
            num_mined,
            candidates: tracker.into_candidates(),
        })
    }

    fn bound_datasets<P: AsRef<Path> + Sync>(
        &self,
        datasets: &[P],
    ) -> Result<Vec<ShatterBound>, Error> {
        let delta = self.config.delta / datasets.len() as f64;
        let bound_mode = self.config.bound_mode;
        datasets
            .par_iter()
            .enumerate()
            .map(|(i, path)| {
                let dataset = open_dataset(path.as_ref(), i)?;
                let bound = match bound_mode {
                    BoundMode::Statistical => ShatterBound::compute(&dataset, delta),
                    BoundMode::Observed => Ok(ShatterBound::observed(dataset.len())),
                }
                .map_err(|err| err.with_context("dataset", i))?;
                tracing::info!(
                    dataset = i,
                    size = bound.dataset_size(),
                    s_index = bound.s_index(),
                    mu = bound.mu(),
                    "dataset bounded"
                );
                Ok(bound)
            })
            .collect()
    }
}

fn open_dataset(path: &Path, index: usize) -> Result<Dataset, Error> {
    let dataset = Dataset::open(path).map_err(|err| err.with_context("dataset", index))?;
    if !dataset.skipped().is_empty() {
        tracing::warn!(
            dataset = index,
            skipped = dataset.skipped().len(),
            "malformed transactions skipped"
        );
    }
    dataset
        .ensure_not_empty()
        .map_err(|err| err.with_context("path", path.display()))?;
    Ok(dataset)
}
