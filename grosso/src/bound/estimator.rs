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

use num_bigint::BigUint;
use num_traits::One;

use crate::bound::Antichain;
use crate::bound::Insertion;
use crate::capacity::capacity;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::sequence::Sequence;

/// Returns `sqrt((s_index + ln(1 / delta)) / (2 * dataset_size))`.
///
/// # Errors
///
/// * [`crate::error::ErrorKind::InvalidArgument`] if `delta` is not in `(0, 1)`.
/// * [`crate::error::ErrorKind::EmptyDataset`] if `dataset_size` is zero.
/// * [`crate::error::ErrorKind::NonFiniteBound`] if the result is not finite.
pub fn deviation_bound(s_index: usize, dataset_size: usize, delta: f64) -> Result<f64, Error> {
    check_delta(delta)?;
    if dataset_size == 0 {
        return Err(Error::empty_dataset());
    }
    let mu = ((s_index as f64 + (1.0 / delta).ln()) / (2.0 * dataset_size as f64)).sqrt();
    if !mu.is_finite() {
        return Err(Error::non_finite_bound(mu));
    }
    Ok(mu)
}

fn check_delta(delta: f64) -> Result<(), Error> {
    if delta > 0.0 && delta < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "delta must be in (0, 1), got {delta}"
        )))
    }
}

fn admission_threshold(s_index: usize) -> BigUint {
    (BigUint::one() << s_index) - 1u32
}

/// The deviation bound of one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShatterBound {
    s_index: usize,
    dataset_size: usize,
    delta: f64,
    mu: f64,
}

impl ShatterBound {
    /// Streams every transaction of `dataset` through a new estimator.
    pub fn compute(dataset: &Dataset, delta: f64) -> Result<Self, Error> {
        let mut estimator = ShatterBoundEstimator::new(delta)?;
        for transaction in dataset.transactions() {
            estimator.update(transaction);
        }
        estimator.estimate()
    }

    /// Creates the bound of a dataset whose frequencies are taken at face value.
    ///
    /// `mu` is zero; this is the observed-frequency baseline.
    pub fn observed(dataset_size: usize) -> Self {
        Self {
            s_index: 0,
            dataset_size,
            delta: 1.0,
            mu: 0.0,
        }
    }

    /// Returns the upper bound on the VC-dimension found by the antichain pass.
    pub fn s_index(&self) -> usize {
        self.s_index
    }

    /// Returns the number of transactions seen.
    pub fn dataset_size(&self) -> usize {
        self.dataset_size
    }

    /// Returns the confidence parameter the bound was computed with.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the maximum deviation between observed and true frequencies.
    pub fn mu(&self) -> f64 {
        self.mu
    }
}

/// Single-pass estimator of a dataset's [`ShatterBound`].
#[derive(Debug, Clone)]
pub struct ShatterBoundEstimator {
    delta: f64,
    dataset_size: usize,
    s_index: usize,
    threshold: BigUint,
    antichain: Antichain,
}

impl ShatterBoundEstimator {
    /// Creates an estimator with confidence parameter `delta`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidArgument`] if `delta` is not in `(0, 1)`.
    pub fn new(delta: f64) -> Result<Self, Error> {
        check_delta(delta)?;
        Ok(Self {
            delta,
            dataset_size: 0,
            s_index: 0,
            threshold: admission_threshold(0),
            antichain: Antichain::new(),
        })
    }

    /// Processes the next transaction of the dataset.
    pub fn update(&mut self, transaction: &Sequence) {
        self.dataset_size += 1;
        if self.antichain.contains(transaction) {
            return;
        }
        let capacity = capacity(transaction);
        if capacity <= self.threshold {
            return;
        }
        match self.antichain.insert(transaction.clone(), capacity) {
            Insertion::Duplicate | Insertion::Dominated => {}
            Insertion::Inserted => self.grow_or_evict(),
        }
    }

    fn grow_or_evict(&mut self) {
        let grows = self
            .antichain
            .weakest()
            .is_some_and(|member| *member.capacity() > self.threshold);
        if grows {
            self.s_index += 1;
            self.threshold = admission_threshold(self.s_index);
            tracing::trace!(s_index = self.s_index, "antichain grown");
        } else {
            self.antichain.pop_weakest();
        }
    }

    /// Returns the current s-index; it never decreases.
    pub fn s_index(&self) -> usize {
        self.s_index
    }

    /// Returns the number of transactions processed so far.
    pub fn dataset_size(&self) -> usize {
        self.dataset_size
    }

    /// Returns the current antichain.
    pub fn antichain(&self) -> &Antichain {
        &self.antichain
    }

    /// Returns the deviation bound for the transactions processed so far.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ErrorKind::EmptyDataset`] if no transaction was processed,
    /// or [`crate::error::ErrorKind::NonFiniteBound`] if the bound is not finite.
    pub fn estimate(&self) -> Result<ShatterBound, Error> {
        let mu = deviation_bound(self.s_index, self.dataset_size, self.delta)?;
        tracing::debug!(
            s_index = self.s_index,
            dataset_size = self.dataset_size,
            antichain = self.antichain.len(),
            mu,
            "deviation bound computed"
        );
        Ok(ShatterBound {
            s_index: self.s_index,
            dataset_size: self.dataset_size,
            delta: self.delta,
            mu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn run(lines: &[&str]) -> ShatterBoundEstimator {
        let mut estimator = ShatterBoundEstimator::new(0.1).unwrap();
        for line in lines {
            estimator.update(&Sequence::parse_transaction(line).unwrap());
        }
        estimator
    }

    #[test]
    fn test_single_item_transactions() {
        // capacity 1 never exceeds 2^1 - 1 once the first one is admitted
        let estimator = run(&["1 -1 -2", "2 -1 -2", "3 -1 -2"]);
        assert_eq!(estimator.s_index(), 1);
        assert_eq!(estimator.antichain().len(), 1);
        assert_eq!(estimator.dataset_size(), 3);
    }

    #[test]
    fn test_growth_needs_capacity() {
        let estimator = run(&["1 2 -1 -2", "3 4 -1 -2", "5 6 7 -1 -2"]);
        // 3 > 0, then 3 > 1, then the weakest (3) is not > 3
        assert_eq!(estimator.s_index(), 2);
        assert_eq!(estimator.antichain().len(), 2);
        assert_eq!(
            estimator.antichain().members()[0].capacity(),
            &BigUint::from(7u32)
        );
    }

    #[test]
    fn test_duplicates_count_toward_size_only() {
        let estimator = run(&["1 2 -1 -2", "1 2 -1 -2", "1 2 -1 -2"]);
        assert_eq!(estimator.s_index(), 1);
        assert_eq!(estimator.dataset_size(), 3);
    }

    #[test]
    fn test_subsequences_are_dominated() {
        let estimator = run(&["1 2 3 -1 4 -1 -2", "1 2 -1 4 -1 -2", "2 3 -1 -2"]);
        assert_eq!(estimator.s_index(), 1);
        assert_eq!(estimator.antichain().len(), 1);
    }

    #[test]
    fn test_supersequence_keeps_embedded_member() {
        // the second transaction contains the first; both stay and the antichain grows
        let estimator = run(&["2 -1 1 -1 -2", "2 -1 1 2 -1 -2"]);
        assert_eq!(estimator.s_index(), 2);
        assert_eq!(estimator.antichain().len(), 2);
    }

    #[test]
    fn test_deviation_bound_formula() {
        let mu = deviation_bound(3, 100, 0.1).unwrap();
        let expected = ((3.0 + 10f64.ln()) / 200.0).sqrt();
        assert!((mu - expected).abs() < 1e-15);
    }

    #[test]
    fn test_preconditions() {
        assert_eq!(
            deviation_bound(1, 0, 0.1).unwrap_err().kind(),
            ErrorKind::EmptyDataset
        );
        for delta in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert_eq!(
                ShatterBoundEstimator::new(delta).unwrap_err().kind(),
                ErrorKind::InvalidArgument
            );
        }
        let empty = ShatterBoundEstimator::new(0.5).unwrap();
        assert_eq!(
            empty.estimate().unwrap_err().kind(),
            ErrorKind::EmptyDataset
        );
    }
}
