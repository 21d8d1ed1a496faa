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

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use num_traits::Zero;

use crate::capacity::CapacityBounds;
use crate::dataset::Dataset;
use crate::sequence::Sequence;

/// Relative gaps are computed with this many decimal digits before leaving integer arithmetic.
const GAP_SCALE_DIGITS: u32 = 10;

/// Average relative gap between our capacity and the two looser estimators over a dataset.
///
/// For every transaction the gap `(looser - ours) / looser` is computed exactly on the big
/// integers, rounded half-up to ten decimal digits, and averaged.
#[derive(Debug, Clone, Default)]
pub struct CapacityComparison {
    num_transactions: usize,
    naive_gap_sum: f64,
    containment_gap_sum: f64,
}

impl CapacityComparison {
    /// Creates an empty comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares every transaction of `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut comparison = Self::new();
        for transaction in dataset.transactions() {
            comparison.update(transaction);
        }
        comparison
    }

    /// Adds one transaction to the comparison.
    pub fn update(&mut self, transaction: &Sequence) {
        let bounds = CapacityBounds::of(transaction);
        self.naive_gap_sum += relative_gap(&bounds.naive, &bounds.overlap);
        self.containment_gap_sum += relative_gap(&bounds.containment, &bounds.overlap);
        self.num_transactions += 1;
    }

    /// Returns the number of compared transactions.
    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    /// Returns the average gap to the naive capacity, in percent.
    pub fn naive_gap_percent(&self) -> f64 {
        self.average_percent(self.naive_gap_sum)
    }

    /// Returns the average gap to the containment capacity, in percent.
    pub fn containment_gap_percent(&self) -> f64 {
        self.average_percent(self.containment_gap_sum)
    }

    fn average_percent(&self, sum: f64) -> f64 {
        if self.num_transactions == 0 {
            return 0.0;
        }
        sum * 100.0 / self.num_transactions as f64
    }
}

fn relative_gap(looser: &BigUint, ours: &BigUint) -> f64 {
    if looser.is_zero() {
        return 0.0;
    }
    let scale = BigUint::from(10u32).pow(GAP_SCALE_DIGITS);
    let diff = BigInt::from(looser.clone()) - BigInt::from(ours.clone());
    let (sign, magnitude) = diff.into_parts();
    // half-up: ties move away from zero
    let rounded = (magnitude * &scale * 2u32 + looser) / (looser * 2u32);
    let scaled = BigInt::from_biguint(sign, rounded);
    scaled.to_f64().unwrap_or(0.0) / scale.to_f64().unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_gap() {
        let gap = relative_gap(&BigUint::from(8u32), &BigUint::from(6u32));
        assert!((gap - 0.25).abs() < 1e-12);
        assert_eq!(relative_gap(&BigUint::from(5u32), &BigUint::from(5u32)), 0.0);
        assert_eq!(relative_gap(&BigUint::zero(), &BigUint::zero()), 0.0);
    }

    #[test]
    fn test_relative_gap_rounds_half_up() {
        // 2/3 and 1/7 end in a digit that rounds up
        let gap = relative_gap(&BigUint::from(3u32), &BigUint::from(1u32));
        assert!((gap - 0.6666666667).abs() < 1e-13);
        let gap = relative_gap(&BigUint::from(7u32), &BigUint::from(6u32));
        assert!((gap - 0.1428571429).abs() < 1e-13);
        // exact ties round up
        let looser = BigUint::from(20_000_000_000u64);
        let gap = relative_gap(&looser, &(&looser - 1u32));
        assert!((gap - 0.0000000001).abs() < 1e-15);
    }

    #[test]
    fn test_empty_comparison() {
        let comparison = CapacityComparison::new();
        assert_eq!(comparison.num_transactions(), 0);
        assert_eq!(comparison.naive_gap_percent(), 0.0);
    }

    #[test]
    fn test_comparison_averages() {
        let mut comparison = CapacityComparison::new();
        // no shared items: every estimator agrees
        comparison.update(&Sequence::parse_transaction("1 -1 2 -1 -2").unwrap());
        // 7 naive, 6 containment, 6 ours
        comparison.update(&Sequence::parse_transaction("1 2 -1 1 -1 -2").unwrap());
        assert_eq!(comparison.num_transactions(), 2);
        let expected = (1.0f64 / 7.0 * 1e10).round() / 1e10 * 100.0 / 2.0;
        assert!((comparison.naive_gap_percent() - expected).abs() < 1e-9);
        assert_eq!(comparison.containment_gap_percent(), 0.0);
    }
}
