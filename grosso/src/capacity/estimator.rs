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
use num_traits::CheckedSub;
use num_traits::One;

use crate::sequence::Itemset;
use crate::sequence::Sequence;

fn power_of_two(exponent: usize) -> BigUint {
    BigUint::one() << exponent
}

/// Returns `2^L - 1`, where `L` is the number of items of `sequence`.
pub fn naive_capacity(sequence: &Sequence) -> BigUint {
    power_of_two(sequence.num_items()) - 1u32
}

/// Returns the naive capacity minus the patterns of every itemset that is contained in a
/// larger itemset of the same sequence.
///
/// Contained itemsets are discarded outright: partial overlaps earn no credit.
pub fn containment_capacity(sequence: &Sequence) -> BigUint {
    let mut itemsets: Vec<&Itemset> = sequence.itemsets().iter().collect();
    itemsets.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut capacity = naive_capacity(sequence);
    let mut i = 0;
    while i < itemsets.len() {
        let current = itemsets[i];
        let mut k = i + 1;
        while k < itemsets.len() {
            if itemsets[k].is_subset_of(current) {
                let contained = itemsets.remove(k);
                capacity -= power_of_two(contained.len()) - 1u32;
            } else {
                k += 1;
            }
        }
        i += 1;
    }
    capacity
}

/// An itemset together with the number of item positions that precede it.
#[derive(Debug, Clone, Copy)]
struct Placed<'a> {
    itemset: &'a Itemset,
    offset: usize,
}

impl Placed<'_> {
    fn end(&self) -> usize {
        self.offset + self.itemset.len()
    }
}

/// Returns the number of naive patterns double counted because `min` and `max` share items,
/// or `None` if they share nothing.
///
/// The shared items can be chosen in `2^shared - 1` ways; the positions before the earlier of
/// the two itemsets and after the later one are free.
fn overlap_correction(min: &Placed<'_>, max: &Placed<'_>, len: usize) -> Option<BigUint> {
    let shared = min.itemset.overlap(max.itemset);
    if shared == 0 {
        return None;
    }
    let tail = len.checked_sub(min.end().max(max.end()))?;
    let head = min.offset.min(max.offset);
    Some(power_of_two(head) * (power_of_two(shared) - 1u32) * power_of_two(tail))
}

/// Returns an upper bound on the number of distinct non-empty sequences embedded in
/// `sequence`, correcting the naive bound for itemsets that share items.
///
/// The result depends only on the itemset sizes and their pairwise overlaps, and always lies
/// in `[0, 2^L - 1]`.
pub fn capacity(sequence: &Sequence) -> BigUint {
    let mut placed = Vec::with_capacity(sequence.len());
    let mut offset = 0;
    for itemset in sequence.itemsets() {
        placed.push(Placed { itemset, offset });
        offset += itemset.len();
    }
    let mut len = offset;
    let mut capacity = power_of_two(len) - 1u32;

    // stable: equally sized itemsets keep their transaction order
    placed.sort_by_key(|p| p.itemset.len());

    for i in 0..placed.len().saturating_sub(1) {
        let min = placed[i];
        let correction = placed[i + 1..]
            .iter()
            .filter_map(|max| overlap_correction(&min, max, len))
            .max();
        let Some(correction) = correction else {
            continue;
        };

        capacity = capacity.checked_sub(&correction).unwrap_or_default();
        // drop `min` from the layout and close the gap it leaves
        len -= min.itemset.len();
        for other in &mut placed[i + 1..] {
            if other.offset > min.offset {
                other.offset -= min.itemset.len();
            }
        }
    }
    capacity
}

/// The three capacity estimates of one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityBounds {
    /// See [`naive_capacity`].
    pub naive: BigUint,
    /// See [`containment_capacity`].
    pub containment: BigUint,
    /// See [`capacity`].
    pub overlap: BigUint,
}

impl CapacityBounds {
    /// Computes all three estimates for `sequence`.
    pub fn of(sequence: &Sequence) -> Self {
        Self {
            naive: naive_capacity(sequence),
            containment: containment_capacity(sequence),
            overlap: capacity(sequence),
        }
    }

    /// Returns true if the estimates are ordered from loosest to tightest.
    pub fn is_ordered(&self) -> bool {
        self.naive >= self.containment && self.containment >= self.overlap
    }
}
