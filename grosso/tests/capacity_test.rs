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

mod common;

use std::collections::HashSet;

use common::arb_sequence;
use common::dataset;
use common::pattern;
use grosso::capacity::CapacityBounds;
use grosso::capacity::CapacityComparison;
use grosso::capacity::capacity;
use grosso::capacity::containment_capacity;
use grosso::capacity::naive_capacity;
use grosso::sequence::Item;
use grosso::sequence::Itemset;
use grosso::sequence::Sequence;
use num_bigint::BigUint;
use proptest::prelude::*;

/// Counts the distinct non-empty sequences embedded in `sequence` by enumeration.
fn distinct_subsequences(sequence: &Sequence) -> usize {
    fn visit(
        itemsets: &[Vec<Item>],
        current: &mut Vec<Vec<Item>>,
        seen: &mut HashSet<Vec<Vec<Item>>>,
    ) {
        let Some((first, rest)) = itemsets.split_first() else {
            if !current.is_empty() {
                seen.insert(current.clone());
            }
            return;
        };
        visit(rest, current, seen);
        for mask in 1..(1u32 << first.len()) {
            let subset = first
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, item)| *item)
                .collect();
            current.push(subset);
            visit(rest, current, seen);
            current.pop();
        }
    }

    let itemsets: Vec<Vec<Item>> = sequence
        .itemsets()
        .iter()
        .map(|itemset| itemset.items().to_vec())
        .collect();
    let mut seen = HashSet::new();
    visit(&itemsets, &mut Vec::new(), &mut seen);
    seen.len()
}

#[test]
fn test_single_itemset_is_exact() {
    let t = Sequence::parse_transaction("10 20 -1 -2").unwrap();
    assert_eq!(capacity(&t), BigUint::from(3u32));
    assert_eq!(naive_capacity(&t), BigUint::from(3u32));
    assert_eq!(containment_capacity(&t), BigUint::from(3u32));
}

#[test]
fn test_partial_overlap_is_credited() {
    let t = pattern("1 2 -1 2 3 -1");
    let bounds = CapacityBounds::of(&t);
    assert_eq!(bounds.naive, BigUint::from(15u32));
    // neither itemset contains the other
    assert_eq!(bounds.containment, BigUint::from(15u32));
    assert_eq!(bounds.overlap, BigUint::from(14u32));
    assert_eq!(distinct_subsequences(&t), 14);
}

#[test]
fn test_repeated_itemsets() {
    let t = pattern("1 -1 1 -1 1 -1");
    let bounds = CapacityBounds::of(&t);
    assert_eq!(bounds.naive, BigUint::from(7u32));
    assert_eq!(bounds.containment, BigUint::from(5u32));
    assert_eq!(bounds.overlap, BigUint::from(4u32));
    assert_eq!(distinct_subsequences(&t), 3);
}

#[test]
fn test_disjoint_itemsets_keep_naive_bound() {
    let t = pattern("1 2 -1 3 -1 4 5 6 -1");
    assert_eq!(capacity(&t), naive_capacity(&t));
    assert_eq!(capacity(&t), BigUint::from(63u32));
}

#[test]
fn test_long_transactions_do_not_overflow() {
    let items: Vec<String> = (0..200).map(|i| i.to_string()).collect();
    let t = pattern(&format!("{} -1", items.join(" ")));
    let expected = (BigUint::from(1u32) << 200usize) - 1u32;
    assert_eq!(capacity(&t), expected);
}

#[test]
fn test_comparison_over_dataset() {
    let d = dataset(&["1 2 -1 -2", "1 -1 1 -1 1 -1 -2"]);
    let comparison = CapacityComparison::from_dataset(&d);
    assert_eq!(comparison.num_transactions(), 2);
    assert!(comparison.naive_gap_percent() > comparison.containment_gap_percent());
    assert!(comparison.containment_gap_percent() > 0.0);
}

proptest! {
    #[test]
    fn estimates_are_ordered(t in arb_sequence(5, 5)) {
        let bounds = CapacityBounds::of(&t);
        prop_assert!(bounds.is_ordered(), "{}: {:?}", t, bounds);
    }

    #[test]
    fn capacity_bounds_distinct_subsequences(t in arb_sequence(5, 4)) {
        let exact = BigUint::from(distinct_subsequences(&t));
        prop_assert!(capacity(&t) >= exact, "{}", t);
    }

    #[test]
    fn capacity_ignores_item_labels(t in arb_sequence(5, 5), shift in 1u32..1000) {
        let shifted = Sequence::new(
            t.itemsets()
                .iter()
                .map(|itemset| {
                    Itemset::new(itemset.items().iter().map(|item| item + shift * 10).collect())
                })
                .collect(),
        );
        prop_assert_eq!(capacity(&t), capacity(&shifted));
    }
}
