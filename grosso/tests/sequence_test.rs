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

use common::arb_sequence;
use common::pattern;
use grosso::error::ErrorKind;
use grosso::sequence::Itemset;
use grosso::sequence::Sequence;
use proptest::prelude::*;

/// Drops the items whose `keep` flag (cycled over the item positions) is false.
fn thin(sequence: &Sequence, keep: &[bool]) -> Option<Sequence> {
    let mut position = 0;
    let mut itemsets = Vec::new();
    for itemset in sequence.itemsets() {
        let mut items = Vec::new();
        for &item in itemset.items() {
            if keep[position % keep.len()] {
                items.push(item);
            }
            position += 1;
        }
        if !items.is_empty() {
            itemsets.push(Itemset::new(items));
        }
    }
    (!itemsets.is_empty()).then(|| Sequence::new(itemsets))
}

#[test]
fn test_parse_transaction() {
    let t = Sequence::parse_transaction("10 20 -1 30 -1 -2").unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.itemsets()[0].items(), &[10, 20]);
    assert_eq!(t.itemsets()[1].items(), &[30]);
    assert_eq!(t.to_transaction_line(), "10 20 -1 30 -1 -2");
}

#[test]
fn test_parse_rejects_malformed_lines() {
    for line in [
        "",
        "-2",
        "10 20 -1",
        "10 20 -2",
        "10 -1 -1 -2",
        "10 x -1 -2",
        "-5 -1 -2",
        "10 -1 -2 20 -1",
    ] {
        let err = Sequence::parse_transaction(line).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput, "{line:?}");
    }
}

#[test]
fn test_pattern_terminator_is_optional() {
    assert_eq!(pattern("1 2 -1 3 -1"), pattern("1 2 -1 3 -1 -2"));
    assert_eq!("2 1 -1".parse::<Sequence>().unwrap().to_string(), "1 2 -1");
}

#[test]
fn test_embedding_is_itemset_wise() {
    let t = pattern("1 2 -1 3 -1 1 4 -1");
    assert!(pattern("1 -1 1 -1").is_embedded_in(&t));
    assert!(pattern("2 -1 4 -1").is_embedded_in(&t));
    assert!(!pattern("1 3 -1").is_embedded_in(&t));
    assert!(!pattern("4 -1 3 -1").is_embedded_in(&t));
}

proptest! {
    #[test]
    fn embedding_is_reflexive(s in arb_sequence(6, 5)) {
        prop_assert!(s.is_embedded_in(&s.clone()));
    }

    #[test]
    fn thinned_sequences_embed_transitively(
        c in arb_sequence(6, 5),
        keep_b in prop::collection::vec(any::<bool>(), 1..8),
        keep_a in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        if let Some(b) = thin(&c, &keep_b) {
            prop_assert!(b.is_embedded_in(&c));
            if let Some(a) = thin(&b, &keep_a) {
                prop_assert!(a.is_embedded_in(&b));
                prop_assert!(a.is_embedded_in(&c));
            }
        }
    }

    #[test]
    fn embedding_is_transitive(
        a in arb_sequence(4, 2),
        b in arb_sequence(4, 3),
        c in arb_sequence(4, 4),
    ) {
        if a.is_embedded_in(&b) && b.is_embedded_in(&c) {
            prop_assert!(a.is_embedded_in(&c));
        }
    }

    #[test]
    fn transaction_encoding_round_trips(s in arb_sequence(1000, 6)) {
        let line = s.to_transaction_line();
        prop_assert_eq!(Sequence::parse_transaction(&line).unwrap(), s);
    }
}
