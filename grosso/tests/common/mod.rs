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

#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use grosso::dataset::Dataset;
use grosso::error::Error;
use grosso::miner::MinedPattern;
use grosso::miner::SequentialPatternMiner;
use grosso::sequence::Itemset;
use grosso::sequence::Sequence;
use proptest::prelude::*;

pub fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

pub fn pattern(text: &str) -> Sequence {
    Sequence::parse_pattern(text).unwrap()
}

pub fn dataset(lines: &[&str]) -> Dataset {
    Dataset::new(
        lines
            .iter()
            .map(|line| Sequence::parse_transaction(line).unwrap())
            .collect(),
    )
}

/// A miner that ignores its input and returns fixed patterns.
pub struct FixedMiner {
    mined: Vec<MinedPattern>,
}

impl FixedMiner {
    pub fn new(patterns: &[(&str, u64)]) -> Self {
        let mined = patterns
            .iter()
            .map(|(text, support)| MinedPattern {
                pattern: pattern(text),
                support: *support,
            })
            .collect();
        Self { mined }
    }
}

impl SequentialPatternMiner for FixedMiner {
    fn mine(&self, _input: &Path, _min_frequency: f64) -> Result<Vec<MinedPattern>, Error> {
        Ok(self.mined.clone())
    }
}

/// Sequences of up to `max_itemsets` itemsets over items `0..num_items`.
pub fn arb_sequence(num_items: u32, max_itemsets: usize) -> impl Strategy<Value = Sequence> {
    prop::collection::vec(
        prop::collection::btree_set(0..num_items, 1..4),
        1..=max_itemsets,
    )
    .prop_map(|itemsets| {
        Sequence::new(
            itemsets
                .into_iter()
                .map(|items| Itemset::new(items.into_iter().collect()))
                .collect(),
        )
    })
}
