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

//! Datasets of transactions and the per-pass item index used to count pattern support.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::sequence::Item;
use crate::sequence::Sequence;

/// A line that could not be parsed as a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number in the input.
    pub line_number: usize,
    /// The offending line.
    pub line: String,
    /// Why the line was rejected.
    pub reason: String,
}

/// An ordered collection of transactions, in input order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    transactions: Vec<Sequence>,
    skipped: Vec<SkippedLine>,
}

impl Dataset {
    /// Creates a dataset from already parsed transactions.
    pub fn new(transactions: Vec<Sequence>) -> Self {
        Self {
            transactions,
            skipped: vec![],
        }
    }

    /// Reads a dataset, one transaction per line.
    ///
    /// Malformed lines are skipped and recorded in [`Dataset::skipped`]; blank lines are
    /// ignored. Only a failure of the reader itself is an error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut dataset = Self::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| {
                Error::new(ErrorKind::Io, "failed to read dataset")
                    .with_context("line_number", i + 1)
                    .set_source(err)
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match Sequence::parse_transaction(&line) {
                Ok(transaction) => dataset.transactions.push(transaction),
                Err(err) => {
                    tracing::warn!(
                        line_number = i + 1,
                        %line,
                        reason = err.message(),
                        "skipping malformed transaction"
                    );
                    dataset.skipped.push(SkippedLine {
                        line_number: i + 1,
                        line,
                        reason: err.message().to_string(),
                    });
                }
            }
        }
        Ok(dataset)
    }

    /// Reads the dataset stored at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::io(path, err))?;
        Self::from_reader(BufReader::new(file))
            .map_err(|err| err.with_context("path", path.display()))
    }

    /// Returns the transactions in input order.
    pub fn transactions(&self) -> &[Sequence] {
        &self.transactions
    }

    /// Returns the lines rejected while reading.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Returns the number of valid transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the dataset holds no valid transaction.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Fails with [`ErrorKind::EmptyDataset`] if the dataset holds no valid transaction.
    pub fn ensure_not_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::empty_dataset());
        }
        Ok(())
    }

    /// Builds the item index for one pass over this dataset.
    pub fn index(&self) -> ItemIndex<'_> {
        ItemIndex::new(self)
    }
}

/// Maps every item to the sorted ids of the transactions containing it.
///
/// Built once per dataset pass and dropped with it.
#[derive(Debug)]
pub struct ItemIndex<'a> {
    dataset: &'a Dataset,
    postings: HashMap<Item, Vec<usize>>,
}

impl<'a> ItemIndex<'a> {
    /// Indexes every transaction of `dataset`.
    pub fn new(dataset: &'a Dataset) -> Self {
        let mut postings: HashMap<Item, Vec<usize>> = HashMap::new();
        for (id, transaction) in dataset.transactions().iter().enumerate() {
            for item in transaction.items() {
                let ids = postings.entry(item).or_default();
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }
        Self { dataset, postings }
    }

    /// Returns the ids of the transactions containing every item of `pattern`.
    ///
    /// Posting lists are intersected from the shortest one up.
    pub fn candidates(&self, pattern: &Sequence) -> Vec<usize> {
        let mut items: Vec<Item> = pattern.items().collect();
        items.sort_unstable();
        items.dedup();

        let mut lists = Vec::with_capacity(items.len());
        for item in items {
            match self.postings.get(&item) {
                Some(ids) => lists.push(ids.as_slice()),
                None => return vec![],
            }
        }
        lists.sort_by_key(|ids| ids.len());

        let Some((first, rest)) = lists.split_first() else {
            return vec![];
        };
        let mut ids = first.to_vec();
        for other in rest {
            ids.retain(|id| other.binary_search(id).is_ok());
            if ids.is_empty() {
                break;
            }
        }
        ids
    }

    /// Returns the number of transactions `pattern` embeds into.
    pub fn support(&self, pattern: &Sequence) -> usize {
        let transactions = self.dataset.transactions();
        self.candidates(pattern)
            .into_iter()
            .filter(|&id| pattern.is_embedded_in(&transactions[id]))
            .count()
    }

    /// Returns the fraction of transactions `pattern` embeds into, or zero for an empty dataset.
    pub fn frequency(&self, pattern: &Sequence) -> f64 {
        if self.dataset.is_empty() {
            return 0.0;
        }
        self.support(pattern) as f64 / self.dataset.len() as f64
    }
}
