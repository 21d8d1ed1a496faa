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

//! Statistically sound mining of sequential patterns whose frequency is stable, emerging or
//! descending over time.
//!
//! # Overview
//!
//! Given datasets of transactions collected over consecutive time periods, Grosso reports
//! sequential patterns whose *true* frequency follows a trend: it stays within a margin
//! across periods (stable), increases by more than a margin from each period to the next
//! (emerging), or decreases likewise (descending).
//!
//! Observed frequencies deviate from true ones. For every dataset a bound `mu` on the maximum
//! deviation over all patterns is derived from an upper bound on the VC-dimension of
//! sequential patterns, the [`s-index`](bound::ShatterBoundEstimator), which in turn relies on
//! a tight [`capacity`] estimate per transaction. Candidates are mined from one dataset with
//! an external [`miner`] and pruned against the others with every comparison widened by `mu`.
//!
//! # Modules
//!
//! * [`sequence`]: items, itemsets, sequences, and their text encoding.
//! * [`dataset`]: loading transactions and computing pattern frequencies.
//! * [`capacity`]: bounding the number of distinct patterns a transaction contains.
//! * [`bound`]: the s-index and the deviation bound `mu`.
//! * [`candidate`]: trend-driven candidate pruning and its output format.
//! * [`miner`]: the frequent-pattern miner seam.
//! * [`run`]: end-to-end runs.
//! * [`sample`] and [`evaluate`]: synthetic datasets and ground-truth comparison.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bound;
pub mod candidate;
pub mod capacity;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod miner;
pub mod run;
pub mod sample;
pub mod sequence;
