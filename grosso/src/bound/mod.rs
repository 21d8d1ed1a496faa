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

//! Dataset-wide deviation bounds from an upper bound on the VC-dimension of sequential
//! patterns.
//!
//! # Overview
//!
//! [`ShatterBoundEstimator`] streams over the transactions of a dataset once. It keeps an
//! [`Antichain`] (under the embedding order of [`crate::sequence`]) of high-capacity
//! transactions, and a counter `s_index` that only grows. A transaction whose capacity is above
//! `2^s - 1` joins the antichain unless it embeds into a member at least as strong; then either
//! the weakest member still has a capacity above `2^s - 1` and `s_index` grows to `s + 1`, or
//! the weakest member is evicted. At the end of the pass `s_index` bounds the VC-dimension of
//! sequential patterns on the dataset, and
//!
//! ```text
//! mu = sqrt((s_index + ln(1 / delta)) / (2 * |D|))
//! ```
//!
//! bounds, with probability at least `1 - delta`, the deviation between the observed and the
//! true frequency of every pattern at once.
//!
//! # Examples
//!
//! ```
//! # use grosso::bound::ShatterBoundEstimator;
//! # use grosso::sequence::Sequence;
//! let mut estimator = ShatterBoundEstimator::new(0.1).unwrap();
//! for line in ["1 -1 -2", "1 2 -1 -2", "3 -1 1 -1 -2", "1 2 -1 -2"] {
//!     estimator.update(&Sequence::parse_transaction(line).unwrap());
//! }
//! let bound = estimator.estimate().unwrap();
//! assert_eq!(bound.dataset_size(), 4);
//! assert!(bound.mu() > 0.0);
//! ```

mod antichain;
mod estimator;

pub use self::antichain::Antichain;
pub use self::antichain::Insertion;
pub use self::antichain::Member;
pub use self::estimator::ShatterBound;
pub use self::estimator::ShatterBoundEstimator;
pub use self::estimator::deviation_bound;
