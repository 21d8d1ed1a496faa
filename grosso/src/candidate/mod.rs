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

//! Candidate patterns and the pruning passes that keep only stable, emerging or descending
//! ones.
//!
//! # Overview
//!
//! A [`CandidateTracker`] is seeded with the patterns mined from one *anchor* dataset and
//! their frequency there. Every other dataset is then visited once, in the order the
//! [`Trend`] requires, and each candidate's observed frequency in that dataset is compared,
//! widened by the datasets' deviation bounds `mu`, against the frequencies already recorded.
//! Candidates that fail are removed; the candidate set never grows.
//!
//! * [`Trend::Stable`]: any visiting order. A candidate survives dataset `i` if, for every
//!   recorded dataset `j`, both `(f_i + mu_i) - (f_j - mu_j)` and `(f_j + mu_j) - (f_i - mu_i)`
//!   are at most `alpha`, and, when a threshold `theta` is set, `f_i - mu_i >= theta`.
//! * [`Trend::Emerging`]: anchored on the last dataset, visited backward. A candidate survives
//!   dataset `i` if `f_{i+1} - mu_{i+1} - (f_i + mu_i) > epsilon`.
//! * [`Trend::Descending`]: anchored on the first dataset, visited forward. A candidate
//!   survives dataset `i` if `f_{i-1} - mu_{i-1} - (f_i + mu_i) > epsilon`.
//!
//! # Examples
//!
//! ```
//! # use grosso::candidate::CandidateTracker;
//! # use grosso::candidate::Trend;
//! # use grosso::dataset::Dataset;
//! # use grosso::sequence::Sequence;
//! let pattern: Sequence = "1 -1".parse().unwrap();
//! let mut tracker = CandidateTracker::new(
//!     Trend::Emerging { epsilon: 0.05 },
//!     vec![0.02, 0.02],
//!     1,
//!     [(pattern.clone(), 0.3)],
//! )
//! .unwrap();
//!
//! // 1 transaction in 10 contains the pattern
//! let mut lines = vec!["1 -1 -2"];
//! lines.extend(["2 -1 -2"; 9]);
//! let earlier = Dataset::new(lines.iter().map(|l| Sequence::parse_transaction(l).unwrap()).collect());
//!
//! tracker.process(0, &earlier).unwrap();
//! assert_eq!(tracker.len(), 1);
//! ```

mod output;
mod tracker;

pub use self::output::Candidate;
pub use self::output::read_candidates;
pub use self::output::write_candidates;
pub use self::tracker::CandidateTracker;
pub use self::tracker::Trend;
