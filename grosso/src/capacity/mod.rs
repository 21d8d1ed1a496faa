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

//! Per-transaction capacity: how many distinct patterns a single transaction can contain.
//!
//! # Overview
//!
//! The capacity of a transaction is an upper bound on the number of distinct non-empty
//! sequences that embed into it. It is the per-transaction quantity from which
//! [`crate::bound`] derives an upper bound on the VC-dimension of sequential patterns over a
//! whole dataset, so it must never be smaller than the true count, and the tighter it is the
//! smaller the resulting deviation bound.
//!
//! Three estimators are provided, from loosest to tightest:
//!
//! * [`naive_capacity`]: `2^L - 1` where `L` is the number of items in the transaction. Every
//!   non-empty subset of item occurrences is counted as a distinct pattern.
//! * [`containment_capacity`]: removes, for every itemset contained in a larger itemset of the
//!   same transaction, the `2^|itemset| - 1` patterns it can only duplicate.
//! * [`capacity`]: credits partial overlaps too. Itemsets are visited by increasing size and,
//!   for each of them, the largest double-counting term against any remaining overlapping
//!   itemset is subtracted.
//!
//! For every transaction `naive_capacity >= containment_capacity >= capacity`.
//!
//! All values are arbitrary precision integers: transactions with more than a hundred items
//! are common and `2^L` quickly leaves the range of machine integers.
//!
//! # Examples
//!
//! ```
//! # use grosso::capacity;
//! # use grosso::sequence::Sequence;
//! # use num_bigint::BigUint;
//! let t = Sequence::parse_transaction("1 2 -1 1 -1 -2").unwrap();
//! assert_eq!(capacity::naive_capacity(&t), BigUint::from(7u32));
//! assert_eq!(capacity::capacity(&t), BigUint::from(6u32));
//! ```

mod comparison;
mod estimator;

pub use self::comparison::CapacityComparison;
pub use self::estimator::CapacityBounds;
pub use self::estimator::capacity;
pub use self::estimator::containment_capacity;
pub use self::estimator::naive_capacity;
