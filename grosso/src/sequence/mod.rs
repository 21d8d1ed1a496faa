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

//! Itemset sequences and the embedding order between them.
//!
//! # Overview
//!
//! A [`Sequence`] is an ordered list of [`Itemset`]s, and an itemset is a sorted set of
//! non-negative item identifiers. Transactions of a dataset and candidate patterns share this
//! representation.
//!
//! A sequence `a` *embeds* into a sequence `b` when there is a strictly increasing mapping
//! from the positions of `a` to the positions of `b` such that every itemset of `a` is a subset
//! of the itemset it maps to. Embedding is a partial order: it is reflexive and transitive, and
//! it is the order under which the antichains of [`crate::bound`] are built.
//!
//! # Text encoding
//!
//! Items of an itemset are written in non-decreasing order and followed by `-1`. A transaction
//! line ends with `-2`; a pattern line, as produced by sequential pattern miners, omits it.
//!
//! ```
//! # use grosso::sequence::Sequence;
//! let transaction = Sequence::parse_transaction("10 20 -1 30 -1 -2").unwrap();
//! assert_eq!(transaction.len(), 2);
//! assert_eq!(transaction.num_items(), 3);
//! assert_eq!(transaction.to_transaction_line(), "10 20 -1 30 -1 -2");
//!
//! let pattern: Sequence = "20 -1 30 -1".parse().unwrap();
//! assert!(pattern.is_embedded_in(&transaction));
//! assert!(!transaction.is_embedded_in(&pattern));
//! ```

mod codec;
mod model;

pub use self::model::Item;
pub use self::model::Itemset;
pub use self::model::Sequence;
