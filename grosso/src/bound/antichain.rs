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

use std::collections::HashSet;

use num_bigint::BigUint;

use crate::sequence::Sequence;

/// An antichain member and its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    sequence: Sequence,
    capacity: BigUint,
}

impl Member {
    /// Returns the member transaction.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Returns the capacity of the member transaction.
    pub fn capacity(&self) -> &BigUint {
        &self.capacity
    }
}

/// Outcome of [`Antichain::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The sequence is already a member.
    Duplicate,
    /// The sequence embeds into a scanned member and was not inserted.
    Dominated,
    /// The sequence was inserted.
    Inserted,
}

/// High-capacity transactions ordered by non-increasing capacity.
///
/// A sequence is refused when it embeds into a member scanned before the first member of
/// smaller capacity. Members are never removed on insertion; the estimator owning the
/// antichain evicts the weakest one when it cannot grow.
#[derive(Debug, Clone, Default)]
pub struct Antichain {
    members: Vec<Member>,
    present: HashSet<Sequence>,
}

impl Antichain {
    /// Creates an empty antichain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the members, strongest first.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the antichain has no member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if `sequence` is a member.
    pub fn contains(&self, sequence: &Sequence) -> bool {
        self.present.contains(sequence)
    }

    /// Returns the member with the smallest capacity.
    pub fn weakest(&self) -> Option<&Member> {
        self.members.last()
    }

    /// Removes and returns the member with the smallest capacity.
    pub fn pop_weakest(&mut self) -> Option<Member> {
        let member = self.members.pop()?;
        self.present.remove(&member.sequence);
        Some(member)
    }

    /// Returns true if `sequence` embeds into a member scanned before the first member whose
    /// capacity is below `capacity`; that member is scanned too.
    fn dominates(&self, sequence: &Sequence, capacity: &BigUint) -> bool {
        for member in &self.members {
            if sequence.is_embedded_in(&member.sequence) {
                return true;
            }
            if *capacity > member.capacity {
                return false;
            }
        }
        false
    }

    /// Inserts `sequence` unless it is a member or is dominated.
    ///
    /// The new member is placed before every member of equal capacity.
    pub fn insert(&mut self, sequence: Sequence, capacity: BigUint) -> Insertion {
        if self.present.contains(&sequence) {
            return Insertion::Duplicate;
        }
        if self.dominates(&sequence, &capacity) {
            return Insertion::Dominated;
        }
        let position = self
            .members
            .partition_point(|member| member.capacity > capacity);
        self.present.insert(sequence.clone());
        self.members.insert(position, Member { sequence, capacity });
        Insertion::Inserted
    }
}
