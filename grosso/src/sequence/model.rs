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

use std::fmt;

/// Identifier of an item.
pub type Item = u32;

/// A non-empty set of items, stored sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset {
    items: Vec<Item>,
}

impl Itemset {
    /// Creates an itemset from the given items, sorting them and dropping duplicates.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn new(mut items: Vec<Item>) -> Self {
        assert!(!items.is_empty(), "an itemset must contain at least one item");
        items.sort_unstable();
        items.dedup();
        Self { items }
    }

    /// Returns the sorted items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if every item of `self` appears in `other`.
    ///
    /// Both item lists are sorted, so this is a single merge-style scan over `other`.
    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut candidates = other.items.iter();
        self.items
            .iter()
            .all(|item| candidates.any(|candidate| candidate == item))
    }

    /// Returns how many items of `self` also appear in `other`.
    pub fn overlap(&self, other: &Itemset) -> usize {
        self.items
            .iter()
            .filter(|item| other.items.binary_search(item).is_ok())
            .count()
    }
}

/// An ordered sequence of itemsets: a transaction or a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence {
    itemsets: Vec<Itemset>,
}

impl Sequence {
    /// Creates a sequence from its itemsets.
    ///
    /// # Panics
    ///
    /// Panics if `itemsets` is empty.
    pub fn new(itemsets: Vec<Itemset>) -> Self {
        assert!(
            !itemsets.is_empty(),
            "a sequence must contain at least one itemset"
        );
        Self { itemsets }
    }

    /// Returns the itemsets in order.
    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    /// Returns the number of itemsets.
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    /// Returns the total number of items across all itemsets.
    pub fn num_items(&self) -> usize {
        self.itemsets.iter().map(Itemset::len).sum()
    }

    /// Returns every item occurrence, itemset by itemset.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.itemsets
            .iter()
            .flat_map(|itemset| itemset.items().iter().copied())
    }

    /// Returns true if `self` embeds into `other`.
    ///
    /// Itemsets are matched greedily to the earliest itemset of `other` that contains them,
    /// which finds an embedding whenever one exists.
    pub fn is_embedded_in(&self, other: &Sequence) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut targets = other.itemsets.iter();
        self.itemsets
            .iter()
            .all(|itemset| targets.any(|target| itemset.is_subset_of(target)))
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{item} ")?;
        }
        f.write_str("-1")
    }
}

/// Formats the pattern encoding, without the `-2` terminator.
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, itemset) in self.itemsets.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{itemset}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(itemsets: &[&[Item]]) -> Sequence {
        Sequence::new(
            itemsets
                .iter()
                .map(|items| Itemset::new(items.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_itemset_subset() {
        let small = Itemset::new(vec![3, 1]);
        let large = Itemset::new(vec![1, 2, 3]);
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(small.is_subset_of(&small));

        let repeated = Itemset::new(vec![2, 1, 1]);
        assert_eq!(repeated.items(), &[1, 2]);
        assert!(repeated.is_subset_of(&Itemset::new(vec![1, 2])));
    }

    #[test]
    fn test_itemset_overlap() {
        let a = Itemset::new(vec![1, 2, 5]);
        let b = Itemset::new(vec![2, 5, 9]);
        assert_eq!(a.overlap(&b), 2);
        assert_eq!(a.overlap(&Itemset::new(vec![7])), 0);
    }

    #[test]
    fn test_embedding_respects_order() {
        let t = seq(&[&[10, 20], &[30], &[10]]);
        assert!(seq(&[&[10], &[30]]).is_embedded_in(&t));
        assert!(seq(&[&[30], &[10]]).is_embedded_in(&t));
        assert!(seq(&[&[10], &[10]]).is_embedded_in(&t));
        assert!(!seq(&[&[30], &[20]]).is_embedded_in(&t));
        assert!(!seq(&[&[10, 30]]).is_embedded_in(&t));
    }

    #[test]
    fn test_longer_never_embeds_into_shorter() {
        let short = seq(&[&[1, 2, 3]]);
        let long = seq(&[&[1], &[2]]);
        assert!(!long.is_embedded_in(&short));
    }

    #[test]
    fn test_display_pattern() {
        let s = seq(&[&[20, 10], &[30]]);
        assert_eq!(s.to_string(), "10 20 -1 30 -1");
        assert_eq!(s.num_items(), 3);
        assert_eq!(s.items().collect::<Vec<_>>(), vec![10, 20, 30]);
    }
}
