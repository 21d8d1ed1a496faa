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

//! Text codec for the `-1`/`-2` sequence encoding.

use std::str::FromStr;

use crate::error::Error;
use crate::sequence::Item;
use crate::sequence::Itemset;
use crate::sequence::Sequence;

const ITEMSET_END: &str = "-1";
const SEQUENCE_END: &str = "-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Required,
    Optional,
}

fn parse(text: &str, terminator: Terminator) -> Result<Sequence, Error> {
    let mut itemsets = Vec::new();
    let mut current: Vec<Item> = Vec::new();
    let mut terminated = false;

    for token in text.split_whitespace() {
        if terminated {
            return Err(Error::malformed(format!(
                "unexpected token {token:?} after {SEQUENCE_END}"
            )));
        }
        match token {
            ITEMSET_END => {
                if current.is_empty() {
                    return Err(Error::malformed("empty itemset"));
                }
                itemsets.push(Itemset::new(std::mem::take(&mut current)));
            }
            SEQUENCE_END => {
                if !current.is_empty() {
                    return Err(Error::malformed(format!(
                        "itemset not closed by {ITEMSET_END} before {SEQUENCE_END}"
                    )));
                }
                terminated = true;
            }
            _ => {
                let item = token.parse::<Item>().map_err(|err| {
                    Error::malformed(format!("invalid item {token:?}")).set_source(err)
                })?;
                current.push(item);
            }
        }
    }

    if !current.is_empty() {
        return Err(Error::malformed(format!(
            "itemset not closed by {ITEMSET_END}"
        )));
    }
    if itemsets.is_empty() {
        return Err(Error::malformed("sequence has no itemset"));
    }
    if terminator == Terminator::Required && !terminated {
        return Err(Error::malformed(format!(
            "transaction not terminated by {SEQUENCE_END}"
        )));
    }
    Ok(Sequence::new(itemsets))
}

impl Sequence {
    /// Parses a transaction line, which must end with `-2`.
    pub fn parse_transaction(line: &str) -> Result<Self, Error> {
        parse(line, Terminator::Required).map_err(|err| err.with_context("line", line))
    }

    /// Parses a pattern, with or without the trailing `-2`.
    pub fn parse_pattern(text: &str) -> Result<Self, Error> {
        parse(text, Terminator::Optional).map_err(|err| err.with_context("pattern", text))
    }

    /// Encodes this sequence as a transaction line, terminated by `-2`.
    pub fn to_transaction_line(&self) -> String {
        format!("{self} {SEQUENCE_END}")
    }
}

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sequence::parse_pattern(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_transaction() {
        let s = Sequence::parse_transaction("10 20 -1 30 -1 -2").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.itemsets()[0].items(), &[10, 20]);
        assert_eq!(s.itemsets()[1].items(), &[30]);
    }

    #[test]
    fn test_parse_sorts_items() {
        let s = Sequence::parse_transaction("20 10 -1 -2").unwrap();
        assert_eq!(s.itemsets()[0].items(), &[10, 20]);
    }

    #[test]
    fn test_parse_pattern_terminator_is_optional() {
        let with: Sequence = "1 -1 2 -1 -2".parse().unwrap();
        let without: Sequence = "1 -1 2 -1".parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let s = Sequence::parse_transaction("  1   2 -1\t3 -1 -2 ").unwrap();
        assert_eq!(s.to_transaction_line(), "1 2 -1 3 -1 -2");
    }

    #[test]
    fn test_malformed_lines() {
        let cases = [
            "",
            "-2",
            "1 -1",
            "1 2 -2",
            "1 -1 -1 -2",
            "1 -1 -2 3",
            "a -1 -2",
            "-3 -1 -2",
            "1 -1 2",
        ];
        for line in cases {
            let err = Sequence::parse_transaction(line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "line {line:?}");
        }
    }

    #[test]
    fn test_error_carries_line() {
        let err = Sequence::parse_transaction("x -1 -2").unwrap_err();
        assert_eq!(err.context(), &[("line", "x -1 -2".to_string())]);
    }
}
