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

//! Drawing synthetic datasets from a real one.
//!
//! Transactions are drawn uniformly at random with replacement, so a sample behaves like an
//! independent draw from the empirical distribution of the source dataset. Sampling the same
//! source several times yields datasets whose patterns are stable by construction.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::dataset::Dataset;
use crate::error::Error;
use crate::sequence::Sequence;

/// Draws `size` transactions from `dataset` uniformly at random, with replacement.
///
/// # Errors
///
/// Fails with [`crate::error::ErrorKind::EmptyDataset`] if `dataset` has no transactions.
pub fn sample_transactions<'a, R: Rng + ?Sized>(
    dataset: &'a Dataset,
    size: usize,
    rng: &mut R,
) -> Result<Vec<&'a Sequence>, Error> {
    dataset.ensure_not_empty()?;
    let transactions = dataset.transactions();
    Ok((0..size)
        .map(|_| &transactions[rng.random_range(0..transactions.len())])
        .collect())
}

/// Writes a sample of `size` transactions of `dataset` to `output`, seeding the generator with
/// `seed`.
///
/// # Errors
///
/// Fails if `dataset` is empty or `output` cannot be written.
pub fn write_sample(
    dataset: &Dataset,
    output: &Path,
    size: usize,
    seed: u64,
) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let sample = sample_transactions(dataset, size, &mut rng)?;

    let file = File::create(output).map_err(|err| Error::io(output, err))?;
    let mut writer = BufWriter::new(file);
    for transaction in sample {
        writeln!(writer, "{}", transaction.to_transaction_line())
            .map_err(|err| Error::io(output, err))?;
    }
    writer.flush().map_err(|err| Error::io(output, err))?;
    tracing::debug!(size, seed, output = %output.display(), "sample written");
    Ok(())
}
