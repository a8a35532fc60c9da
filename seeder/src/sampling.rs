//! Random draws shared by the stages.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

use crate::config::SubsetSizing;
use crate::error::SeedError;
use crate::seed::Stage;

/// One element of `pool`, uniformly.
pub fn pick<'a, T, R>(
    pool: &'a [T],
    rng: &mut R,
    stage: Stage,
    pool_name: &'static str,
) -> Result<&'a T, SeedError>
where
    R: Rng + ?Sized,
{
    pool.choose(rng).ok_or(SeedError::EmptyPool { stage, pool: pool_name })
}

/// `count` distinct elements of `pool` (fewer if the pool is smaller).
pub fn pick_distinct<'a, T, R>(
    pool: &'a [T],
    count: usize,
    rng: &mut R,
    stage: Stage,
    pool_name: &'static str,
) -> Result<Vec<&'a T>, SeedError>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(SeedError::EmptyPool { stage, pool: pool_name });
    }
    Ok(pool.choose_multiple(rng, count.min(pool.len())).collect())
}

/// Number of pool elements to draw for one user.
pub fn subset_size<R>(policy: SubsetSizing, pool_len: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    match policy {
        SubsetSizing::All => pool_len,
        SubsetSizing::UpToHalf => rng.random_range(1..=(pool_len / 2).max(1)),
    }
}

/// Values already handed out for one unique column.
#[derive(Debug)]
pub struct UniqueValues {
    seen: HashSet<String>,
    max_attempts: u32,
}

impl UniqueValues {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            seen: HashSet::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Draws from `generate` until it yields an unseen value.
    pub fn next<R, F>(
        &mut self,
        rng: &mut R,
        stage: Stage,
        field: &'static str,
        mut generate: F,
    ) -> Result<String, SeedError>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> String,
    {
        for _ in 0..self.max_attempts {
            let candidate = generate(rng);
            if self.seen.insert(candidate.clone()) {
                return Ok(candidate);
            }
            log::debug!("{}: {} '{}' already taken, resampling", stage, field, candidate);
        }

        Err(SeedError::UniqueValuesExhausted {
            stage,
            field,
            attempts: self.max_attempts,
        })
    }
}

/// A timestamp between Jan 1 00:00 UTC of the current year and now.
pub fn this_year<R>(rng: &mut R) -> DateTime<Utc>
where
    R: Rng + ?Sized,
{
    let now = Utc::now();
    let start = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let span = (now - start).num_seconds().max(1);
    start + Duration::seconds(rng.random_range(0..span))
}

/// Start and end of a quiz, both within the current year, start strictly first.
pub fn quiz_window<R>(rng: &mut R) -> (DateTime<Utc>, DateTime<Utc>)
where
    R: Rng + ?Sized,
{
    let a = this_year(rng);
    let b = this_year(rng);
    match a.cmp(&b) {
        std::cmp::Ordering::Less => (a, b),
        std::cmp::Ordering::Greater => (b, a),
        std::cmp::Ordering::Equal => (a, a + Duration::hours(1)),
    }
}
