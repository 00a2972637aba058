//! Tachymeter Example Benchmarks
//!
//! Measures how sorting and lookup scale with input size.
//!
//! Run with:
//!   cargo run --release --example sorting               # Run all jobs
//!   cargo run --release --example sorting -- -l         # List jobs
//!   cargo run --release --example sorting -- sort_vec   # Run one job
//!
//! Results are printed as CSV; add a `tachymeter.toml` with
//! `[output] directory = "..."` to also get one file per job.

use tachymeter::prelude::*;

/// Deterministic pseudo-random data so runs are comparable
fn scrambled(size: u64) -> Vec<u64> {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut registry = Registry::new();

    // Setup (data generation) is untimed; only the sort is measured.
    registry.register(
        "sort_vec",
        powers_of(seq([1, 2, 5]), 10, 100_000, 10),
        |size| {
            let mut data = scrambled(size);
            move |_: u64| data.sort_unstable()
        },
        Duration::from_millis(20),
    );

    registry.register(
        "binary_search",
        powers(16, 1 << 20, 4),
        |size| {
            let data: Vec<u64> = (0..size).collect();
            move |n: u64| data.binary_search(&(n / 3)).is_ok()
        },
        Duration::from_millis(10),
    );

    registry.register(
        "hash_insert",
        seq_of(powers(1, 1000, 10), [1, 4]),
        |size| {
            let keys = scrambled(size);
            move |_: u64| {
                let mut set = std::collections::HashSet::with_capacity(keys.len());
                set.extend(keys.iter().copied());
                set.len()
            }
        },
        Duration::from_millis(10),
    );

    tachymeter::run(&mut registry)
}
