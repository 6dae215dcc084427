//! Modrange benchmark CLI
//!
//! Drains a seeded sampler at several pool sizes, verifying that every
//! value comes out exactly once and reporting per-draw latency plus the
//! observed range-count peak against the structure's capacity bound.

use std::time::Instant;

use modrange_core_rs::entropy::EntropyConfig;
use modrange_core_rs::sampler::{Sampler, SamplerConfig, SamplerError};

/// Per-size benchmark results, all latencies in seconds
struct BenchmarkReport {
    size: u64,
    times: Vec<f64>,
    max_ranges: usize,
    capacity_bound: u64,
}

impl BenchmarkReport {
    fn print(&self) {
        let mut sorted = self.times.clone();
        sorted.sort_by(f64::total_cmp);

        let mean_us = mean(&sorted) * 1_000_000.0;
        let p95_us = percentile(&sorted, 0.95) * 1_000_000.0;
        let max_us = sorted[sorted.len() - 1] * 1_000_000.0;

        println!();
        println!("Results for size={}:", self.size);
        println!("Average time per value: {:.2} microseconds", mean_us);
        println!("95th percentile time: {:.2} microseconds", p95_us);
        println!("Max time: {:.2} microseconds", max_us);
        println!(
            "Max ranges: {} (capacity bound: {})",
            self.max_ranges, self.capacity_bound
        );
        println!("{}", "-".repeat(50));
    }
}

/// Arithmetic mean of a non-empty sample
fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Nearest-rank percentile over a sorted non-empty sample
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx]
}

/// Drain a full pool of `size` values, timing every draw
fn run_benchmark(size: u64, seed: u64) -> Result<BenchmarkReport, SamplerError> {
    let mut sampler = Sampler::new(SamplerConfig {
        size,
        entropy: EntropyConfig::XorShift { seed },
    })?;

    let num_values = size;
    let mut times = Vec::with_capacity(num_values as usize);
    let mut seen = vec![false; size as usize];

    println!();
    println!("Benchmarking size={}, generating {} values", size, num_values);

    let progress_step = (num_values / 10).max(1);
    for i in 0..num_values {
        if i % progress_step == 0 {
            println!("Progress: {:.1}%", i as f64 / num_values as f64 * 100.0);
        }

        let start = Instant::now();
        let value = sampler.draw()?;
        times.push(start.elapsed().as_secs_f64());

        // Verify uniqueness
        let idx = value as usize;
        assert!(!seen[idx], "Duplicate value generated: {}", value);
        seen[idx] = true;
    }

    Ok(BenchmarkReport {
        size,
        times,
        max_ranges: sampler.max_ranges_seen(),
        capacity_bound: sampler.max_possible_ranges(),
    })
}

fn run() -> Result<(), SamplerError> {
    // Seeded for reproducibility
    let seed = 42;
    let sizes = [10_000u64, 100_000, 1_000_000, 10_000_000];

    for size in sizes {
        let report = run_benchmark(size, seed)?;
        report.print();
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Benchmark failed: {}", e);
        std::process::exit(1);
    }
}
