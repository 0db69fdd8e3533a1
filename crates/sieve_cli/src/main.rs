use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sieve_core::{BloomFilter, FilterPlan};

#[derive(Parser)]
#[command(name = "sieve", about = "Bloom filter capacity planning and simulation")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the derived filter dimensions without allocating anything.
    Plan {
        #[arg(long)]
        population: u64,
        #[arg(long)]
        error: f64,
    },

    /// Build a filter, insert a random population and measure the observed
    /// false-positive rate against the configured one.
    Simulate {
        #[arg(long)]
        population: u64,
        #[arg(long)]
        error: f64,
        /// Number of never-inserted keys to probe.
        #[arg(long, default_value_t = 100_000)]
        probes: u64,
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Plan { population, error } => {
            let plan = FilterPlan::new(population, error)?;
            println!("{plan} (target error rate: {error})");
        }

        Cmd::Simulate {
            population,
            error,
            probes,
            seed,
        } => {
            let plan = FilterPlan::new(population, error)?;
            let mut filter = BloomFilter::with_plan(plan);
            let mut rng = StdRng::seed_from_u64(seed);

            // Tag bits keep the inserted and probed key spaces disjoint.
            for _ in 0..population {
                filter.insert_hashed(rng.random::<u64>() << 1);
            }
            let hits = (0..probes)
                .filter(|_| filter.lookup_hashed(rng.random::<u64>() << 1 | 1))
                .count();

            println!("{plan}");
            println!(
                "probes: {probes}, false positives: {hits}, observed rate: {:.5}, target: {error}",
                hits as f64 / probes as f64,
            );
        }
    }

    Ok(())
}
