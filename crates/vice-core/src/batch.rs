//! Batch Runner
//!
//! Runs many independent seeded simulations on scoped worker threads. Every
//! run builds its own agent state and debt ledger; only the catalog and
//! configuration are shared, read-only.

use std::thread;

use vice_events::SimulationReport;

use crate::actions::ActionCatalog;
use crate::config::SimConfig;
use crate::simulation::{Simulation, SimulationParams};

/// `count` consecutive seeds starting at `first`
pub fn seed_range(first: u64, count: usize) -> Vec<u64> {
    (0..count as u64).map(|offset| first.wrapping_add(offset)).collect()
}

/// Run one simulation per seed, returning reports in seed order.
///
/// Seeds are split into contiguous chunks, one per worker.
pub fn run_batch(
    catalog: &ActionCatalog,
    config: &SimConfig,
    params: &SimulationParams,
    seeds: &[u64],
    workers: usize,
) -> Vec<SimulationReport> {
    if seeds.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, seeds.len());
    let chunk_size = seeds.len().div_ceil(workers);
    tracing::info!(runs = seeds.len(), workers, "Starting batch");

    thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&seed| {
                            Simulation::new(catalog, config, params.clone())
                                .with_seed(seed)
                                .run()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_in_seed_order() {
        let catalog = ActionCatalog::default();
        let config = SimConfig::default();
        let params = SimulationParams::new(0.5, 1000, 0.0, 15, 1.0);
        let seeds = vec![9, 3, 27, 1, 14];

        let reports = run_batch(&catalog, &config, &params, &seeds, 3);
        let returned: Vec<u64> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(returned, seeds);
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let catalog = ActionCatalog::default();
        let config = SimConfig::default();
        let params = SimulationParams::new(0.8, 500, 0.4, 20, 1.2);
        let seeds = seed_range(100, 6);

        let parallel = run_batch(&catalog, &config, &params, &seeds, 4);
        let sequential: Vec<SimulationReport> = seeds
            .iter()
            .map(|&seed| Simulation::new(&catalog, &config, params.clone()).with_seed(seed).run())
            .collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_empty_batch() {
        let catalog = ActionCatalog::default();
        let config = SimConfig::default();
        let params = SimulationParams::from_defaults(&config.simulation);
        assert!(run_batch(&catalog, &config, &params, &[], 4).is_empty());
    }

    #[test]
    fn test_seed_range() {
        assert_eq!(seed_range(5, 3), vec![5, 6, 7]);
        assert!(seed_range(0, 0).is_empty());
    }
}
