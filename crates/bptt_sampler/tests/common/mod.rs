use bptt_sampler::{Batch, BpttBatchSampler};
use std::collections::BTreeSet;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber once per test binary.
/// Set `RUST_LOG=bptt_sampler=trace` to see sampler events.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Runs a full pass and collects every batch.
pub fn collect_batches(sampler: &BpttBatchSampler) -> Vec<Batch> {
    sampler.batches().collect()
}

/// Every index referenced by a source or target range of any batch.
pub fn referenced_indices(batches: &[Batch]) -> BTreeSet<usize> {
    batches
        .iter()
        .flatten()
        .flat_map(|window| window.source.clone().chain(window.target.clone()))
        .collect()
}
