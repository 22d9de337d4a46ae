//! Benchmark profiles for the fixspec engine.
//!
//! - [`heater_train`]: `n` heaters chained outlet to inlet on one
//!   flowsheet, registered and square
//! - [`random_incidence`]: a seeded random [`Bipartite`] graph for the
//!   matching and partition kernels

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fixspec_core::ScopeId;
use fixspec_engine::{EngineConfig, Flowsheet, RegistryError};
use fixspec_incidence::{Bipartite, IncidenceError};
use fixspec_test_utils::Heater;
use fixspec_tree::ModelTree;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A chain of heaters on a single flowsheet.
#[derive(Clone, Debug)]
pub struct HeaterTrain {
    pub flowsheet: Flowsheet,
    pub fs: ScopeId,
    pub heaters: Vec<Heater>,
}

/// Build `fs.h0 -> fs.h1 -> ... -> fs.h{n-1}`.
///
/// Each heater registers its duty and pressure drop with `allow_dof`; the
/// inlet of `h0` is then promoted by
/// [`register_inlets`](fixspec_engine::register_inlets), which squares
/// the flowsheet.
pub fn heater_train(n: usize, config: EngineConfig) -> Result<HeaterTrain, RegistryError> {
    let mut tree = ModelTree::new();
    let fs = tree.add_root("fs");
    let mut heaters: Vec<Heater> = Vec::with_capacity(n);
    for i in 0..n {
        let h = Heater::build(&mut tree, fs, &format!("h{i}"))?;
        if let Some(prev) = heaters.last() {
            tree.connect(prev.outlet, h.inlet)?;
        }
        heaters.push(h);
    }

    let mut flowsheet = Flowsheet::new(tree, config);
    for h in &heaters {
        flowsheet.register(h.scope, &h.unit_specs(), true)?;
    }
    flowsheet.register_inlets(fs)?;
    Ok(HeaterTrain {
        flowsheet,
        fs,
        heaters,
    })
}

/// Random incidence with `n` variables and `n` constraints, each row
/// touching up to `per_row` variables drawn uniformly.
///
/// Deterministic for a given `seed`.
pub fn random_incidence(n: usize, per_row: usize, seed: u64) -> Result<Bipartite, IncidenceError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut g = Bipartite::new(n);
    if n == 0 {
        return Ok(g);
    }
    let mut row = Vec::with_capacity(per_row);
    for _ in 0..n {
        row.clear();
        row.extend((0..per_row).map(|_| (rng.next_u64() % n as u64) as u32));
        g.add_constraint(&row)?;
    }
    Ok(g)
}
