//! Fixspec: change which variables specify a process model without
//! breaking it.
//!
//! Depend on this crate to reach all of fixspec under one name. The
//! workspace crates behind it stay usable on their own.
//!
//! # Quick start
//!
//! ```rust
//! use fixspec::prelude::*;
//!
//! // A unit with one balance: feed + duty determine the product.
//! let mut tree = ModelTree::new();
//! let fs = tree.add_root("fs");
//! let unit = tree.add_scope(fs, "heater").unwrap();
//! let feed = tree.add_var(unit, "feed_enth", 3000.0).unwrap();
//! let duty = tree.add_var(unit, "heat_duty", 0.0).unwrap();
//! let product = tree.add_var(unit, "product_enth", 3000.0).unwrap();
//! tree.add_equation(unit, "energy_balance", &[feed, duty, product]).unwrap();
//!
//! let mut flowsheet = Flowsheet::new(tree, EngineConfig::default());
//! flowsheet.register(unit, &[feed, duty], false).unwrap();
//!
//! // Specify the product enthalpy instead of the duty.
//! flowsheet.replace(duty, product).unwrap();
//! assert_eq!(flowsheet.list_guesses(fs).unwrap(), vec![duty]);
//! assert_eq!(
//!     flowsheet.report(fs).unwrap().to_string(),
//!     "Replacements in scope fs:\n  fs.heater.product_enth -> fs.heater.heat_duty\n\n\
//!      Unreplaced state variables in scope fs:\n  fs.heater.feed_enth\n"
//! );
//! ```
//!
//! # Modules
//!
//! The prelude covers day-to-day use. Everything else is reached through the
//! crate it lives in:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fixspec-core` | IDs, port directions, solver terminations |
//! | [`tree`] | `fixspec-tree` | The model tree, fixed flags, DOF, snapshots |
//! | [`incidence`] | `fixspec-incidence` | Matching and Dulmage-Mendelsohn partition |
//! | [`engine`] | `fixspec-engine` | Registry, replacement, listings, staged initialization |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers and shared types (`fixspec-core`).
pub use fixspec_core as types;

/// The hierarchical model (`fixspec-tree`).
///
/// [`tree::ModelTree`] owns every scope, variable, constraint and port,
/// tracks fixed flags per component and counts degrees of freedom.
pub use fixspec_tree as tree;

/// Structural analysis (`fixspec-incidence`).
///
/// [`incidence::IncidenceGraph`] builds the free-component / active-row
/// graph of a scope; [`incidence::maximum_matching`] and
/// [`incidence::dulmage_mendelsohn`] work on any
/// [`incidence::Bipartite`].
pub use fixspec_incidence as incidence;

/// State-variable registry and replacement engine (`fixspec-engine`).
///
/// [`engine::Flowsheet`] bundles a tree with its registry and
/// configuration; the same operations exist as free functions.
pub use fixspec_engine as engine;

/// Common imports for typical fixspec usage.
///
/// ```rust
/// use fixspec::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use fixspec_core::{
        ComponentRef, ConstraintId, PortDirection, PortId, ScopeId, Termination, VarId,
    };

    // Tree
    pub use fixspec_tree::{FixedState, ModelTree, TreeError};

    // Engine
    pub use fixspec_engine::{
        EngineConfig, Flowsheet, InitError, InitPhase, Registry, RegistryError, ReplaceError,
        Replacement, ReplacementReport, ScopePolicy, Solver, ValidationMode,
    };
}
