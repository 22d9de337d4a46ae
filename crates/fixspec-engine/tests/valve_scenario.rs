//! Integration test: a valve registered through its unit specifications
//! and inlet port, then respecified by outlet pressure.

use fixspec_core::ScopeId;
use fixspec_engine::{EngineConfig, Flowsheet, Replacement, ReplaceError};
use fixspec_test_utils::{init_tracing, ScriptedSolver, Valve};

fn valve() -> (Flowsheet, ScopeId, Valve) {
    init_tracing();
    Valve::registered(EngineConfig::default()).unwrap()
}

#[test]
fn specs_and_inlet_square_the_valve() {
    let (fs, _, v) = valve();
    assert_eq!(fs.tree().degrees_of_freedom(v.scope).unwrap(), 0);
    let mut listed = fs.list_state_vars(v.scope).unwrap();
    listed.sort();
    let mut expected = v.state_vars().to_vec();
    expected.sort();
    assert_eq!(listed, expected);
}

#[test]
fn opening_replaced_by_outlet_pressure() {
    let (mut fs, root, v) = valve();
    let scope = fs.replace(v.valve_opening, v.outlet_pressure).unwrap();
    assert_eq!(scope, v.scope);
    assert!(!fs.is_fixed(v.valve_opening).unwrap());
    assert!(fs.is_fixed(v.outlet_pressure).unwrap());
    assert_eq!(fs.list_guesses(root).unwrap(), vec![v.valve_opening]);
    assert_eq!(
        fs.list_replacements(root).unwrap(),
        vec![Replacement {
            original: v.valve_opening,
            substitute: v.outlet_pressure,
        }]
    );
}

#[test]
fn initialize_after_replacement_is_square_in_both_phases() {
    let (mut fs, _, v) = valve();
    fs.replace(v.valve_opening, v.outlet_pressure).unwrap();

    let mut solver = ScriptedSolver::new().fill_free_with(1.0);
    fs.initialize(v.scope, &mut solver).unwrap();

    let calls = solver.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].fixed, v.state_vars().to_vec());
    assert!(calls[1].fixed.contains(&v.outlet_pressure));
    assert!(!calls[1].fixed.contains(&v.valve_opening));
    assert!(calls.iter().all(|c| c.dof == Some(0)));

    // Specification restored; the opening keeps its solved guess.
    assert!(!fs.is_fixed(v.valve_opening).unwrap());
    assert!(fs.is_fixed(v.outlet_pressure).unwrap());
    assert_eq!(fs.tree().value(v.outlet_pressure).unwrap(), 1e5);
    assert_eq!(fs.tree().value(v.valve_opening).unwrap(), 1.0);
}

#[test]
fn flow_coefficient_cannot_trade_for_outlet_flow() {
    let (mut fs, _, v) = valve();
    match fs.replace(v.cv, v.outlet_flow_mol).unwrap_err() {
        ReplaceError::StructuralSingularity {
            scope, constraints, ..
        } => {
            assert_eq!(scope, "fs.v1");
            assert_eq!(constraints, vec!["fs.v1.material_balance".to_string()]);
        }
        other => panic!("expected singularity, got {other:?}"),
    }
    assert!(fs.is_fixed(v.cv).unwrap());
    assert!(!fs.is_fixed(v.outlet_flow_mol).unwrap());
}
