//! Integration test: a single heater through registration, replacement,
//! listing, reporting and staged initialization.

use fixspec_core::{ComponentRef, Termination};
use fixspec_engine::{EngineConfig, InitError, InitPhase, Replacement, ReplaceError};
use fixspec_test_utils::{init_tracing, Heater, ScriptedSolver};
use fixspec_tree::ModelTree;

fn heater() -> (fixspec_engine::Flowsheet, fixspec_core::ScopeId, Heater) {
    init_tracing();
    Heater::registered(EngineConfig::default()).unwrap()
}

// ── Registration ─────────────────────────────────────────────────────

#[test]
fn registration_squares_the_heater() {
    let (fs, _, h) = heater();
    assert_eq!(fs.tree().degrees_of_freedom(h.scope).unwrap(), 0);
    for var in h.state_vars() {
        assert!(fs.is_fixed(var).unwrap());
    }
}

#[test]
fn listings_before_any_replacement() {
    let (fs, root, h) = heater();
    for scope in [root, h.scope] {
        assert_eq!(fs.list_state_vars(scope).unwrap(), h.state_vars().to_vec());
        assert!(fs.list_replacements(scope).unwrap().is_empty());
        assert!(fs.list_guesses(scope).unwrap().is_empty());
        assert_eq!(fs.list_fixed_state_vars(scope).unwrap().len(), 5);
    }
    assert_eq!(fs.list_available_vars(root).unwrap(), h.outlet_vars().to_vec());
}

// ── Replacement ──────────────────────────────────────────────────────

#[test]
fn duty_replaced_by_outlet_enthalpy() {
    let (mut fs, root, h) = heater();
    let scope = fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    assert_eq!(scope, h.scope);

    assert!(!fs.is_fixed(h.heat_duty).unwrap());
    assert!(fs.is_fixed(h.outlet_enth_mol).unwrap());
    assert_eq!(fs.tree().degrees_of_freedom(h.scope).unwrap(), 0);

    assert_eq!(fs.list_state_vars(root).unwrap().len(), 5);
    assert_eq!(
        fs.list_replacements(root).unwrap(),
        vec![Replacement {
            original: h.heat_duty,
            substitute: h.outlet_enth_mol
        }]
    );
    assert_eq!(fs.list_guesses(root).unwrap(), vec![h.heat_duty]);
    assert_eq!(fs.list_fixed_state_vars(root).unwrap().len(), 4);
    assert_eq!(
        fs.list_available_vars(root).unwrap(),
        vec![h.outlet_flow_mol, h.outlet_pressure]
    );
}

#[test]
fn pressure_drop_cannot_be_replaced_by_outlet_flow() {
    // Counts balance, but the material balance loses its only unknown.
    let (mut fs, _, h) = heater();
    let err = fs.replace(h.delta_p, h.outlet_flow_mol).unwrap_err();
    match err {
        ReplaceError::StructuralSingularity {
            scope, constraints, ..
        } => {
            assert_eq!(scope, "fs.h1");
            assert_eq!(constraints, vec!["fs.h1.material_balance".to_string()]);
        }
        other => panic!("expected singularity, got {other:?}"),
    }
    assert!(fs.is_fixed(h.delta_p).unwrap());
    assert!(!fs.is_fixed(h.outlet_flow_mol).unwrap());
    assert!(fs.list_replacements(h.scope).unwrap().is_empty());
}

#[test]
fn replaced_state_var_cannot_be_replaced_again() {
    let (mut fs, _, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    let err = fs.replace(h.heat_duty, h.outlet_pressure).unwrap_err();
    assert!(matches!(err, ReplaceError::NotAStateVariable { var, .. } if var == h.heat_duty));
    let err = fs.replace(h.delta_p, h.outlet_enth_mol).unwrap_err();
    assert!(matches!(err, ReplaceError::NotFree { .. }));
}

#[test]
fn both_unit_specs_can_be_replaced() {
    let (mut fs, root, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    fs.replace(h.delta_p, h.outlet_pressure).unwrap();
    assert_eq!(fs.list_guesses(root).unwrap(), h.unit_specs().to_vec());
    assert_eq!(fs.list_replacements(root).unwrap().len(), 2);
    assert_eq!(fs.list_available_vars(root).unwrap(), vec![h.outlet_flow_mol]);
}

#[test]
fn partial_fix_surfaces_everywhere() {
    let (mut fs, root, h) = heater();
    let temps = fs
        .tree_mut()
        .add_indexed_var(h.scope, "wall_temperature", 3, 300.0)
        .unwrap();
    fs.tree_mut()
        .fix_component(ComponentRef::new(temps, 1))
        .unwrap();

    assert!(fs.is_fixed(temps).unwrap_err().is_partial_fix());
    assert!(fs.list_available_vars(root).unwrap_err().is_partial_fix());
    let err = fs.replace(h.heat_duty, temps).unwrap_err();
    assert!(matches!(err, ReplaceError::Tree(e) if e.is_partial_fix()));
    assert!(fs.is_fixed(h.heat_duty).unwrap());
}

// ── Report ───────────────────────────────────────────────────────────

#[test]
fn report_after_replacement() {
    let (mut fs, root, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    let text = fs.report(root).unwrap().to_string();
    assert_eq!(
        text,
        "Replacements in scope fs:\n\
         \x20 fs.h1.outlet_enth_mol -> fs.h1.heat_duty\n\
         \n\
         Unreplaced state variables in scope fs:\n\
         \x20 fs.h1.inlet_flow_mol\n\
         \x20 fs.h1.inlet_enth_mol\n\
         \x20 fs.h1.inlet_pressure\n\
         \x20 fs.h1.deltaP\n"
    );
}

// ── Staged initialization ────────────────────────────────────────────

#[test]
fn failed_state_var_solve_stops_before_replacements() {
    let (mut fs, _, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    let mut solver = ScriptedSolver::with_script([Termination::Infeasible]);

    let err = fs.staged_initialize(h.scope, &mut solver).unwrap_err();
    assert_eq!(
        err,
        InitError::Initialization {
            scope: "fs.h1".into(),
            phase: InitPhase::StateVars,
            termination: Termination::Infeasible,
        }
    );
    assert_eq!(solver.call_count(), 1);
    // Phase one re-fixed the duty; phase two never swapped it back out.
    assert!(fs.is_fixed(h.heat_duty).unwrap());
    assert!(fs.is_fixed(h.outlet_enth_mol).unwrap());
}

#[test]
fn failed_replacement_solve_names_phase() {
    let (mut fs, _, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    let mut solver = ScriptedSolver::with_script([
        Termination::Optimal,
        Termination::Other {
            reason: "restoration failed".into(),
        },
    ]);
    let err = fs.initialize(h.scope, &mut solver).unwrap_err();
    assert!(matches!(
        err,
        InitError::Initialization {
            phase: InitPhase::Replacements,
            ..
        }
    ));
    // The wrapper put the specification back.
    assert!(!fs.is_fixed(h.heat_duty).unwrap());
    assert!(fs.is_fixed(h.outlet_enth_mol).unwrap());
}

#[test]
fn initialize_sequences_anchors_and_restores() {
    let (mut fs, root, h) = heater();
    fs.replace(h.heat_duty, h.outlet_enth_mol).unwrap();
    fs.tree_mut().set_value(h.outlet_enth_mol, 4000.0).unwrap();
    let before = fs.tree().snapshot(root).unwrap();

    let mut solver = ScriptedSolver::new().fill_free_with(1.0);
    fs.initialize(h.scope, &mut solver).unwrap();

    let calls = solver.calls();
    assert_eq!(calls.len(), 2);
    // Phase one: the five registered state variables, square.
    assert_eq!(calls[0].fixed, h.state_vars().to_vec());
    assert_eq!(calls[0].dof, Some(0));
    // Phase two: outlet enthalpy instead of the duty.
    assert!(calls[1].fixed.contains(&h.outlet_enth_mol));
    assert!(!calls[1].fixed.contains(&h.heat_duty));
    assert_eq!(calls[1].dof, Some(0));

    // Same specification and fixed values; free values moved.
    let after = fs.tree().snapshot(root).unwrap();
    let fixed = |s: &fixspec_tree::FixedState| {
        s.entries()
            .iter()
            .filter(|e| e.fixed)
            .map(|e| (e.component, e.value))
            .collect::<Vec<_>>()
    };
    assert_eq!(fixed(&before), fixed(&after));
    assert_eq!(fs.tree().value(h.heat_duty).unwrap(), 1.0);
    assert_eq!(fs.tree().value(h.outlet_enth_mol).unwrap(), 4000.0);
}

#[test]
fn initializing_unregistered_scope_fails() {
    let (mut fs, root, _) = heater();
    let mut solver = ScriptedSolver::new();
    assert!(matches!(
        fs.initialize(root, &mut solver),
        Err(InitError::NotRegistered { .. })
    ));
    assert_eq!(solver.call_count(), 0);
}

#[test]
fn flowsheet_wraps_any_tree() {
    let mut tree = ModelTree::new();
    let root = tree.add_root("fs");
    let fs = fixspec_engine::Flowsheet::from(tree);
    assert!(fs.list_state_vars(root).unwrap().is_empty());
    assert_eq!(fs.config(), &EngineConfig::default());
}
