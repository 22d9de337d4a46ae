//! Reusable unit-operation fixtures.
//!
//! Each fixture builds a small, structurally faithful model in a
//! [`ModelTree`] and hands back typed handles to its variables:
//!
//! - [`Heater`]: material, energy and pressure balances with a heat duty
//!   and pressure drop. Eight variables, three rows.
//! - [`Valve`]: isenthalpic valve whose flow depends on the opening, the
//!   flow coefficient and the pressures on both sides. Eight variables,
//!   three rows.
//! - [`TwoHeaters`]: two heaters connected outlet to inlet, registered
//!   through [`register_inlets`](fixspec_engine::register_inlets).
//! - [`PinnedUnit`]: a unit left one short of square, closed by a row on
//!   its flowsheet.
//! - [`SingularUnit`]: a unit where one swap keeps the count balanced but
//!   leaves the structure singular.

use fixspec_core::{ConstraintId, PortDirection, PortId, ScopeId, VarId};
use fixspec_engine::{EngineConfig, Flowsheet, RegistryError};
use fixspec_tree::{ModelTree, TreeError};

// ── Heater ──────────────────────────────────────────────────────────

/// Heater unit: `Q` and `ΔP` act on a single stream.
///
/// Rows:
/// - material: `F_in = F_out`
/// - energy: `F_in H_in + Q = F_out H_out`
/// - pressure: `P_in + ΔP = P_out`
#[derive(Clone, Debug)]
pub struct Heater {
    pub scope: ScopeId,
    pub inlet_flow_mol: VarId,
    pub inlet_enth_mol: VarId,
    pub inlet_pressure: VarId,
    pub outlet_flow_mol: VarId,
    pub outlet_enth_mol: VarId,
    pub outlet_pressure: VarId,
    pub heat_duty: VarId,
    pub delta_p: VarId,
    pub inlet: PortId,
    pub outlet: PortId,
    pub material: ConstraintId,
    pub energy: ConstraintId,
    pub pressure: ConstraintId,
}

impl Heater {
    /// Build a heater scope called `name` under `parent`. Nothing is fixed.
    pub fn build(tree: &mut ModelTree, parent: ScopeId, name: &str) -> Result<Self, TreeError> {
        let scope = tree.add_scope(parent, name)?;
        let inlet_flow_mol = tree.add_var(scope, "inlet_flow_mol", 100.0)?;
        let inlet_enth_mol = tree.add_var(scope, "inlet_enth_mol", 3000.0)?;
        let inlet_pressure = tree.add_var(scope, "inlet_pressure", 1e5)?;
        let outlet_flow_mol = tree.add_var(scope, "outlet_flow_mol", 100.0)?;
        let outlet_enth_mol = tree.add_var(scope, "outlet_enth_mol", 3000.0)?;
        let outlet_pressure = tree.add_var(scope, "outlet_pressure", 1e5)?;
        let heat_duty = tree.add_var(scope, "heat_duty", 0.0)?;
        let delta_p = tree.add_var(scope, "deltaP", 0.0)?;

        let inlet = tree.add_port(
            scope,
            "inlet",
            Some(PortDirection::Inlet),
            &[inlet_flow_mol, inlet_enth_mol, inlet_pressure],
        )?;
        let outlet = tree.add_port(
            scope,
            "outlet",
            Some(PortDirection::Outlet),
            &[outlet_flow_mol, outlet_enth_mol, outlet_pressure],
        )?;

        let material = tree.add_equation(scope, "material_balance", &[inlet_flow_mol, outlet_flow_mol])?;
        let energy = tree.add_equation(
            scope,
            "energy_balance",
            &[inlet_flow_mol, inlet_enth_mol, outlet_flow_mol, outlet_enth_mol, heat_duty],
        )?;
        let pressure = tree.add_equation(
            scope,
            "pressure_balance",
            &[inlet_pressure, outlet_pressure, delta_p],
        )?;

        Ok(Self {
            scope,
            inlet_flow_mol,
            inlet_enth_mol,
            inlet_pressure,
            outlet_flow_mol,
            outlet_enth_mol,
            outlet_pressure,
            heat_duty,
            delta_p,
            inlet,
            outlet,
            material,
            energy,
            pressure,
        })
    }

    /// Inlet conditions.
    pub fn inlet_vars(&self) -> [VarId; 3] {
        [self.inlet_flow_mol, self.inlet_enth_mol, self.inlet_pressure]
    }

    /// Outlet conditions.
    pub fn outlet_vars(&self) -> [VarId; 3] {
        [self.outlet_flow_mol, self.outlet_enth_mol, self.outlet_pressure]
    }

    /// Unit-specific specifications: heat duty and pressure drop.
    pub fn unit_specs(&self) -> [VarId; 2] {
        [self.heat_duty, self.delta_p]
    }

    /// The five variables that square a stand-alone heater.
    pub fn state_vars(&self) -> [VarId; 5] {
        let [f, h, p] = self.inlet_vars();
        [f, h, p, self.heat_duty, self.delta_p]
    }

    /// A flowsheet holding one heater registered with all five state
    /// variables.
    pub fn registered(config: EngineConfig) -> Result<(Flowsheet, ScopeId, Self), RegistryError> {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let heater = Self::build(&mut tree, fs, "h1")?;
        let mut flowsheet = Flowsheet::new(tree, config);
        flowsheet.register(heater.scope, &heater.state_vars(), false)?;
        Ok((flowsheet, fs, heater))
    }
}

// ── Valve ───────────────────────────────────────────────────────────

/// Isenthalpic valve.
///
/// Rows:
/// - material: `F_in = F_out`
/// - energy: `H_in = H_out`
/// - flow: `F = Cv · opening · √(P_in − P_out)`
#[derive(Clone, Debug)]
pub struct Valve {
    pub scope: ScopeId,
    pub inlet_flow_mol: VarId,
    pub inlet_enth_mol: VarId,
    pub inlet_pressure: VarId,
    pub outlet_flow_mol: VarId,
    pub outlet_enth_mol: VarId,
    pub outlet_pressure: VarId,
    pub valve_opening: VarId,
    pub cv: VarId,
    pub inlet: PortId,
    pub outlet: PortId,
}

impl Valve {
    /// Build a valve scope called `name` under `parent`. Nothing is fixed.
    pub fn build(tree: &mut ModelTree, parent: ScopeId, name: &str) -> Result<Self, TreeError> {
        let scope = tree.add_scope(parent, name)?;
        let inlet_flow_mol = tree.add_var(scope, "inlet_flow_mol", 100.0)?;
        let inlet_enth_mol = tree.add_var(scope, "inlet_enth_mol", 3000.0)?;
        let inlet_pressure = tree.add_var(scope, "inlet_pressure", 2e5)?;
        let outlet_flow_mol = tree.add_var(scope, "outlet_flow_mol", 100.0)?;
        let outlet_enth_mol = tree.add_var(scope, "outlet_enth_mol", 3000.0)?;
        let outlet_pressure = tree.add_var(scope, "outlet_pressure", 1e5)?;
        let valve_opening = tree.add_var(scope, "valve_opening", 0.5)?;
        let cv = tree.add_var(scope, "Cv", 1.0)?;

        let inlet = tree.add_port(
            scope,
            "inlet",
            Some(PortDirection::Inlet),
            &[inlet_flow_mol, inlet_enth_mol, inlet_pressure],
        )?;
        let outlet = tree.add_port(
            scope,
            "outlet",
            Some(PortDirection::Outlet),
            &[outlet_flow_mol, outlet_enth_mol, outlet_pressure],
        )?;

        tree.add_equation(scope, "material_balance", &[inlet_flow_mol, outlet_flow_mol])?;
        tree.add_equation(scope, "isenthalpic", &[inlet_enth_mol, outlet_enth_mol])?;
        tree.add_equation(
            scope,
            "pressure_flow",
            &[inlet_flow_mol, inlet_pressure, outlet_pressure, valve_opening, cv],
        )?;

        Ok(Self {
            scope,
            inlet_flow_mol,
            inlet_enth_mol,
            inlet_pressure,
            outlet_flow_mol,
            outlet_enth_mol,
            outlet_pressure,
            valve_opening,
            cv,
            inlet,
            outlet,
        })
    }

    /// Unit-specific specifications: opening and flow coefficient.
    pub fn unit_specs(&self) -> [VarId; 2] {
        [self.valve_opening, self.cv]
    }

    /// The five variables that square a stand-alone valve.
    pub fn state_vars(&self) -> [VarId; 5] {
        [
            self.inlet_flow_mol,
            self.inlet_enth_mol,
            self.inlet_pressure,
            self.valve_opening,
            self.cv,
        ]
    }

    /// A flowsheet holding valve `v1`: the unit specifications registered
    /// with `allow_dof`, then the unconnected inlet promoted.
    pub fn registered(config: EngineConfig) -> Result<(Flowsheet, ScopeId, Self), RegistryError> {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let valve = Self::build(&mut tree, fs, "v1")?;
        let mut flowsheet = Flowsheet::new(tree, config);
        flowsheet.register(valve.scope, &valve.unit_specs(), true)?;
        flowsheet.register_inlets(fs)?;
        Ok((flowsheet, fs, valve))
    }
}

// ── TwoHeaters ──────────────────────────────────────────────────────

/// `fs.h1.outlet -> fs.h2.inlet`.
///
/// Each heater registers only its unit specifications (with `allow_dof`),
/// then [`Flowsheet::register_inlets`] promotes the inlet of `h1`; the
/// inlet of `h2` is connected and stays free. The flowsheet as a whole is
/// square.
#[derive(Clone, Debug)]
pub struct TwoHeaters {
    pub flowsheet: Flowsheet,
    pub fs: ScopeId,
    pub h1: Heater,
    pub h2: Heater,
    pub arc: ConstraintId,
}

impl TwoHeaters {
    pub fn build(config: EngineConfig) -> Result<Self, RegistryError> {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let h1 = Heater::build(&mut tree, fs, "h1")?;
        let h2 = Heater::build(&mut tree, fs, "h2")?;
        let arc = tree.connect(h1.outlet, h2.inlet)?;

        let mut flowsheet = Flowsheet::new(tree, config);
        flowsheet.register(h1.scope, &h1.unit_specs(), true)?;
        flowsheet.register(h2.scope, &h2.unit_specs(), true)?;
        flowsheet.register_inlets(fs)?;
        Ok(Self {
            flowsheet,
            fs,
            h1,
            h2,
            arc,
        })
    }
}

// ── PinnedUnit ──────────────────────────────────────────────────────

/// Unit `u` with `c(s, x, y)` and `s` registered; `y` is pinned by
/// `fs.pin(y)` outside the unit.
///
/// The unit alone has one degree of freedom; the flowsheet is square.
/// Swapping `s` for `x` is therefore rejected by a strict check anchored
/// at the unit, but fine in relaxed mode or when anchored at the root.
#[derive(Clone, Debug)]
pub struct PinnedUnit {
    pub flowsheet: Flowsheet,
    pub fs: ScopeId,
    pub unit: ScopeId,
    pub s: VarId,
    pub x: VarId,
    pub y: VarId,
}

impl PinnedUnit {
    pub fn build(config: EngineConfig) -> Result<Self, RegistryError> {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let unit = tree.add_scope(fs, "u")?;
        let s = tree.add_var(unit, "s", 1.0)?;
        let x = tree.add_var(unit, "x", 1.0)?;
        let y = tree.add_var(unit, "y", 1.0)?;
        tree.add_equation(unit, "c", &[s, x, y])?;
        tree.add_equation(fs, "pin", &[y])?;

        let mut flowsheet = Flowsheet::new(tree, config);
        flowsheet.register(unit, &[s], true)?;
        Ok(Self {
            flowsheet,
            fs,
            unit,
            s,
            x,
            y,
        })
    }
}

// ── SingularUnit ────────────────────────────────────────────────────

/// Unit `u` with `c1(x, y)`, `c2(x, y)`, `c3(w, z, y)` and `w` registered.
///
/// Swapping `w` for `y` keeps DOF at zero but leaves `c1` and `c2` with
/// the single unknown `x` while one of `w`, `z` is unconstrained.
/// Swapping `w` for `z` is regular.
#[derive(Clone, Debug)]
pub struct SingularUnit {
    pub flowsheet: Flowsheet,
    pub unit: ScopeId,
    pub x: VarId,
    pub y: VarId,
    pub w: VarId,
    pub z: VarId,
}

impl SingularUnit {
    pub fn build(config: EngineConfig) -> Result<Self, RegistryError> {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let unit = tree.add_scope(fs, "u")?;
        let x = tree.add_var(unit, "x", 0.0)?;
        let y = tree.add_var(unit, "y", 0.0)?;
        let w = tree.add_var(unit, "w", 0.0)?;
        let z = tree.add_var(unit, "z", 0.0)?;
        tree.add_equation(unit, "c1", &[x, y])?;
        tree.add_equation(unit, "c2", &[x, y])?;
        tree.add_equation(unit, "c3", &[w, z, y])?;

        let mut flowsheet = Flowsheet::new(tree, config);
        flowsheet.register(unit, &[w], false)?;
        Ok(Self {
            flowsheet,
            unit,
            x,
            y,
            w,
            z,
        })
    }
}
