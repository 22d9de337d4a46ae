//! Inlet ports: promotion to state variables, and holding the feed
//! state during initialization.

use fixspec_core::{PortDirection, ScopeId, VarId};
use fixspec_tree::{ModelTree, TreeError};
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Promote the members of every unconnected inlet port under `root` to
/// state variables of the port's scope.
///
/// A scope without a registration gets an empty one first; a registered
/// scope has the members appended. Members already in the set are left
/// alone, the others are fixed and appended. Returns the promoted
/// variables in subtree order.
///
/// Every port in the subtree must carry a direction tag. That is checked
/// before anything is touched, so a [`RegistryError::MissingDirectionTag`]
/// leaves tree and registry unchanged.
///
/// Call this after the scopes' own [`register`](crate::registrar::register)
/// calls: registering a scope that this function already promoted into is
/// rejected as a re-registration.
pub fn register_inlets(
    tree: &mut ModelTree,
    registry: &mut Registry,
    root: ScopeId,
) -> Result<Vec<VarId>, RegistryError> {
    let ports = tree.ports_in(root)?;
    let mut inlets: Vec<(ScopeId, Vec<VarId>)> = Vec::new();
    for &port_id in &ports {
        let port = tree.port(port_id)?;
        match port.direction() {
            None => {
                return Err(RegistryError::MissingDirectionTag {
                    port: port_id,
                    path: tree.port_path(port_id)?,
                })
            }
            Some(PortDirection::Inlet) if !port.is_connected() => {
                inlets.push((port.scope(), port.members().to_vec()));
            }
            Some(direction) => {
                debug!(port = %tree.port_path(port_id)?, %direction, "port skipped");
            }
        }
    }

    let mut promoted = Vec::new();
    for (scope, members) in inlets {
        let set = registry.state_vars_mut(scope);
        for var in members {
            if set.insert(var) {
                tree.fix(var)?;
                promoted.push(var);
            }
        }
    }
    info!(
        scope = %tree.scope_path(root)?,
        ports = ports.len(),
        promoted = promoted.len(),
        "inlet ports registered"
    );
    Ok(promoted)
}

/// Fix the members of every inlet port under `scope` that is fed from
/// outside the subtree.
///
/// Unconnected inlets and inlets whose upstream port lives outside `scope`
/// are held; an inlet connected to a port inside the subtree is left to
/// the linking rows. Untagged ports are skipped. Returns the fixed
/// variables in subtree order.
pub fn fix_inlets(tree: &mut ModelTree, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
    let mut held = Vec::new();
    for port_id in tree.ports_in(scope)? {
        let port = tree.port(port_id)?;
        if port.direction() != Some(PortDirection::Inlet) {
            continue;
        }
        let internal = match port.upstream() {
            Some(up) => tree.is_within(tree.port(up)?.scope(), scope)?,
            None => false,
        };
        if internal {
            continue;
        }
        let members = port.members().to_vec();
        for var in members {
            tree.fix(var)?;
            held.push(var);
        }
    }
    debug!(scope = %tree.scope_path(scope)?, held = held.len(), "inlet state held");
    Ok(held)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    struct Units {
        tree: ModelTree,
        fs: ScopeId,
        a: ScopeId,
        b: ScopeId,
        a_in: [VarId; 2],
        b_in: [VarId; 2],
    }

    /// Two units a -> b, each with a two-member inlet and outlet port.
    fn units(connect: bool) -> Units {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let mut make = |name: &str| {
            let u = tree.add_scope(fs, name).unwrap();
            let vars: Vec<VarId> = ["in_f", "in_h", "out_f", "out_h"]
                .iter()
                .map(|n| tree.add_var(u, *n, 0.0).unwrap())
                .collect();
            let inlet = tree
                .add_port(u, "inlet", Some(PortDirection::Inlet), &vars[..2])
                .unwrap();
            let outlet = tree
                .add_port(u, "outlet", Some(PortDirection::Outlet), &vars[2..])
                .unwrap();
            (u, [vars[0], vars[1]], inlet, outlet)
        };
        let (a, a_in, _, a_out) = make("a");
        let (b, b_in, b_inlet, _) = make("b");
        if connect {
            tree.connect(a_out, b_inlet).unwrap();
        }
        Units {
            tree,
            fs,
            a,
            b,
            a_in,
            b_in,
        }
    }

    #[test]
    fn unconnected_inlets_are_promoted() {
        let Units {
            mut tree,
            fs,
            a,
            b,
            a_in,
            b_in,
        } = units(false);
        let mut registry = Registry::new();
        let promoted = register_inlets(&mut tree, &mut registry, fs).unwrap();
        assert_eq!(promoted, vec![a_in[0], a_in[1], b_in[0], b_in[1]]);
        assert!(tree.is_fixed(a_in[0]).unwrap());
        assert!(registry.is_registered(a));
        assert!(registry.is_registered(b));
        assert!(registry.log(a).is_empty());
    }

    #[test]
    fn connected_inlet_is_skipped() {
        let Units {
            mut tree,
            fs,
            a,
            b,
            a_in,
            b_in,
        } = units(true);
        let mut registry = Registry::new();
        let promoted = register_inlets(&mut tree, &mut registry, fs).unwrap();
        assert_eq!(promoted, a_in.to_vec());
        assert!(registry.is_registered(a));
        assert!(!registry.is_registered(b));
        assert!(!tree.is_fixed(b_in[0]).unwrap());
    }

    #[test]
    fn appends_to_existing_registration_without_duplicates() {
        let Units {
            mut tree, fs, a, a_in, ..
        } = units(true);
        let mut registry = Registry::new();
        let duty = tree.add_var(a, "duty", 0.0).unwrap();
        tree.fix(duty).unwrap();
        registry.insert(a, IndexSet::from([duty, a_in[0]]));

        let promoted = register_inlets(&mut tree, &mut registry, fs).unwrap();
        assert_eq!(promoted, vec![a_in[1]]);
        let set: Vec<VarId> = registry.state_vars(a).unwrap().iter().copied().collect();
        assert_eq!(set, vec![duty, a_in[0], a_in[1]]);

        // Idempotent once everything is promoted.
        assert!(register_inlets(&mut tree, &mut registry, fs)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn untagged_port_rejected_before_any_mutation() {
        let Units {
            mut tree,
            fs,
            b,
            a_in,
            ..
        } = units(false);
        let stray = tree.add_var(b, "stray", 0.0).unwrap();
        let port = tree.add_port(b, "aux", None, &[stray]).unwrap();
        let mut registry = Registry::new();
        let err = register_inlets(&mut tree, &mut registry, fs).unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingDirectionTag {
                port,
                path: "fs.b.aux".into()
            }
        );
        assert!(!tree.is_fixed(a_in[0]).unwrap());
        assert!(registry.registered_scopes().next().is_none());
    }

    // ── fix_inlets ─────────────────────────────────────────────

    #[test]
    fn fix_inlets_holds_feeds_from_outside_the_subtree() {
        let Units {
            mut tree,
            fs,
            a,
            b,
            a_in,
            b_in,
        } = units(true);

        // Seen from b alone, its inlet is fed by a.
        assert_eq!(fix_inlets(&mut tree, b).unwrap(), b_in.to_vec());
        assert!(tree.is_fixed(b_in[0]).unwrap());
        assert!(!tree.is_fixed(a_in[0]).unwrap());

        // Seen from fs, the a -> b link is internal.
        tree.unfix_all(fs).unwrap();
        assert_eq!(fix_inlets(&mut tree, fs).unwrap(), a_in.to_vec());
        assert!(!tree.is_fixed(b_in[1]).unwrap());
        assert_eq!(fix_inlets(&mut tree, a).unwrap(), a_in.to_vec());
    }

    #[test]
    fn fix_inlets_skips_untagged_ports() {
        let Units { mut tree, b, .. } = units(false);
        let stray = tree.add_var(b, "stray", 0.0).unwrap();
        tree.add_port(b, "aux", None, &[stray]).unwrap();
        let held = fix_inlets(&mut tree, b).unwrap();
        assert_eq!(held.len(), 2);
        assert!(!tree.is_fixed(stray).unwrap());
    }
}
