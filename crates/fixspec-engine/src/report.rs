//! Human-readable summary of the specification of a subtree.

use std::fmt;

use fixspec_core::ScopeId;
use fixspec_tree::{ModelTree, TreeError};

use crate::listing::{list_fixed_state_vars, list_replacements};
use crate::registry::Registry;

/// Replacements and still-fixed state variables of a subtree, resolved to
/// dotted names.
///
/// ```text
/// Replacements in scope fs:
///   fs.h1.outlet_enth_mol -> fs.h1.heat_duty
///
/// Unreplaced state variables in scope fs:
///   fs.h1.inlet_flow_mol
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementReport {
    scope: String,
    replacements: Vec<(String, String)>,
    unreplaced: Vec<String>,
}

impl ReplacementReport {
    /// Dotted path of the reported scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// `(substitute, original)` pairs, in log order.
    pub fn replacements(&self) -> &[(String, String)] {
        &self.replacements
    }

    /// State variables that are still fixed.
    pub fn unreplaced(&self) -> &[String] {
        &self.unreplaced
    }
}

/// Build the report for `scope`.
pub fn report(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<ReplacementReport, TreeError> {
    let replacements = list_replacements(tree, registry, scope)?
        .into_iter()
        .map(|r| Ok((tree.var_path(r.substitute)?, tree.var_path(r.original)?)))
        .collect::<Result<_, TreeError>>()?;
    let unreplaced = list_fixed_state_vars(tree, registry, scope)?
        .into_iter()
        .map(|v| tree.var_path(v))
        .collect::<Result<_, _>>()?;
    Ok(ReplacementReport {
        scope: tree.scope_path(scope)?,
        replacements,
        unreplaced,
    })
}

impl fmt::Display for ReplacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.replacements.is_empty() {
            writeln!(f, "No replacements in scope {}", self.scope)?;
        } else {
            writeln!(f, "Replacements in scope {}:", self.scope)?;
            for (substitute, original) in &self.replacements {
                writeln!(f, "  {substitute} -> {original}")?;
            }
        }
        writeln!(f)?;
        if self.unreplaced.is_empty() {
            writeln!(f, "No other state variables in scope {}", self.scope)
        } else {
            writeln!(f, "Unreplaced state variables in scope {}:", self.scope)?;
            for var in &self.unreplaced {
                writeln!(f, "  {var}")?;
            }
            Ok(())
        }
    }
}
