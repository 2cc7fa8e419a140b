//! Leaf reconciliation.
//!
//! A scalar attribute has nothing below it: its reconciliation is exactly
//! one run of its modifier chain.

use crate::modifier::ModifierChain;
use crate::path::{AttributePath, PathPattern};
use crate::schema::AttributeKind;
use crate::value::Value;

use super::{Walk, run_chain};

/// Reconciles a scalar attribute by running its modifier chain.
pub(crate) fn reconcile(
    walk: &mut Walk<'_>,
    modifiers: &ModifierChain,
    kind: AttributeKind,
    path: &AttributePath,
    pattern: &PathPattern,
    config: &Value,
    state: &Value,
    plan: Value,
) -> Value {
    run_chain(walk, modifiers, kind, path, pattern, config, state, plan)
}
