//! Nested-object reconciliation.
//!
//! An object runs its own modifier chain first, then recurses into every
//! declared child attribute by name. The chain's output is only a default
//! per field: whatever a child's own reconciliation produces overrides the
//! corresponding field, so children may resolve values the parent left
//! unknown, never the reverse.

use std::collections::BTreeMap;

use tracing::trace;

use crate::modifier::ModifierChain;
use crate::path::{AttributePath, PathPattern};
use crate::schema::{AttributeKind, AttributeNode};
use crate::value::Value;

use super::{Walk, reconcile_node, run_chain};

/// Reconciles an object attribute: own chain, then each declared child.
pub(crate) fn reconcile(
    walk: &mut Walk<'_>,
    modifiers: &ModifierChain,
    attributes: &BTreeMap<String, AttributeNode>,
    path: &AttributePath,
    pattern: &PathPattern,
    config: &Value,
    state: &Value,
    plan: Value,
) -> Value {
    let candidate = run_chain(
        walk,
        modifiers,
        AttributeKind::Object,
        path,
        pattern,
        config,
        state,
        plan,
    );

    let parent_known = matches!(candidate, Value::Object(_));
    let mut fields = if let Value::Object(existing) = &candidate {
        existing.clone()
    } else {
        BTreeMap::new()
    };

    let mut child_overrode = false;
    for (name, child) in attributes {
        let child_plan = candidate.field(name);
        let result = reconcile_node(
            walk,
            child,
            &path.attribute(name),
            &pattern.attribute(name),
            &config.field(name),
            &state.field(name),
            child_plan.clone(),
        );
        if result != child_plan {
            trace!(path = %path.attribute(name), "child reconciliation overrode the parent default");
            child_overrode = true;
        }
        fields.insert(name.clone(), result);
    }

    // A null or unknown object stays a marker unless some child resolved
    // a field beyond what the marker already implied.
    if parent_known || child_overrode {
        Value::Object(fields)
    } else {
        candidate
    }
}
