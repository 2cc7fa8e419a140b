//! Collection reconciliation for lists, sets, and maps.
//!
//! A collection runs its whole-collection modifier chain first, then
//! recurses into each element of the resulting candidate. Lists pair
//! elements with config and prior state by index and maps by key; sets
//! have no element identity and go through the matcher. Element results
//! override the candidate's slots under the same precedence as objects:
//! the chain's output is only a default.

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::modifier::ModifierChain;
use crate::path::{AttributePath, PathPattern};
use crate::schema::{AttributeKind, AttributeNode, AttributeType};
use crate::value::Value;

use super::matcher;
use super::{Walk, reconcile_node, run_chain};

/// Reconciles a list, set, or map attribute.
#[allow(clippy::too_many_arguments)]
pub(crate) fn reconcile(
    walk: &mut Walk<'_>,
    modifiers: &ModifierChain,
    element: &AttributeNode,
    kind: AttributeKind,
    path: &AttributePath,
    pattern: &PathPattern,
    config: &Value,
    state: &Value,
    plan: Value,
) -> Value {
    let candidate = run_chain(walk, modifiers, kind, path, pattern, config, state, plan);

    if !element_recurses(element) {
        return candidate;
    }

    // Null or unknown collections have no elements to recurse into.
    match candidate {
        Value::List(items) => {
            let reconciled = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    reconcile_node(
                        walk,
                        element,
                        &path.index(i),
                        &pattern.any_index(),
                        &config.element(i),
                        &state.element(i),
                        item,
                    )
                })
                .collect();
            Value::List(reconciled)
        }
        Value::Map(entries) => {
            let reconciled = entries
                .into_iter()
                .map(|(key, item)| {
                    let result = reconcile_node(
                        walk,
                        element,
                        &path.key(&key),
                        &pattern.any_key(),
                        &config.field(&key),
                        &state.field(&key),
                        item,
                    );
                    (key, result)
                })
                .collect();
            Value::Map(reconciled)
        }
        Value::Set(items) => reconcile_set(
            walk, element, path, pattern, config, state, items,
        ),
        other => other,
    }
}

/// Recurses into set elements, pairing them with config and prior state
/// through the unordered-collection matcher.
fn reconcile_set(
    walk: &mut Walk<'_>,
    element: &AttributeNode,
    path: &AttributePath,
    pattern: &PathPattern,
    config: &Value,
    state: &Value,
    items: Vec<Value>,
) -> Value {
    let state_elements = known_elements(state);
    let config_elements = known_elements(config);

    let state_pairing =
        state_elements.map(|elements| matcher::pair_elements(&items, elements, element));
    let config_pairing =
        config_elements.map(|elements| matcher::pair_elements(&items, elements, element));

    let mut reconciled = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let element_path = path.index(i);

        let state_element = match (&state_pairing, state_elements) {
            (Some(pairing), Some(elements)) => {
                if pairing.is_ambiguous(i) && !item.is_fully_known() {
                    debug!(path = %element_path, "ambiguous set element match, using positional pairing");
                    walk.diagnostics.push(ambiguity_warning(element_path.clone()));
                }
                pairing.counterpart(i, elements)
            }
            _ => Value::Null,
        };
        let config_element = match (&config_pairing, config_elements) {
            (Some(pairing), Some(elements)) => pairing.counterpart(i, elements),
            _ => Value::Null,
        };

        reconciled.push(reconcile_node(
            walk,
            element,
            &element_path,
            &pattern.any_index(),
            &config_element,
            &state_element,
            item,
        ));
    }
    Value::Set(reconciled)
}

/// Elements of a known collection value, if there are any to pair with.
fn known_elements(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Set(items) | Value::List(items) => Some(items),
        _ => None,
    }
}

/// Recursion is needed when elements have structure of their own, or a
/// modifier chain of their own to run.
fn element_recurses(element: &AttributeNode) -> bool {
    match &element.attr_type {
        AttributeType::List { .. }
        | AttributeType::Set { .. }
        | AttributeType::Map { .. }
        | AttributeType::Object { .. } => true,
        scalar => !scalar.modifiers().is_empty(),
    }
}

fn ambiguity_warning(path: AttributePath) -> Diagnostic {
    Diagnostic::warning_at(
        path,
        "Ambiguous set element match",
        "This element could not be uniquely matched to an element of the \
         prior state, so positional matching was used. Values shown as \
         known after apply may not reflect the value the apply produces.",
    )
}
