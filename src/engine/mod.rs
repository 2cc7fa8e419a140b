//! The plan-reconciliation engine.
//!
//! One invocation per planning cycle: the engine walks the schema
//! depth-first with the config, prior-state, and proposed-plan trees in
//! parallel, runs every attribute's modifier chain in declaration order,
//! and returns the adjusted plan together with the accumulated
//! diagnostics, replacement-forcing paths, and threaded private state.
//!
//! The walk is single-threaded and never aborts: diagnostics accumulate
//! and a best-effort plan is always returned so the caller can present
//! every problem from one cycle at once.

mod container;
mod matcher;
mod object;
mod scalar;

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::diagnostics::Diagnostics;
use crate::modifier::{ModifierChain, ModifierRequest, ModifierResponse};
use crate::path::{AttributePath, PathPattern};
use crate::private::PrivateState;
use crate::replace::ReplacePaths;
use crate::schema::{AttributeKind, AttributeNode, AttributeType, Schema};
use crate::value::Value;

/// Everything a reconciliation pass produces.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The authoritative plan after modification.
    pub plan: Value,
    /// All diagnostics accumulated across the pass, in emission order.
    pub diagnostics: Diagnostics,
    /// Attribute paths that force destroy-and-recreate.
    pub requires_replace: ReplacePaths,
    /// Private state after the last write of the pass.
    pub private: PrivateState,
}

/// The reconciliation engine.
#[derive(Debug, Default)]
pub struct PlanEngine;

impl PlanEngine {
    /// Creates a new engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reconciles one resource instance's plan.
    ///
    /// `config` and `prior_state` must never contain unknown values;
    /// `proposed_plan` may, at computed positions. All three trees conform
    /// to `schema`. A null `proposed_plan` is a destroy and is returned
    /// unchanged with no modifiers run.
    #[must_use]
    pub fn reconcile(
        &self,
        schema: &Schema,
        config: &Value,
        prior_state: &Value,
        proposed_plan: &Value,
        private: PrivateState,
    ) -> ReconcileOutcome {
        if proposed_plan.is_null() {
            debug!("proposed plan is null (destroy), skipping modifiers");
            return ReconcileOutcome {
                plan: Value::Null,
                diagnostics: Diagnostics::new(),
                requires_replace: ReplacePaths::new(),
                private,
            };
        }

        debug!(
            attributes = schema.attributes().len(),
            "starting plan reconciliation"
        );

        let mut diagnostics = Diagnostics::new();
        let mut requires_replace = ReplacePaths::new();
        let mut walk = Walk {
            config_root: config,
            plan_root: proposed_plan,
            state_root: prior_state,
            diagnostics: &mut diagnostics,
            replace: &mut requires_replace,
            private,
        };

        let mut plan_fields = BTreeMap::new();
        for (name, node) in schema.attributes() {
            let result = reconcile_node(
                &mut walk,
                node,
                &AttributePath::root().attribute(name),
                &PathPattern::root().attribute(name),
                &config.field(name),
                &prior_state.field(name),
                proposed_plan.field(name),
            );
            plan_fields.insert(name.clone(), result);
        }
        let private = walk.private;

        debug!(
            diagnostics = diagnostics.len(),
            replace_paths = requires_replace.len(),
            "plan reconciliation finished"
        );

        ReconcileOutcome {
            plan: Value::Object(plan_fields),
            diagnostics,
            requires_replace,
            private,
        }
    }
}

/// Shared walk state: the three root trees, the global accumulators by
/// mutable reference, and the linearly threaded private state.
pub(crate) struct Walk<'a> {
    pub(crate) config_root: &'a Value,
    pub(crate) plan_root: &'a Value,
    pub(crate) state_root: &'a Value,
    pub(crate) diagnostics: &'a mut Diagnostics,
    pub(crate) replace: &'a mut ReplacePaths,
    pub(crate) private: PrivateState,
}

/// Reconciles one schema node, dispatching on its kind.
pub(crate) fn reconcile_node(
    walk: &mut Walk<'_>,
    node: &AttributeNode,
    path: &AttributePath,
    pattern: &PathPattern,
    config: &Value,
    state: &Value,
    plan: Value,
) -> Value {
    trace!(%path, kind = %node.attr_type.kind(), "reconciling attribute");
    match &node.attr_type {
        AttributeType::Bool(modifiers)
        | AttributeType::String(modifiers)
        | AttributeType::Number(modifiers)
        | AttributeType::Int64(modifiers)
        | AttributeType::Float64(modifiers) => scalar::reconcile(
            walk,
            modifiers,
            node.attr_type.kind(),
            path,
            pattern,
            config,
            state,
            plan,
        ),
        AttributeType::List { modifiers, element }
        | AttributeType::Set { modifiers, element }
        | AttributeType::Map { modifiers, element } => container::reconcile(
            walk,
            modifiers,
            element,
            node.attr_type.kind(),
            path,
            pattern,
            config,
            state,
            plan,
        ),
        AttributeType::Object {
            modifiers,
            attributes,
        } => object::reconcile(
            walk, modifiers, attributes, path, pattern, config, state, plan,
        ),
    }
}

/// Runs one attribute's modifier chain in declaration order.
///
/// Each modifier's request carries the previous modifier's plan value, so
/// chains compose. The chain-shared `requires_replace` flag is merged into
/// the global set once, after the last modifier, which is what scopes a
/// later modifier's explicit clear to marks set in the same chain. Private
/// state is threaded through and back into the walk, last writer wins.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_chain(
    walk: &mut Walk<'_>,
    modifiers: &ModifierChain,
    kind: AttributeKind,
    path: &AttributePath,
    pattern: &PathPattern,
    config_value: &Value,
    state_value: &Value,
    plan_value: Value,
) -> Value {
    if modifiers.is_empty() {
        return plan_value;
    }

    let mut response = ModifierResponse::seed(plan_value, walk.private.clone());
    for modifier in modifiers {
        let request = ModifierRequest {
            path: path.clone(),
            path_pattern: pattern.clone(),
            config_value: config_value.clone(),
            plan_value: response.plan_value.clone(),
            state_value: state_value.clone(),
            config: walk.config_root,
            plan: walk.plan_root,
            state: walk.state_root,
            private: response.private.clone(),
        };
        let before = response.plan_value.clone();

        modifier.modify(&request, &mut response);
        trace!(%path, modifier = %modifier.description(), "ran plan modifier");

        // Once known, a value must stay known for the rest of the pass.
        if before.is_known() && response.plan_value.is_unknown() {
            warn!(
                %path,
                modifier = %modifier.description(),
                "modifier reverted a known value to unknown, keeping the known value"
            );
            response.plan_value = before;
        }
        if !response.plan_value.matches_kind(kind) {
            warn!(
                %path,
                expected = %kind,
                "modifier returned a value of a different kind"
            );
        }
    }

    walk.diagnostics.extend(response.diagnostics);
    if response.requires_replace {
        walk.replace.add(path.clone());
    }
    walk.private = response.private;
    response.plan_value
}
