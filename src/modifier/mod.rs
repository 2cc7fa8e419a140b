//! Plan modifier protocol.
//!
//! A modifier is a provider-supplied function attached to one schema
//! attribute. During reconciliation the engine runs the attribute's chain
//! in declaration order; each modifier reads a request and mutates a
//! response that seeds the next modifier's request, so chains compose.

mod builtin;

pub use builtin::{RequiresReplace, RequiresReplaceIf, UseStateForUnknown};

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::path::{AttributePath, PathPattern};
use crate::private::PrivateState;
use crate::value::Value;

/// What a modifier may read.
///
/// The three per-node values are the slice of config, plan, and prior state
/// at this attribute; the root references allow cross-attribute inspection.
#[derive(Debug)]
pub struct ModifierRequest<'a> {
    /// Concrete path of the attribute being modified.
    pub path: AttributePath,
    /// Schema-level pattern the modifier was declared at.
    pub path_pattern: PathPattern,
    /// Config value at this attribute; never unknown.
    pub config_value: Value,
    /// Plan value at this attribute, as produced by the previous modifier
    /// in the chain (or the proposed plan for the first one).
    pub plan_value: Value,
    /// Prior-state value at this attribute; never unknown.
    pub state_value: Value,
    /// Root of the config tree.
    pub config: &'a Value,
    /// Root of the proposed plan tree.
    pub plan: &'a Value,
    /// Root of the prior-state tree.
    pub state: &'a Value,
    /// Snapshot of private state as of this modifier call.
    pub private: PrivateState,
}

/// What a modifier may set.
#[derive(Debug)]
pub struct ModifierResponse {
    /// The planned value; seeded with the incoming plan value.
    pub plan_value: Value,
    /// Whether this attribute forces full resource replacement.
    ///
    /// Shared across one attribute's chain: a later modifier that sets it
    /// back to `false` clears a mark set earlier in the same chain, and the
    /// chain's final value is merged into the global replacement set.
    pub requires_replace: bool,
    /// Diagnostics emitted by this chain; append-only.
    pub diagnostics: Diagnostics,
    /// Private state carried forward to the next modifier call.
    pub private: PrivateState,
}

impl ModifierResponse {
    /// Seeds a response at the start of a chain.
    pub(crate) const fn seed(plan_value: Value, private: PrivateState) -> Self {
        Self {
            plan_value,
            requires_replace: false,
            diagnostics: Diagnostics::new(),
            private,
        }
    }
}

/// A provider-supplied plan adjustment for one attribute.
///
/// Implementations must be pure, synchronous transformations; the engine
/// runs them on a single thread in strict declaration order.
pub trait PlanModifier: Send + Sync {
    /// Human-readable description of what the modifier does.
    fn description(&self) -> String;

    /// Adjusts the planned value for one attribute.
    fn modify(&self, request: &ModifierRequest<'_>, response: &mut ModifierResponse);
}

/// An attribute's ordered modifier chain.
pub type ModifierChain = Vec<Arc<dyn PlanModifier>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Uppercase;

    impl PlanModifier for Uppercase {
        fn description(&self) -> String {
            String::from("uppercases the planned string")
        }

        fn modify(&self, _request: &ModifierRequest<'_>, response: &mut ModifierResponse) {
            if let Value::String(s) = &response.plan_value {
                response.plan_value = Value::String(s.to_uppercase());
            }
        }
    }

    #[test]
    fn test_response_seed_defaults() {
        let response = ModifierResponse::seed(Value::from("v"), PrivateState::new());
        assert!(!response.requires_replace);
        assert!(response.diagnostics.is_empty());
        assert_eq!(response.plan_value, Value::from("v"));
    }

    #[test]
    fn test_modifier_mutates_response_in_place() {
        let root = Value::Null;
        let request = ModifierRequest {
            path: AttributePath::root().attribute("name"),
            path_pattern: PathPattern::root().attribute("name"),
            config_value: Value::from("v"),
            plan_value: Value::from("v"),
            state_value: Value::Null,
            config: &root,
            plan: &root,
            state: &root,
            private: PrivateState::new(),
        };
        let mut response = ModifierResponse::seed(Value::from("v"), PrivateState::new());
        Uppercase.modify(&request, &mut response);
        assert_eq!(response.plan_value, Value::from("V"));
    }
}
