//! Stock plan modifiers.
//!
//! The two behaviors nearly every provider needs: carrying a prior value
//! forward into an unknown plan position, and marking a changed attribute
//! as replacement-forcing.

use super::{ModifierRequest, ModifierResponse, PlanModifier};

/// Carries the prior-state value forward when the plan is newly unknown.
///
/// Fires only when the plan value is unknown, the prior state holds a real
/// value, and the config is not itself unknown. Typical use is a computed
/// attribute whose value is stable across in-place updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        String::from("Use the prior state value when the planned value is unknown")
    }

    fn modify(&self, request: &ModifierRequest<'_>, response: &mut ModifierResponse) {
        if !response.plan_value.is_unknown() {
            return;
        }
        if request.state_value.is_null() || request.config_value.is_unknown() {
            return;
        }
        response.plan_value = request.state_value.clone();
    }
}

/// Marks the attribute as replacement-forcing when its planned value
/// differs from prior state.
///
/// Does nothing on create (null state) or destroy (null plan), where no
/// in-place update exists to upgrade.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiresReplace;

impl PlanModifier for RequiresReplace {
    fn description(&self) -> String {
        String::from("Require resource replacement when the value changes")
    }

    fn modify(&self, request: &ModifierRequest<'_>, response: &mut ModifierResponse) {
        if request.state_value.is_null() || response.plan_value.is_null() {
            return;
        }
        if !response.plan_value.equal(&request.state_value) {
            response.requires_replace = true;
        }
    }
}

/// Predicate type for [`RequiresReplaceIf`].
pub type ReplacePredicate = dyn Fn(&ModifierRequest<'_>) -> bool + Send + Sync;

/// Marks the attribute as replacement-forcing when a caller-supplied
/// predicate holds, under the same create/destroy gate as
/// [`RequiresReplace`].
pub struct RequiresReplaceIf {
    predicate: Box<ReplacePredicate>,
    description: String,
}

impl RequiresReplaceIf {
    /// Creates a conditional replacement modifier.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&ModifierRequest<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            description: description.into(),
        }
    }
}

impl std::fmt::Debug for RequiresReplaceIf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequiresReplaceIf")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl PlanModifier for RequiresReplaceIf {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn modify(&self, request: &ModifierRequest<'_>, response: &mut ModifierResponse) {
        if request.state_value.is_null() || response.plan_value.is_null() {
            return;
        }
        if (self.predicate)(request) {
            response.requires_replace = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{AttributePath, PathPattern};
    use crate::private::PrivateState;
    use crate::value::Value;

    fn request_for<'a>(
        root: &'a Value,
        config: Value,
        plan: Value,
        state: Value,
    ) -> ModifierRequest<'a> {
        ModifierRequest {
            path: AttributePath::root().attribute("attr"),
            path_pattern: PathPattern::root().attribute("attr"),
            config_value: config,
            plan_value: plan,
            state_value: state,
            config: root,
            plan: root,
            state: root,
            private: PrivateState::new(),
        }
    }

    #[test]
    fn test_use_state_for_unknown_carries_state() {
        let root = Value::Null;
        let request = request_for(&root, Value::Null, Value::Unknown, Value::from("v0"));
        let mut response = ModifierResponse::seed(Value::Unknown, PrivateState::new());
        UseStateForUnknown.modify(&request, &mut response);
        assert_eq!(response.plan_value, Value::from("v0"));
    }

    #[test]
    fn test_use_state_for_unknown_leaves_known_plan() {
        let root = Value::Null;
        let request = request_for(&root, Value::from("v1"), Value::from("v1"), Value::from("v0"));
        let mut response = ModifierResponse::seed(Value::from("v1"), PrivateState::new());
        UseStateForUnknown.modify(&request, &mut response);
        assert_eq!(response.plan_value, Value::from("v1"));
    }

    #[test]
    fn test_use_state_for_unknown_no_state() {
        let root = Value::Null;
        let request = request_for(&root, Value::Null, Value::Unknown, Value::Null);
        let mut response = ModifierResponse::seed(Value::Unknown, PrivateState::new());
        UseStateForUnknown.modify(&request, &mut response);
        assert_eq!(response.plan_value, Value::Unknown);
    }

    #[test]
    fn test_requires_replace_on_change() {
        let root = Value::Null;
        let request = request_for(&root, Value::from("v1"), Value::from("v1"), Value::from("v0"));
        let mut response = ModifierResponse::seed(Value::from("v1"), PrivateState::new());
        RequiresReplace.modify(&request, &mut response);
        assert!(response.requires_replace);
    }

    #[test]
    fn test_requires_replace_skips_create_and_destroy() {
        let root = Value::Null;

        let create = request_for(&root, Value::from("v1"), Value::from("v1"), Value::Null);
        let mut response = ModifierResponse::seed(Value::from("v1"), PrivateState::new());
        RequiresReplace.modify(&create, &mut response);
        assert!(!response.requires_replace);

        let destroy = request_for(&root, Value::Null, Value::Null, Value::from("v0"));
        let mut response = ModifierResponse::seed(Value::Null, PrivateState::new());
        RequiresReplace.modify(&destroy, &mut response);
        assert!(!response.requires_replace);
    }

    #[test]
    fn test_requires_replace_if_predicate() {
        let root = Value::Null;
        let modifier = RequiresReplaceIf::new("replace when shrinking", |request| {
            matches!(
                (&request.plan_value, &request.state_value),
                (Value::Int64(plan), Value::Int64(state)) if plan < state
            )
        });

        let shrink = request_for(&root, Value::from(1_i64), Value::from(1_i64), Value::from(4_i64));
        let mut response = ModifierResponse::seed(Value::from(1_i64), PrivateState::new());
        modifier.modify(&shrink, &mut response);
        assert!(response.requires_replace);

        let grow = request_for(&root, Value::from(8_i64), Value::from(8_i64), Value::from(4_i64));
        let mut response = ModifierResponse::seed(Value::from(8_i64), PrivateState::new());
        modifier.modify(&grow, &mut response);
        assert!(!response.requires_replace);
    }
}
