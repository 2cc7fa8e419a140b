//! Identity matching for unordered-collection elements.
//!
//! Set elements carry no positional or keyed identity, so before the
//! engine can carry prior-state values into a planned element it must
//! decide which prior element the planned one corresponds to. The
//! heuristic: two elements correspond when they are equal over the
//! non-computed attributes (the ones an operator could not change without
//! changing configuration), skipping attributes whose planned value is
//! still unknown. A unique hit between equally sized collections is
//! trusted; differing element counts, zero hits, and multiple hits all
//! fall back to positional pairing and are reported to the operator as a
//! warning, never a failure, because the true values are recomputed at
//! apply time and only the displayed preview can be imprecise.

use tracing::trace;

use crate::schema::{AttributeNode, AttributeType};
use crate::value::Value;

/// How one planned element paired against the counterpart collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementMatch {
    /// Exactly one counterpart element matched; its index.
    Unique(usize),
    /// Zero or several counterparts matched; positional pairing applies.
    Ambiguous,
}

/// Pairing of every planned element against a counterpart collection.
#[derive(Debug)]
pub(crate) struct Pairing {
    matches: Vec<ElementMatch>,
}

impl Pairing {
    /// Returns the counterpart value for the planned element at `index`,
    /// applying the positional fallback for ambiguous elements.
    ///
    /// Past-the-end positional fallback yields `Null`.
    pub(crate) fn counterpart(&self, index: usize, others: &[Value]) -> Value {
        let other_index = match self.matches.get(index) {
            Some(ElementMatch::Unique(j)) => Some(*j),
            Some(ElementMatch::Ambiguous) | None => Some(index),
        };
        other_index
            .and_then(|j| others.get(j))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Returns true if the planned element at `index` paired ambiguously.
    pub(crate) fn is_ambiguous(&self, index: usize) -> bool {
        matches!(self.matches.get(index), Some(ElementMatch::Ambiguous))
    }
}

/// Pairs each planned element against the counterpart elements.
pub(crate) fn pair_elements(
    plan_elements: &[Value],
    other_elements: &[Value],
    element_schema: &AttributeNode,
) -> Pairing {
    // With differing element counts the correspondence is unestablishable
    // as a whole: even a projection-unique hit may be an element that was
    // added, removed, or reshuffled. Every element pairs positionally.
    if plan_elements.len() != other_elements.len() {
        trace!(
            plan = plan_elements.len(),
            other = other_elements.len(),
            "element counts differ, pairing positionally"
        );
        return Pairing {
            matches: vec![ElementMatch::Ambiguous; plan_elements.len()],
        };
    }

    let matches = plan_elements
        .iter()
        .map(|planned| {
            let candidates: Vec<usize> = other_elements
                .iter()
                .enumerate()
                .filter(|(_, other)| corresponds(planned, other, element_schema))
                .map(|(j, _)| j)
                .collect();
            match candidates.as_slice() {
                [only] => ElementMatch::Unique(*only),
                _ => {
                    trace!(
                        candidates = candidates.len(),
                        "set element did not pair uniquely"
                    );
                    ElementMatch::Ambiguous
                }
            }
        })
        .collect();
    Pairing { matches }
}

/// Decides whether a planned element corresponds to a counterpart element.
///
/// For object elements, equality over the non-computed attributes, skipping
/// attributes whose planned value is unknown. For anything else the whole
/// value is the identity; a wholly unknown planned element corresponds to
/// nothing.
fn corresponds(planned: &Value, other: &Value, element_schema: &AttributeNode) -> bool {
    if planned.is_unknown() {
        return false;
    }
    let AttributeType::Object { attributes, .. } = &element_schema.attr_type else {
        return planned.equal(other);
    };
    attributes
        .iter()
        .filter(|(_, child)| !child.computed)
        .all(|(name, _)| {
            let planned_field = planned.field(name);
            planned_field.is_unknown() || planned_field.equal(&other.field(name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeNode;
    use crate::value::object;

    fn element_schema() -> AttributeNode {
        AttributeNode::optional(AttributeType::object([
            ("name", AttributeNode::required(AttributeType::string())),
            ("addr", AttributeNode::required(AttributeType::string())),
            ("id", AttributeNode::computed(AttributeType::string())),
        ]))
    }

    fn elem(name: &str, addr: &str, id: Value) -> Value {
        object([
            ("name", Value::from(name)),
            ("addr", Value::from(addr)),
            ("id", id),
        ])
    }

    #[test]
    fn test_unique_match_ignores_computed_fields() {
        let plan = vec![
            elem("a", "10.0.0.1", Value::Unknown),
            elem("b", "10.0.0.2", Value::Unknown),
        ];
        let state = vec![
            elem("b", "10.0.0.2", Value::from("id-b")),
            elem("a", "10.0.0.1", Value::from("id-a")),
        ];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(!pairing.is_ambiguous(0));
        assert!(!pairing.is_ambiguous(1));
        assert_eq!(pairing.counterpart(0, &state).field("id"), Value::from("id-a"));
        assert_eq!(pairing.counterpart(1, &state).field("id"), Value::from("id-b"));
    }

    #[test]
    fn test_swapped_fields_are_ambiguous() {
        let plan = vec![
            elem("a", "10.0.0.2", Value::Unknown),
            elem("b", "10.0.0.1", Value::Unknown),
        ];
        let state = vec![
            elem("a", "10.0.0.1", Value::from("id-a")),
            elem("b", "10.0.0.2", Value::from("id-b")),
        ];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(pairing.is_ambiguous(0));
        assert!(pairing.is_ambiguous(1));
    }

    #[test]
    fn test_duplicate_projections_are_ambiguous() {
        let plan = vec![elem("a", "10.0.0.1", Value::Unknown)];
        let state = vec![
            elem("a", "10.0.0.1", Value::from("id-1")),
            elem("a", "10.0.0.1", Value::from("id-2")),
        ];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(pairing.is_ambiguous(0));
    }

    #[test]
    fn test_positional_fallback_and_null_past_end() {
        let plan = vec![
            elem("a", "10.0.0.2", Value::Unknown),
            elem("b", "10.0.0.3", Value::Unknown),
        ];
        let state = vec![elem("x", "10.0.0.1", Value::from("id-x"))];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(pairing.is_ambiguous(0));
        assert!(pairing.is_ambiguous(1));
        assert_eq!(
            pairing.counterpart(0, &state).field("id"),
            Value::from("id-x")
        );
        assert_eq!(pairing.counterpart(1, &state), Value::Null);
    }

    #[test]
    fn test_count_mismatch_overrides_unique_match() {
        // Element 0 would pair uniquely by its non-computed fields, but
        // the collections differ in size, so correspondence cannot be
        // established and positional pairing applies throughout.
        let plan = vec![
            elem("a", "10.0.0.1", Value::Unknown),
            elem("b", "10.0.0.2", Value::Unknown),
        ];
        let state = vec![elem("a", "10.0.0.1", Value::from("id-a"))];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(pairing.is_ambiguous(0));
        assert!(pairing.is_ambiguous(1));
        assert_eq!(
            pairing.counterpart(0, &state).field("id"),
            Value::from("id-a")
        );
        assert_eq!(pairing.counterpart(1, &state), Value::Null);
    }

    #[test]
    fn test_unknown_non_computed_field_is_skipped() {
        let plan = vec![object([
            ("name", Value::from("a")),
            ("addr", Value::Unknown),
            ("id", Value::Unknown),
        ])];
        let state = vec![elem("a", "10.0.0.1", Value::from("id-a"))];
        let pairing = pair_elements(&plan, &state, &element_schema());
        assert!(!pairing.is_ambiguous(0));
    }

    #[test]
    fn test_scalar_elements_match_by_value() {
        let schema = AttributeNode::optional(AttributeType::string());
        let plan = vec![Value::from("b"), Value::from("a")];
        let state = vec![Value::from("a"), Value::from("b")];
        let pairing = pair_elements(&plan, &state, &schema);
        assert!(!pairing.is_ambiguous(0));
        assert_eq!(pairing.counterpart(0, &state), Value::from("b"));
        assert_eq!(pairing.counterpart(1, &state), Value::from("a"));
    }
}
