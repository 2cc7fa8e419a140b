// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Planweave
//!
//! A plan-reconciliation engine for declarative resource attribute trees.
//!
//! ## Overview
//!
//! Given a resource's desired configuration, its last-applied prior state,
//! and a provisionally computed proposed plan, planweave walks the
//! resource's typed schema and lets per-attribute, provider-supplied
//! *modifiers* adjust the plan before it is shown to an operator or
//! executed:
//!
//! - Modifier chains run in strict declaration order and compose
//! - Attributes can be marked as forcing destroy-and-recreate
//! - Diagnostics accumulate across the whole pass without aborting it
//! - An opaque private-state blob is threaded through every call and
//!   across planning cycles
//!
//! ## Modules
//!
//! - [`schema`]: immutable attribute trees registered per resource type
//! - [`value`]: config/state/plan values with null and unknown markers
//! - [`path`]: concrete attribute paths and schema-level path patterns
//! - [`modifier`]: the modifier protocol and stock modifiers
//! - [`diagnostics`]: deduplicating warning/error accumulation
//! - [`replace`]: replacement-forcing path set
//! - [`private`]: namespaced private state
//! - [`engine`]: the depth-first reconciliation pass
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use planweave::{
//!     AttributeNode, AttributeType, PlanEngine, PrivateState, Schema,
//!     UseStateForUnknown, Value, object,
//! };
//!
//! let schema = Schema::new([
//!     ("name", AttributeNode::required(AttributeType::string())),
//!     (
//!         "id",
//!         AttributeNode::computed(
//!             AttributeType::string().with_modifier(Arc::new(UseStateForUnknown)),
//!         ),
//!     ),
//! ]);
//! schema.validate().unwrap();
//!
//! let config = object([("name", Value::from("db")), ("id", Value::Null)]);
//! let state = object([("name", Value::from("db")), ("id", Value::from("i-123"))]);
//! let plan = object([("name", Value::from("db")), ("id", Value::Unknown)]);
//!
//! let outcome = PlanEngine::new().reconcile(
//!     &schema, &config, &state, &plan, PrivateState::new(),
//! );
//! assert_eq!(outcome.plan.field("id"), Value::from("i-123"));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod modifier;
pub mod path;
pub mod private;
pub mod replace;
pub mod schema;
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use engine::{PlanEngine, ReconcileOutcome};
pub use error::{PlanweaveError, PrivateStateError, Result, SchemaError};
pub use modifier::{
    ModifierChain, ModifierRequest, ModifierResponse, PlanModifier, RequiresReplace,
    RequiresReplaceIf, UseStateForUnknown,
};
pub use path::{AttributePath, PathPattern, PathStep, PatternStep};
pub use private::PrivateState;
pub use replace::ReplacePaths;
pub use schema::{AttributeKind, AttributeNode, AttributeType, Schema};
pub use value::{Value, object};
