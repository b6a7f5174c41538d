//! Declarative conditions and their evaluation.

pub mod eval;
pub mod params;
pub mod spec;

pub use eval::{ConditionEvaluator, EvalContext, EvalResult, Progress};
pub use params::{ParamValue, Params};
pub use spec::{Condition, ConditionKind};
