//! Evaluation of postfix token sequences
//!
//! Operands are pushed onto a value stack; each operator pops its right and
//! then its left operand and pushes the result. Division follows IEEE 754,
//! so `1 / 0` is infinite and `0 / 0` is NaN rather than an error.

pub mod error;
pub mod evaluator;

pub use error::{EvalError, EvalResult};
pub use evaluator::{apply, Evaluator};
