//! Arithmetic support shared by the engine.
//!
//! The [`CheckedArithmetic`] trait lifts the domain newtypes' checked
//! operations into `Result`-returning methods so engine code can chain
//! them with `?`.

mod checked;

pub use checked::CheckedArithmetic;
