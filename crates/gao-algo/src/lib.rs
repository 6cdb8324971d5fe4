//! # gao-algo: GPU allocation MILP
//!
//! The optimization core: encodes a validated [`gao_core::OptimizationInput`]
//! as a mixed-integer linear program, solves it, and assembles the result.
//!
//! ```
//! use gao_algo::optimize;
//! use gao_core::OptimizationInput;
//!
//! let result = optimize(&OptimizationInput::default()).unwrap();
//! assert!(result.is_empty());
//! ```

pub mod assemble;
pub mod driver;
pub mod encoder;
pub mod modeling;
pub mod optimize;

pub use optimize::optimize;
