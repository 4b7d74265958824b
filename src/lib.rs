//! Constant-time byte-offset discrimination of message types.
//!
//! A constraint set is a table of J rows. Each row names one buffer offset
//! and, for each of N candidates (N ≤ 16), the byte that candidate expects
//! there or a flag saying it does not care. Evaluating a buffer reads exactly
//! one byte per row and returns the bitmask of candidates consistent with all
//! of them, doing the same work whatever the bytes are.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐     ┌───────────────┐     ┌───────────────┐
//! │   types.rs    │────▶│  builder.rs   │────▶│   engine.rs   │
//! │  (Row, Spec,  │     │  (validate,   │     │  (evaluate,   │
//! │ ConstraintSet)│     │ derive masks) │     │ evaluate_len) │
//! └───────────────┘     └───────────────┘     └───────────────┘
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  util/simd.rs (Lanes)     gate.rs (branchless bounds)     │
//! │  verify/ (ConstraintError, debug contracts)               │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! `schema` maps JSON spec files onto the run-time shaped `DynConstraintSet`.
//!
//! # Usage
//!
//! ```
//! use lanegate::{make_constraint, make_constraint_with_care, ConstraintSet};
//!
//! static MESSAGES: ConstraintSet<4, 4> = ConstraintSet::validated([
//!     make_constraint(2, *b"aaaq"),
//!     make_constraint_with_care(8, *b"@@==", [true, true, true, false]),
//!     make_constraint(17, *b"=@=@"),
//!     make_constraint(19, *b":c#c"),
//! ]);
//!
//! let message = b"@=a:afce@=b:text2@=c:12";
//! assert_eq!(MESSAGES.evaluate(message), 0b0010);
//! assert_eq!(MESSAGES.evaluate_len(message, 10), 0);
//! ```

#![cfg_attr(feature = "portable-simd", feature(portable_simd))]

mod builder;
mod engine;
pub mod gate;
pub mod schema;
pub mod testing;
mod types;
pub mod util;
pub mod verify;

// Re-exports for public API
pub use builder::{make_constraint, make_constraint_with_care};
pub use engine::{candidates, evaluate, evaluate_len, single_candidate};
pub use schema::{SpecFile, SpecFileError};
pub use types::{
    lane_mask, CandidateMask, ConstraintSet, ConstraintSpec, ConstraintTable, DynConstraintSet,
    Row, RowSpec,
};
pub use util::simd::{Lanes, LANES};
pub use verify::ConstraintError;
