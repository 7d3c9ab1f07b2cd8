//! Core types and algorithms for typed contract binding generation
//!
//! This crate turns a parsed contract ABI document into the data a template
//! layer needs to emit statically-typed TypeScript bindings:
//!
//! - **Type translation**: recursive mapping from ABI type descriptors
//!   (scalars, fixed/dynamic arrays, tuples) to host type expressions,
//!   with backend-sensitive integer width rules
//! - **Normalization**: constructor defaulting, synthetic parameter names,
//!   overload renaming, canonical signatures
//! - **Rendering context**: one immutable value per contract, consumed
//!   once by the template layer
//!
//! All model data is immutable once constructed; each document is processed
//! independently with no cross-document state.

// Module declarations
pub mod abi;
pub mod contract;
pub mod error;
pub mod overloads;
pub mod translate;

// Re-export all public types for convenience
pub use abi::{
    Backend, Constructor, EnrichedMethod, Event, Method, Param, ParamKind, RenderingContext,
};
pub use contract::Contract;
pub use error::Error;
pub use translate::translate;
