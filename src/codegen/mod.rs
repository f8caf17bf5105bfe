//! Expression building and source emission for fitted models

pub mod builder;
pub mod emitter;
pub mod expr;
pub mod identifiers;
pub mod language;

pub use builder::{ExpressionBuilder, Local};
pub use emitter::{CodeEmitter, EmitOptions, Hardware};
pub use expr::{Expr, Predicate};
pub use identifiers::{safe_identifier, safe_identifiers};
pub use language::Language;
