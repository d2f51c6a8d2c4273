//! Lexical environments for a small Lisp: frames of name/value entries
//! chained innermost first, built from cells in an append-only heap.

pub mod config;
pub mod environment;
pub mod error;
pub mod frame;
pub mod heap;
pub mod printer;
pub mod symbol;
pub mod value;

pub use config::Config;
pub use environment::{
    enclosing_environment, environment_depth, extend_environment, find_value, first_frame,
    is_empty_environment, Runtime, EMPTY_ENVIRONMENT,
};
pub use error::{EnvError, EnvResult};
pub use frame::{build_frame, frame_bindings, make_frame, make_frame_for, Binding};
pub use heap::Heap;
pub use symbol::SymbolTable;
pub use value::{PairId, SymbolId, Value};
