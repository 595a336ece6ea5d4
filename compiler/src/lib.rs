//! baz-idl-compiler
//!
//! This crate implements:
//!  1) A tokenizer + recursive-descent parser for `.baz` RPC contract files,
//!  2) A semantic analyzer (procedure arguments must name declared messages),
//!  3) The artifact table used to emit server/client/proto/service stubs,
//!  4) Error types (`BazError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod analyzer;
pub mod compiler;
pub mod emitter;

pub use compiler::compile;
pub use compiler::program_to_json;
pub use emitter::emit;
pub use error::BazError;
