use crate::{
    analyzer::analyze_program,
    error::BazError,
    parser::parse_program,
    tokenizer::tokenize,
    types::Program,
};

/// Compile IDL source into a validated `Program`.
/// Returns `Err(BazError)` if tokenization/parsing/analysis fails.
pub fn compile(text: &str) -> Result<Program, BazError> {
    let tokens  = tokenize(text)?;
    let program = parse_program(&tokens)?;
    analyze_program(&program)?;
    Ok(program)
}

/// Pretty-printed JSON rendering of a program.
pub fn program_to_json(program: &Program) -> Result<String, BazError> {
    Ok(serde_json::to_string_pretty(program)?)
}
