use std::collections::HashSet;
use crate::{
    error::BazError,
    types::{Program, Service},
};

/// Checks that every procedure argument names a declared message.
///
/// Return types are deliberately left unchecked: `proc p(M) -> Anything;` is
/// accepted as long as `M` is a message.
pub fn analyze<'a>(
    services: impl IntoIterator<Item = &'a Service>,
    message_names: &HashSet<&str>,
) -> Result<(), BazError> {
    for srv in services {
        for procedure in &srv.procedures {
            if let Some(arg) = procedure
                .args
                .iter()
                .find(|arg| !message_names.contains(arg.as_str()))
            {
                return Err(BazError::UndeclaredMessage {
                    name:      arg.clone(),
                    procedure: procedure.name.clone(),
                    service:   srv.name.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn analyze_program(program: &Program) -> Result<(), BazError> {
    analyze(program.services(), &program.message_names())
}
