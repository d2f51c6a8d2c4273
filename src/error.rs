use thiserror::Error;

/// Errors raised by the environment layer.
///
/// All of these were process-terminating in earlier designs. They are plain
/// values here so the evaluator can decide whether to abort or recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// No frame in the chain binds the name.
    #[error("Unbound variable: {0}")]
    Unbound(String),

    /// Parameter and argument lists differ in length.
    #[error(
        "Arity mismatch{}: expected {} argument(s), got {}",
        procedure_label(.procedure),
        .parameters,
        .arguments
    )]
    ArityMismatch {
        procedure: Option<String>,
        parameters: usize,
        arguments: usize,
    },

    /// An environment, frame, or list did not have the expected shape.
    #[error("Malformed environment: {0}")]
    Malformed(String),

    /// Cell heap capacity exceeded.
    #[error("Heap capacity exceeded ({0} cells)")]
    HeapOverflow(usize),

    /// Symbol table ran out of ids.
    #[error("Symbol table full ({0} symbols)")]
    SymbolOverflow(usize),

    /// `setup_environment` was called a second time on the same runtime.
    #[error("Global environment already set up")]
    AlreadyInitialized,
}

fn procedure_label(procedure: &Option<String>) -> String {
    match procedure {
        Some(name) => format!(" in call to {}", name),
        None => String::new(),
    }
}

impl EnvError {
    /// Process exit status for hosts that treat the error as fatal.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvError::Unbound(_) => 3,
            EnvError::ArityMismatch { .. } => 4,
            EnvError::Malformed(_) => 5,
            EnvError::HeapOverflow(_) => 6,
            EnvError::AlreadyInitialized => 7,
            EnvError::SymbolOverflow(_) => 8,
        }
    }
}

pub type EnvResult<T> = Result<T, EnvError>;
