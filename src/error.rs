/// Fatal assembly errors. Any of these aborts the whole program; no words are emitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unknown instruction '{mnemonic}'")]
    UnknownInstruction { line: usize, mnemonic: String },
    #[error("line {line}: unknown register '{name}'")]
    UnknownRegister { line: usize, name: String },
    #[error("line {line}: unknown label '{label}'")]
    UnknownLabel { line: usize, label: String },
    #[error("unknown instruction format '{format}'")]
    UnknownFormat { format: char },
    #[error("line {line}: {mnemonic} expects {expected} operands, found {found}")]
    MissingOperand {
        line: usize,
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid immediate '{text}'")]
    InvalidImmediate { line: usize, text: String },
    #[error("line {line}: value {text} does not fit in 4 bits")]
    ValueOutOfRange { line: usize, text: String },
}

impl AsmError {
    /// 1-based source line, when the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UnknownInstruction { line, .. }
            | AsmError::UnknownRegister { line, .. }
            | AsmError::UnknownLabel { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::InvalidImmediate { line, .. }
            | AsmError::ValueOutOfRange { line, .. } => Some(*line),
            AsmError::UnknownFormat { .. } => None,
        }
    }
}
