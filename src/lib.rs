pub mod config;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod program;
pub mod source;

pub mod isa {
    pub mod coal16; // 4 registers, 16-bit words
}

pub use config::AsmConfig;
pub use error::AsmError;
pub use labels::{resolve_labels, LabelTable};
pub use program::{assemble, Program};
