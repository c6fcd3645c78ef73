use serde::Serialize;
use tracing::{info, warn};

use crate::config::AsmConfig;
use crate::disasm::fmt_word;
use crate::encoder::{encode_program, Word};
use crate::error::AsmError;
use crate::labels::{resolve_labels, LabelTable};

pub const WORD_DELIMITER: &str = ",";

/// Result of a successful assembly: one word per instruction line, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub words: Vec<Word>,
    pub labels: LabelTable,
}

/// JSON shape emitted by `coal --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub words: Vec<String>,
    pub labels: &'a LabelTable,
    pub instruction_count: usize,
    pub over_capacity: bool,
}

impl Program {
    pub fn instruction_count(&self) -> usize {
        self.words.len()
    }

    pub fn hex_words(&self) -> Vec<String> {
        self.words.iter().map(|&w| fmt_word(w)).collect()
    }

    /// `0x....,0x....`; empty for an empty program.
    pub fn to_hex_line(&self) -> String {
        self.hex_words().join(WORD_DELIMITER)
    }

    /// Advisory only; an oversized program is still emitted.
    pub fn exceeds_capacity(&self, cfg: &AsmConfig) -> bool {
        self.instruction_count() > cfg.imem_words
    }

    pub fn report(&self, cfg: &AsmConfig) -> Report<'_> {
        Report {
            words: self.hex_words(),
            labels: &self.labels,
            instruction_count: self.instruction_count(),
            over_capacity: self.exceeds_capacity(cfg),
        }
    }
}

/// Run both passes over `source`.
pub fn assemble(source: &str, cfg: &AsmConfig) -> Result<Program, AsmError> {
    let labels = resolve_labels(source);
    info!(labels = labels.len(), "label pass complete");
    let words = encode_program(source, &labels, cfg)?;
    let program = Program { words, labels };
    if program.exceeds_capacity(cfg) {
        warn!(
            count = program.instruction_count(),
            capacity = cfg.imem_words,
            "program exceeds instruction memory"
        );
    }
    Ok(program)
}
