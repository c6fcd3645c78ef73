//! Line scanner shared by both assembler passes.
//!
//! Each physical line has its `#` comment removed, is split on runs of
//! whitespace and commas, and is upper-cased. A leading `name:` token is
//! split off as the line's label.

pub const COMMENT: char = '#';
pub const LABEL_TERMINATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based physical line number.
    pub number: usize,
    pub label: Option<String>,
    /// Mnemonic followed by operands; empty for a label-only line.
    pub tokens: Vec<String>,
}

impl SourceLine {
    pub fn is_instruction(&self) -> bool {
        !self.tokens.is_empty()
    }
}

pub fn strip_comment(line: &str) -> &str {
    let code = match line.find(COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    };
    code.trim()
}

pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Parse one physical line. Blank and comment-only lines yield `None`.
pub fn parse_line(number: usize, raw: &str) -> Option<SourceLine> {
    let mut tokens = tokenize(strip_comment(raw));
    if tokens.is_empty() {
        return None;
    }
    let label = match tokens[0].strip_suffix(LABEL_TERMINATOR) {
        Some(name) => {
            let name = name.to_string();
            tokens.remove(0);
            Some(name)
        }
        None => None,
    };
    Some(SourceLine {
        number,
        label,
        tokens,
    })
}

/// Iterate the meaningful lines of `source` in order.
pub fn scan(source: &str) -> impl Iterator<Item = SourceLine> + '_ {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| parse_line(i + 1, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comments_and_delimiters() {
        assert_eq!(strip_comment("  add r1, r2 ,r3 # sum"), "add r1, r2 ,r3");
        assert_eq!(strip_comment("# only a comment"), "");
        assert_eq!(tokenize("add r1, r2 ,r3"), vec!["ADD", "R1", "R2", "R3"]);
        assert_eq!(tokenize("blt\tr0,,r1 ,  loop"), vec!["BLT", "R0", "R1", "LOOP"]);
    }

    #[test]
    fn label_split() {
        let l = parse_line(3, "loop: add r2, r0, r1").unwrap();
        assert_eq!(l.number, 3);
        assert_eq!(l.label.as_deref(), Some("LOOP"));
        assert_eq!(l.tokens, vec!["ADD", "R2", "R0", "R1"]);

        let only = parse_line(1, "End:   # trailing").unwrap();
        assert_eq!(only.label.as_deref(), Some("END"));
        assert!(!only.is_instruction());

        assert!(parse_line(1, "   ").is_none());
        assert!(parse_line(1, " # x").is_none());
    }

    #[test]
    fn scan_numbers_physical_lines() {
        let lines: Vec<_> = scan("\n# c\nhalt\n\nx: halt\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[1].number, 5);
    }
}
