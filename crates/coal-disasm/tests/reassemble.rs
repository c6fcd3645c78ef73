use coal_asm::{assemble, AsmConfig};
use coal_disasm::listing::render_source;
use coal_disasm::{branch_targets, build_listing, parse_hex_line, Image};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
# count R1 up to R2
        ADDI R2, R0, 5
loop:   ADDI R1, R1, 1
        SLT  R3, R1, R2
        BLT  R1, R2, loop
        SW   R1, R0, 0
        HALT
";

#[test]
fn listing_reassembles_to_same_words() {
    let cfg = AsmConfig::default();
    let program = assemble(PROGRAM, &cfg).unwrap();
    let img = Image {
        words: parse_hex_line(&program.to_hex_line()).unwrap(),
    };
    assert_eq!(img.words, program.words);

    let lines = build_listing(&img, true);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1].label.as_deref(), Some("L1"));
    assert_eq!(lines[3].text, "BLT R1, R2, L1");

    let again = assemble(&render_source(&lines), &cfg).unwrap();
    assert_eq!(again.words, program.words);
}

#[test]
fn branch_targets_outside_image_are_not_labelled() {
    let program = assemble("BLT R0, R0, 9\nHALT", &AsmConfig::default()).unwrap();
    let img = Image {
        words: program.words,
    };
    assert!(branch_targets(&img).is_empty());
    assert_eq!(build_listing(&img, true)[0].text, "BLT R0, R0, 9");
}
