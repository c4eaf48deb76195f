use super::*;
use pretty_assertions::assert_eq;

fn output(writer: TextTrapWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

#[test]
fn test_quote_trap_string() {
    assert_eq!(quote_trap_string("plain"), "\"plain\"");
    assert_eq!(quote_trap_string("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(quote_trap_string(""), "\"\"");
}

#[test]
fn test_diagnostic_tuple() {
    let mut trap = TextTrapWriter::new(Vec::new());
    let location = trap.unknown_location().unwrap();
    let id = trap.fresh_id();
    trap.write_diagnostic(&DiagnosticRecord {
        id,
        origin: "Extractor",
        severity: 5,
        category: "",
        message: "bad \"thing\"",
        full_message: "2024-01-01 00:00:00 bad \"thing\"",
        location,
    })
    .unwrap();
    trap.write_diagnostic_for(id, "compilation", 4, 0).unwrap();

    assert_eq!(
        output(trap),
        "#1=@\"loc,{unknown}\"\n\
         #2=*\n\
         diagnostics(#2,\"Extractor\",5,\"\",\"bad \"\"thing\"\"\",\
         \"2024-01-01 00:00:00 bad \"\"thing\"\"\",#1)\n\
         diagnostic_for(#2,@\"compilation\",4,0)\n"
    );
}

#[test]
fn test_unknown_location_defined_once() {
    let mut trap = TextTrapWriter::new(Vec::new());
    let first = trap.unknown_location().unwrap();
    let second = trap.unknown_location().unwrap();
    assert_eq!(first, second);
    assert_eq!(output(trap).lines().count(), 1);
}

#[test]
fn test_comment_is_single_line() {
    let mut trap = TextTrapWriter::new(Vec::new());
    trap.write_comment("[t K] [INFO] two\nlines\r\n").unwrap();
    assert_eq!(output(trap), "// [t K] [INFO] two lines  \n");
}

#[test]
fn test_keyed_labels_are_distinct() {
    let mut trap = TextTrapWriter::new(Vec::new());
    let a = trap.keyed_label("file;A.kt").unwrap();
    let b = trap.fresh_id();
    assert_ne!(a, b);
    assert_eq!(output(trap), "#1=@\"file;A.kt\"\n");
}
