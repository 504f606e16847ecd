#![allow(non_snake_case)]

use super::*;
use std::fmt::Write;

#[test]
fn CodeWriter___indent___nests_and_restores() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 2);

    w.writeln("level 0").unwrap();
    {
        let _indent = w.indent();
        w.writeln("level 1").unwrap();
        {
            let _indent = w.indent();
            w.writeln("level 2").unwrap();
        }
        w.writeln("level 1 again").unwrap();
    }
    w.writeln("level 0 again").unwrap();

    assert_eq!(
        output,
        "level 0\n  level 1\n    level 2\n  level 1 again\nlevel 0 again\n"
    );
}

#[test]
fn CodeWriter___block___braces_body() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 4);

    w.block("if (ok)", |w| w.writeln("return;")).unwrap();

    assert_eq!(output, "if (ok) {\n    return;\n}\n");
}

#[test]
fn CodeWriter___class_block___ends_with_semicolon() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 4);

    w.class_block("struct A", |w| w.writeln("int x{};")).unwrap();

    assert_eq!(output, "struct A {\n    int x{};\n};\n");
}

#[test]
fn CodeWriter___writeln_macro___indents_every_line() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 2);

    let _indent = w.indent();
    writeln!(w, "a = {}", 1).unwrap();
    write!(w, "b\nc\n").unwrap();

    assert_eq!(output, "  a = 1\n  b\n  c\n");
}

#[test]
fn CodeWriter___blank_line___has_no_trailing_indent() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 4);

    let _indent = w.indent();
    w.writeln("x").unwrap();
    w.blank_line().unwrap();
    w.writeln("y").unwrap();

    assert_eq!(output, "    x\n\n    y\n");
}

#[test]
fn CodeWriter___doc_block___single_and_multi_line() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 4);

    w.doc_block(&["One".to_string()]).unwrap();
    w.doc_block(&["First".to_string(), "Second".to_string()]).unwrap();
    w.doc_block(&[]).unwrap();

    assert_eq!(output, "/** One */\n/**\n * First\n * Second\n */\n");
}

#[test]
fn CodeWriter___line_comments___prefix_each_line() {
    let mut output = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut output, 4);

    w.line_comments("//", &["a".to_string(), "b".to_string()]).unwrap();

    assert_eq!(output, "// a\n// b\n");
}
