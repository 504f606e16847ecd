//! Indentation-tracking writer for C++ and TypeScript output.
//!
//! Indentation is applied at the start of every non-empty line, including
//! lines produced through `write!`/`writeln!`, so renderers can mix literal
//! text and formatted output freely.
//!
//! ```
//! use napigen_emit::CodeWriter;
//! use std::fmt::Write;
//!
//! let mut out = String::new();
//! let mut w = CodeWriter::with_indent_spaces(&mut out, 4);
//! w.class_block("struct Point", |w| {
//!     writeln!(w, "double x{{}};")?;
//!     writeln!(w, "double y{{}};")
//! })
//! .unwrap();
//!
//! assert_eq!(out, "struct Point {\n    double x{};\n    double y{};\n};\n");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W, indent_string: impl Into<String>) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string: indent_string.into(),
            at_line_start: true,
        }
    }

    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    /// Write text, indenting each line that starts with content
    pub fn write(&mut self, text: &str) -> fmt::Result {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.writer.write_char('\n')?;
                self.at_line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent_level.get() {
                    self.writer.write_str(&self.indent_string)?;
                }
                self.at_line_start = false;
            }
            self.writer.write_str(line)?;
        }
        Ok(())
    }

    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.write("\n")
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.write("\n")
    }

    /// Indentation increases while the guard is alive
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// `header {` body `}`
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with_closer(header, "}", body)
    }

    /// `header {` body `};`
    pub fn class_block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with_closer(header, "};", body)
    }

    fn block_with_closer<F>(&mut self, header: &str, closer: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(&format!("{header} {{"))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln(closer)
    }

    /// One `prefix line` per doc line
    pub fn line_comments(&mut self, prefix: &str, lines: &[String]) -> fmt::Result {
        for line in lines {
            self.writeln(&format!("{prefix} {line}"))?;
        }
        Ok(())
    }

    /// A `/** ... */` block; nothing for empty docs
    pub fn doc_block(&mut self, lines: &[String]) -> fmt::Result {
        match lines {
            [] => Ok(()),
            [single] => self.writeln(&format!("/** {single} */")),
            _ => {
                self.writeln("/**")?;
                self.line_comments(" *", lines)?;
                self.writeln(" */")
            }
        }
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level.get()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: fmt::Write> fmt::Write for CodeWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s)
    }
}

/// Restores the previous indentation level on drop
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "code_writer/code_writer_tests.rs"]
mod code_writer_tests;
