//! Writing rendered files to the output directory.
//!
//! Machine-owned files are replaced atomically: contents go to a temporary
//! file in the target directory which is then renamed over the target, so a
//! reader never observes a half-written file. Hand-editable files are only
//! created when absent.

use crate::error::{EmitError, EmitResult};
use napigen_core::{Diagnostic, DiagnosticCode, Diagnostics};
use serde::Serialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Who owns a generated file once it exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Regenerated on every run
    MachineOwned,
    /// Created once, then left to the user
    HandEditable,
}

/// A rendered file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
    pub ownership: Ownership,
}

impl GeneratedFile {
    pub fn machine_owned(name: impl Into<String>, contents: String) -> Self {
        Self {
            name: name.into(),
            contents,
            ownership: Ownership::MachineOwned,
        }
    }

    pub fn hand_editable(name: impl Into<String>, contents: String) -> Self {
        Self {
            name: name.into(),
            contents,
            ownership: Ownership::HandEditable,
        }
    }
}

/// Outcome of one write pass
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
}

pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_all(&self, files: &[GeneratedFile]) -> EmitResult<WriteReport> {
        std::fs::create_dir_all(&self.root).map_err(|e| EmitError::io(&self.root, e))?;

        let mut report = WriteReport::default();
        for file in files {
            let path = self.root.join(&file.name);
            if file.ownership == Ownership::HandEditable && path.exists() {
                tracing::debug!("keeping existing {}", path.display());
                report.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::EmissionConflict,
                    format!(
                        "{} already exists and was left untouched; update it to match the regenerated contracts",
                        path.display()
                    ),
                ));
                report.skipped.push(path);
                continue;
            }

            self.write_atomic(&path, &file.contents)?;
            tracing::debug!("wrote {}", path.display());
            report.written.push(path);
        }

        tracing::info!(
            "wrote {} file(s), kept {} existing",
            report.written.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> EmitResult<()> {
        let dir = path.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).map_err(|e| EmitError::io(dir, e))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| EmitError::io(dir, e))?;
        temp.write_all(contents.as_bytes())
            .map_err(|e| EmitError::io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| EmitError::io(temp.path(), e))?;
        temp.persist(path).map_err(|e| EmitError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }
}
