//! Map and report commands.

use crate::config::OutputFormat;
use rwq_data::artifact::{Artifact, ArtifactKind};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ArtifactInfo<'a> {
    kind: ArtifactKind,
    path: &'a std::path::Path,
    exists: bool,
}

/// Print where an artifact lives or, with `show`, the document itself.
pub fn run_artifact<W: Write>(
    artifact: &Artifact,
    show: bool,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    if show {
        out.write_all(artifact.read()?.as_bytes())?;
        return Ok(());
    }

    let exists = artifact.exists();
    if !exists {
        log::warn!("{} artifact not found at {}", artifact.kind(), artifact.path().display());
    }
    match format {
        OutputFormat::Text => writeln!(out, "{}", artifact.path().display())?,
        OutputFormat::Json => {
            let info = ArtifactInfo {
                kind: artifact.kind(),
                path: artifact.path(),
                exists,
            };
            serde_json::to_writer_pretty(&mut *out, &info)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "kind,path,exists")?;
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut *out);
            wtr.write_record([
                artifact.kind().to_string(),
                artifact.path().display().to_string(),
                exists.to_string(),
            ])?;
            wtr.flush()?;
        }
    }
    Ok(())
}
