//! Pre-built documents shown alongside the projections.
//!
//! The clustered station map and the written report are produced outside
//! this workspace. They are never derived from a filtered view; the
//! dashboard only needs a stable reference to each and, on demand, their
//! verbatim contents.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading an artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {kind} artifact {}: {source}", path.display())]
    Unreadable {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum ArtifactKind {
    Map,
    Report,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Map => write!(f, "map"),
            ArtifactKind::Report => write!(f, "report"),
        }
    }
}

/// A reference to one pre-built document.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Artifact {
    kind: ArtifactKind,
    path: PathBuf,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Artifact {
        Artifact {
            kind,
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the document verbatim.
    pub fn read(&self) -> Result<String, ArtifactError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| ArtifactError::Unreadable {
                kind: self.kind,
                path: self.path.clone(),
                source,
            })?;
        log::info!(
            "artifact: read {} bytes of {} from {}",
            contents.len(),
            self.kind,
            self.path.display()
        );
        Ok(contents)
    }
}

/// The fixed pair of documents for the whole dataset.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Artifacts {
    map: Artifact,
    report: Artifact,
}

impl Artifacts {
    pub fn new(map: impl Into<PathBuf>, report: impl Into<PathBuf>) -> Artifacts {
        Artifacts {
            map: Artifact::new(ArtifactKind::Map, map),
            report: Artifact::new(ArtifactKind::Report, report),
        }
    }

    /// The clustered station map. Independent of any selection.
    pub fn map(&self) -> &Artifact {
        &self.map
    }

    /// The written report, displayed when the user asks for it.
    pub fn report(&self) -> &Artifact {
        &self.report
    }

    pub fn get(&self, kind: ArtifactKind) -> &Artifact {
        match kind {
            ArtifactKind::Map => &self.map,
            ArtifactKind::Report => &self.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/map.html");
    const REPORT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/report.html");

    #[test]
    fn map_reference_is_stable() {
        let artifacts = Artifacts::new(MAP, REPORT);
        assert_eq!(artifacts.map().path(), Path::new(MAP));
        assert_eq!(artifacts.map(), artifacts.get(ArtifactKind::Map));
        assert_eq!(artifacts.map().kind(), ArtifactKind::Map);
        assert_eq!(artifacts.report().kind(), ArtifactKind::Report);
    }

    #[test]
    fn read_returns_document_verbatim() {
        let artifacts = Artifacts::new(MAP, REPORT);
        let html = artifacts.map().read().unwrap();
        assert_eq!(html, std::fs::read_to_string(MAP).unwrap());
        assert!(artifacts.report().read().unwrap().contains("River water quality report"));
    }

    #[test]
    fn read_missing_document_fails() {
        let artifact = Artifact::new(ArtifactKind::Report, "/no/such/index.html");
        assert!(!artifact.exists());
        let err = artifact.read().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read report artifact /no/such/index.html"));
    }
}
