//! Text content of URL source files
//!
//! Plain text and Markdown are read directly. Word documents are converted
//! by whichever OS-level extraction tool is installed.

use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use tokio::process::Command;

use crate::error::{CaptureError, CaptureResult};

/// Kind of URL source file, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Classify `path` by its (case-insensitive) extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" | "md" | "markdown" => Some(Self::PlainText),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Converters tried in order; each prints plain text on stdout
    fn converters(self) -> &'static [Converter] {
        match self {
            Self::PlainText => &[],
            Self::Doc => DOC_CONVERTERS,
            Self::Docx => DOCX_CONVERTERS,
        }
    }
}

/// Program name and the arguments placed before the file path
type Converter = (&'static str, &'static [&'static str]);

const DOC_CONVERTERS: &[Converter] = &[
    ("textutil", &["-convert", "txt", "-stdout"]),
    ("antiword", &[]),
    ("catdoc", &[]),
];

const DOCX_CONVERTERS: &[Converter] = &[
    ("textutil", &["-convert", "txt", "-stdout"]),
    ("pandoc", &["-t", "plain"]),
];

/// Read the text content of a URL source file
///
/// # Errors
///
/// - `UnsupportedInput` for unknown extensions or unreadable files
/// - `EnvironmentUnavailable` when no converter for `.doc`/`.docx` is installed
pub async fn read_document_text(path: &Path) -> CaptureResult<String> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| {
        CaptureError::unsupported_input(
            path,
            "unsupported file type (expected .txt, .md, .doc or .docx)",
        )
    })?;

    match kind {
        DocumentKind::PlainText => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CaptureError::unsupported_input(path, format!("cannot read file: {e}"))),
        DocumentKind::Doc | DocumentKind::Docx => convert_with_os_tool(path, kind).await,
    }
}

async fn convert_with_os_tool(path: &Path, kind: DocumentKind) -> CaptureResult<String> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(CaptureError::unsupported_input(path, "file does not exist"));
    }

    let mut failures = Vec::new();
    for (program, args) in kind.converters() {
        let output = match Command::new(program).args(*args).arg(path).output().await {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Text extraction tool '{program}' not installed");
                continue;
            }
            Err(e) => {
                failures.push(format!("{program}: {e}"));
                continue;
            }
        };

        if output.status.success() {
            info!("Extracted text from {} with {program}", path.display());
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        failures.push(format!("{program} exited with {}: {}", output.status, stderr.trim()));
    }

    if failures.is_empty() {
        let tools: Vec<&str> = kind.converters().iter().map(|(program, _)| *program).collect();
        return Err(CaptureError::EnvironmentUnavailable {
            message: format!("No text extraction tool available for {}", path.display()),
            remediation: format!(
                "install one of: {}, or save the file as .txt/.md",
                tools.join(", ")
            ),
        });
    }

    Err(CaptureError::unsupported_input(
        path,
        format!("text extraction failed ({})", failures.join("; ")),
    ))
}
