//! # cv: CV document rendering
//!
//! Deterministic mapping from a [`CvData`] record and a display [`Language`] to
//! one of four documents:
//!
//! - [`table::render_delimited_table`]: comma-delimited table, round-trip safe
//! - [`text::render_plain_text`]: human-readable résumé
//! - [`latex::render_latex`]: LaTeX source with escaped free text
//! - [`pdf::render_pdf`]: two-column paginated PDF with a sidebar
//!
//! The text renderers are pure. The PDF renderer reads the optional profile
//! image named in [`pdf::PdfOptions`] and skips it when unavailable.

pub mod latex;
pub mod pdf;
pub mod table;
pub mod text;

use crate::model::{CvData, Language};
use tracing::{error, info};

pub use latex::render_latex;
pub use pdf::{render_pdf, PdfOptions};
pub use table::{parse_delimited_table, render_delimited_table};
pub use text::render_plain_text;

#[derive(Debug, thiserror::Error)]
pub enum CvError {
    #[error("failed to read image asset: {0}")]
    Io(#[from] std::io::Error),
}

/// Output formats of the CV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Csv,
    Text,
    Latex,
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Csv,
        DocumentFormat::Text,
        DocumentFormat::Latex,
        DocumentFormat::Pdf,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Csv => "csv",
            DocumentFormat::Text => "txt",
            DocumentFormat::Latex => "tex",
            DocumentFormat::Pdf => "pdf",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            DocumentFormat::Csv => "text/csv",
            DocumentFormat::Text => "text/plain",
            DocumentFormat::Latex => "application/x-latex",
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(DocumentFormat::Csv),
            "text" | "txt" => Ok(DocumentFormat::Text),
            "latex" | "tex" => Ok(DocumentFormat::Latex),
            "pdf" => Ok(DocumentFormat::Pdf),
            other => Err(format!(
                "unsupported document format '{other}', expected csv, text, latex or pdf"
            )),
        }
    }
}

/// A rendered document, ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: DocumentFormat,
    pub language: Language,
    pub bytes: Vec<u8>,
}

/// Renders `data` in `format` for `language`.
pub fn render_document(
    data: &CvData,
    format: DocumentFormat,
    language: Language,
    pdf_options: &PdfOptions,
) -> Result<RenderedDocument, CvError> {
    info!(?format, %language, name = %data.profile.name, "Rendering CV document");
    let (profile, skills, projects) = (&data.profile, &data.skills, data.projects.as_slice());
    let bytes = match format {
        DocumentFormat::Csv => render_delimited_table(profile, skills, projects, language).into_bytes(),
        DocumentFormat::Text => render_plain_text(profile, skills, projects, language).into_bytes(),
        DocumentFormat::Latex => render_latex(profile, skills, projects, language).into_bytes(),
        DocumentFormat::Pdf => render_pdf(profile, skills, projects, language, pdf_options)
            .map_err(|e| {
                error!(error = %e, "PDF rendering failed");
                e
            })?,
    };
    info!(?format, %language, size = bytes.len(), "Rendered CV document");
    Ok(RenderedDocument {
        format,
        language,
        bytes,
    })
}

/// Localized section headings shared by the plain-text, LaTeX and PDF renderers.
pub(crate) struct Headings {
    pub contact: &'static str,
    pub summary: &'static str,
    pub skills: &'static str,
    pub languages: &'static str,
    pub projects: &'static str,
    pub selected_projects: &'static str,
}

impl Headings {
    pub(crate) fn for_language(lang: Language) -> Self {
        match lang {
            Language::Pt => Headings {
                contact: "Contato",
                summary: "Resumo",
                skills: "Habilidades",
                languages: "Idiomas",
                projects: "Projetos",
                selected_projects: "Projetos Selecionados",
            },
            Language::En => Headings {
                contact: "Contact",
                summary: "Summary",
                skills: "Skills",
                languages: "Languages",
                projects: "Projects",
                selected_projects: "Selected Projects",
            },
        }
    }
}
