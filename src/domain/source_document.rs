#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub declared_name: String,
    pub kind: SourceKind,
    pub size_bytes: u64,
}

/// How the extraction pipeline should treat the file: documents get a
/// native text-layer pass before any visual analysis, images go straight
/// to visual analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Document,
    Image,
}

impl SourceKind {
    /// Classification keys on the declared name, not the content: the
    /// upstream drive hands workspace exports over with a `.pdf` name.
    pub fn from_declared_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".pdf") {
            Self::Document
        } else {
            Self::Image
        }
    }
}

impl SourceDocument {
    pub fn new(declared_name: String, size_bytes: u64) -> Self {
        let kind = SourceKind::from_declared_name(&declared_name);
        Self {
            declared_name,
            kind,
            size_bytes,
        }
    }
}
