//! Diagram element classification.
//!
//! Annotation dumps sort every layout element into one of six categories,
//! each stored under its own top-level section of the JSON file. The
//! [`ElementKind`] enum mirrors those sections.

use std::{fmt, str::FromStr};

/// The category of a diagram element.
///
/// Every annotated element belongs to exactly one category, determined by
/// which section of the annotation file declares it:
///
/// - **Blobs** are traced graphic objects (drawings of entities or their parts)
/// - **Text** blocks are written labels, captions, and titles
/// - **Arrows** are lines and arcs connecting or pointing at other elements
/// - **Arrowheads** mark the directed end of an arrow
/// - **Containers** group elements inside a drawn boundary
/// - **Image constants** stand for the diagram image as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Blob,
    Text,
    Arrow,
    ArrowHead,
    Container,
    ImageConst,
}

impl ElementKind {
    /// All element kinds, in the order the annotation sections are scanned.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Blob,
        ElementKind::Arrow,
        ElementKind::Text,
        ElementKind::ArrowHead,
        ElementKind::Container,
        ElementKind::ImageConst,
    ];

    /// Returns the annotation file section that declares elements of this kind.
    pub fn key(self) -> &'static str {
        match self {
            ElementKind::Blob => "blobs",
            ElementKind::Text => "text",
            ElementKind::Arrow => "arrows",
            ElementKind::ArrowHead => "arrowHeads",
            ElementKind::Container => "containers",
            ElementKind::ImageConst => "imageConsts",
        }
    }

    /// Returns a singular human-readable name for prose and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Blob => "blob",
            ElementKind::Text => "text block",
            ElementKind::Arrow => "arrow",
            ElementKind::ArrowHead => "arrowhead",
            ElementKind::Container => "container",
            ElementKind::ImageConst => "image constant",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = &'static str;

    /// Parses a section key ("blobs", "arrowHeads", ...) back into a kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blobs" => Ok(ElementKind::Blob),
            "text" => Ok(ElementKind::Text),
            "arrows" => Ok(ElementKind::Arrow),
            "arrowHeads" => Ok(ElementKind::ArrowHead),
            "containers" => Ok(ElementKind::Container),
            "imageConsts" => Ok(ElementKind::ImageConst),
            _ => Err("Invalid element category"),
        }
    }
}
