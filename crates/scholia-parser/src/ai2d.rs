//! Serde model of AI2D annotation files.
//!
//! One AI2D JSON file describes the crowd-sourced annotation of a single
//! diagram image: the diagram elements grouped into sections (`blobs`,
//! `text`, `arrows`, `arrowHeads`, `containers`, `imageConsts`) and the
//! `relationships` holding between them. Section maps are keyed by element
//! identifier and preserve file order, which downstream extraction relies
//! on.
//!
//! # Example
//!
//! ```
//! # use scholia_parser::ai2d::Annotation;
//!
//! let source = r#"{
//!     "blobs": {"B0": {"id": "B0", "polygon": [[10, 10], [60, 12], [40, 50]]}},
//!     "text": {"T0": {"id": "T0", "rectangle": [[70, 14], [120, 30]], "value": "stratus"}},
//!     "relationships": {
//!         "R0": {"id": "R0", "category": "intraObjectLabel",
//!                "origin": "T0", "destination": "B0"}
//!     }
//! }"#;
//!
//! let annotation: Annotation = source.parse().unwrap();
//! assert_eq!(annotation.element_count(), 2);
//! assert_eq!(annotation.relationships().len(), 1);
//! ```

use std::{fmt, io, path::Path, path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use scholia_core::{
    element::ElementKind,
    geometry::{Polygon, Rect},
    identifier::Id,
};

/// Errors produced while loading AI2D annotation files.
#[derive(Debug, Error)]
pub enum Ai2dError {
    /// The annotation file could not be read.
    #[error("failed to read annotation file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The annotation file does not contain valid annotation JSON.
    #[error("malformed annotation in `{path}`: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An annotation string does not contain valid annotation JSON.
    #[error("malformed annotation: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Diagram elements
// =============================================================================

/// A hand-drawn region of the diagram, outlined by a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    id: Id,
    polygon: Polygon,
}

impl Blob {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

/// A block of written text, located by its bounding rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    id: Id,
    rectangle: Rect,
    #[serde(default)]
    value: String,
    #[serde(
        default,
        rename = "replacementText",
        skip_serializing_if = "Option::is_none"
    )]
    replacement_text: Option<String>,
}

impl TextBlock {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn rectangle(&self) -> Rect {
        self.rectangle
    }

    /// The transcribed text content.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Normalised replacement for the transcription, when one was annotated.
    pub fn replacement_text(&self) -> Option<&str> {
        self.replacement_text.as_deref()
    }
}

/// An arrow or line, outlined by a polygon along its shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    id: Id,
    polygon: Polygon,
}

impl Arrow {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

/// The head of an arrow, located by its bounding rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    id: Id,
    rectangle: Rect,
    /// Orientation in degrees, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    orientation: Option<f64>,
}

impl ArrowHead {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn rectangle(&self) -> Rect {
        self.rectangle
    }

    pub fn orientation(&self) -> Option<f64> {
        self.orientation
    }
}

/// A container grouping other elements, such as a boxed inset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    polygon: Option<Polygon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rectangle: Option<Rect>,
}

impl Container {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        self.polygon.as_ref()
    }

    pub fn rectangle(&self) -> Option<Rect> {
        self.rectangle
    }
}

/// The image constant, standing in for the diagram image as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConst {
    id: Id,
}

impl ImageConst {
    pub fn id(&self) -> Id {
        self.id
    }
}

// =============================================================================
// Relationships
// =============================================================================

/// The category of an AI2D relationship.
///
/// Categories the dataset does not document are preserved verbatim in
/// [`Category::Other`] rather than rejected, so files from newer dataset
/// revisions still parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Pairs an arrow with its head.
    ArrowHeadTail,
    /// A text label describing an arrow.
    ArrowDescriptor,
    /// A text label naming an element.
    IntraObjectLabel,
    /// A text label naming a region of an element.
    IntraObjectRegionLabel,
    /// An arrow connecting an element to its label.
    IntraObjectLinkage,
    /// A line connecting a text block to another text block.
    IntraObjectTextLinkage,
    /// An arrow or line connecting two distinct elements.
    InterObjectLinkage,
    /// A title for a section of the diagram.
    SectionTitle,
    /// A title for the whole diagram.
    ImageTitle,
    /// A caption for the whole diagram.
    ImageCaption,
    /// A relationship between a section and the whole image.
    ImageSection,
    /// Miscellaneous text related to the whole image.
    ImageMisc,
    /// A category not covered by the dataset documentation.
    Other(String),
}

impl Category {
    /// Returns the category name as it appears in annotation files.
    pub fn as_str(&self) -> &str {
        match self {
            Category::ArrowHeadTail => "arrowHeadTail",
            Category::ArrowDescriptor => "arrowDescriptor",
            Category::IntraObjectLabel => "intraObjectLabel",
            Category::IntraObjectRegionLabel => "intraObjectRegionLabel",
            Category::IntraObjectLinkage => "intraObjectLinkage",
            Category::IntraObjectTextLinkage => "intraObjectTextLinkage",
            Category::InterObjectLinkage => "interObjectLinkage",
            Category::SectionTitle => "sectionTitle",
            Category::ImageTitle => "imageTitle",
            Category::ImageCaption => "imageCaption",
            Category::ImageSection => "imageSection",
            Category::ImageMisc => "imageMisc",
            Category::Other(raw) => raw,
        }
    }

    /// Returns `true` for the structural category pairing arrows with heads.
    pub fn is_arrow_head_tail(&self) -> bool {
        matches!(self, Category::ArrowHeadTail)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "arrowHeadTail" => Category::ArrowHeadTail,
            "arrowDescriptor" => Category::ArrowDescriptor,
            "intraObjectLabel" => Category::IntraObjectLabel,
            "intraObjectRegionLabel" => Category::IntraObjectRegionLabel,
            "intraObjectLinkage" => Category::IntraObjectLinkage,
            "intraObjectTextLinkage" => Category::IntraObjectTextLinkage,
            "interObjectLinkage" => Category::InterObjectLinkage,
            "sectionTitle" => Category::SectionTitle,
            "imageTitle" => Category::ImageTitle,
            "imageCaption" => Category::ImageCaption,
            "imageSection" => Category::ImageSection,
            "imageMisc" => Category::ImageMisc,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A relationship between two diagram elements.
///
/// Relationships run from `origin` to `destination`, optionally via a
/// `connector` element (an arrow or line). The connector field carries
/// three states in annotation files, and they mean different things:
/// present, explicitly empty, and absent entirely. An explicitly empty
/// connector marks a relationship whose drawn connector was retracted,
/// and such relationships do not contribute graph edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    id: Id,
    category: Category,
    origin: Id,
    destination: Id,
    #[serde(
        default,
        deserialize_with = "connector_field",
        skip_serializing_if = "Option::is_none"
    )]
    connector: Option<Option<Id>>,
    #[serde(default, rename = "hasDirectionality")]
    has_directionality: bool,
}

impl Relationship {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn origin(&self) -> Id {
        self.origin
    }

    pub fn destination(&self) -> Id {
        self.destination
    }

    /// The connecting element, if the relationship has a usable one.
    ///
    /// Returns `None` both when the field is absent and when it is
    /// explicitly empty; [`Relationship::has_connector_field`] tells the
    /// two apart.
    pub fn connector(&self) -> Option<Id> {
        self.connector.flatten().filter(|id| *id != "")
    }

    /// Whether the annotation file carries a connector field at all,
    /// even an empty one.
    pub fn has_connector_field(&self) -> bool {
        self.connector.is_some()
    }

    /// Whether the relationship is directional.
    pub fn has_directionality(&self) -> bool {
        self.has_directionality
    }
}

/// Deserialize a connector field, keeping explicit `null` distinct from a
/// missing field.
fn connector_field<'de, D>(deserializer: D) -> Result<Option<Option<Id>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Id>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Outlines
// =============================================================================

/// The drawable outline of a relationship participant.
///
/// Only blobs, text blocks, arrows, and the image constant carry outlines;
/// arrowheads and containers do not participate in annotation viewing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coords", rename_all = "snake_case")]
pub enum Outline {
    /// A blob outline, as a polygon.
    Blob(Polygon),
    /// A text block outline, as a rectangle.
    Text(Rect),
    /// An arrow outline, as a polygon.
    Arrow(Polygon),
    /// The whole diagram image.
    EntireImage,
}

// =============================================================================
// Annotation files
// =============================================================================

/// Parsed annotation for a single AI2D diagram.
///
/// Missing sections deserialize as empty maps; annotation files routinely
/// omit sections with no elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    blobs: IndexMap<Id, Blob>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    text: IndexMap<Id, TextBlock>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    arrows: IndexMap<Id, Arrow>,
    #[serde(
        default,
        rename = "arrowHeads",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    arrow_heads: IndexMap<Id, ArrowHead>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    containers: IndexMap<Id, Container>,
    #[serde(
        default,
        rename = "imageConsts",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    image_consts: IndexMap<Id, ImageConst>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    relationships: IndexMap<Id, Relationship>,
}

impl Annotation {
    /// Load annotation from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Ai2dError> {
        let path = path.as_ref();
        debug!(path:?; "Reading annotation file");

        let source = std::fs::read_to_string(path).map_err(|source| Ai2dError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| Ai2dError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn blobs(&self) -> &IndexMap<Id, Blob> {
        &self.blobs
    }

    pub fn text(&self) -> &IndexMap<Id, TextBlock> {
        &self.text
    }

    pub fn arrows(&self) -> &IndexMap<Id, Arrow> {
        &self.arrows
    }

    pub fn arrow_heads(&self) -> &IndexMap<Id, ArrowHead> {
        &self.arrow_heads
    }

    pub fn containers(&self) -> &IndexMap<Id, Container> {
        &self.containers
    }

    pub fn image_consts(&self) -> &IndexMap<Id, ImageConst> {
        &self.image_consts
    }

    pub fn relationships(&self) -> &IndexMap<Id, Relationship> {
        &self.relationships
    }

    /// Iterate over all diagram elements with their kinds.
    ///
    /// Elements are yielded in section scan order (blobs, arrows, text,
    /// arrowheads, containers, image constants), each section in file
    /// order.
    pub fn elements(&self) -> impl Iterator<Item = (Id, ElementKind)> + '_ {
        let blobs = self
            .blobs
            .keys()
            .copied()
            .map(|id| (id, ElementKind::Blob));
        let arrows = self
            .arrows
            .keys()
            .copied()
            .map(|id| (id, ElementKind::Arrow));
        let text = self.text.keys().copied().map(|id| (id, ElementKind::Text));
        let arrow_heads = self
            .arrow_heads
            .keys()
            .copied()
            .map(|id| (id, ElementKind::ArrowHead));
        let containers = self
            .containers
            .keys()
            .copied()
            .map(|id| (id, ElementKind::Container));
        let image_consts = self
            .image_consts
            .keys()
            .copied()
            .map(|id| (id, ElementKind::ImageConst));

        blobs
            .chain(arrows)
            .chain(text)
            .chain(arrow_heads)
            .chain(containers)
            .chain(image_consts)
    }

    /// Total number of diagram elements across all sections.
    pub fn element_count(&self) -> usize {
        self.blobs.len()
            + self.text.len()
            + self.arrows.len()
            + self.arrow_heads.len()
            + self.containers.len()
            + self.image_consts.len()
    }

    /// Look up the kind of an element by identifier.
    pub fn element_kind(&self, id: Id) -> Option<ElementKind> {
        if self.blobs.contains_key(&id) {
            Some(ElementKind::Blob)
        } else if self.text.contains_key(&id) {
            Some(ElementKind::Text)
        } else if self.arrows.contains_key(&id) {
            Some(ElementKind::Arrow)
        } else if self.arrow_heads.contains_key(&id) {
            Some(ElementKind::ArrowHead)
        } else if self.containers.contains_key(&id) {
            Some(ElementKind::Container)
        } else if self.image_consts.contains_key(&id) {
            Some(ElementKind::ImageConst)
        } else {
            None
        }
    }

    /// Look up the drawable outline of an element by identifier.
    ///
    /// Arrowheads and containers have no outline representation.
    pub fn outline(&self, id: Id) -> Option<Outline> {
        if let Some(blob) = self.blobs.get(&id) {
            return Some(Outline::Blob(blob.polygon().clone()));
        }
        if let Some(text) = self.text.get(&id) {
            return Some(Outline::Text(text.rectangle()));
        }
        if let Some(arrow) = self.arrows.get(&id) {
            return Some(Outline::Arrow(arrow.polygon().clone()));
        }
        if self.image_consts.contains_key(&id) {
            return Some(Outline::EntireImage);
        }
        None
    }
}

impl FromStr for Annotation {
    type Err = Ai2dError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(source)?)
    }
}
