//! Core data models for croptree
//!
//! Defines the host document as plain data:
//! - `ViewRecord`: one view with its browser folders and crop settings
//! - `Inventory`: every view of a document plus the browser organization
//! - Supporting types: `ViewId`, `ViewKind`, `BoundingBox`, `CropSettings`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selection::SortOrder;

/// Stable identifier of a view in the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    FloorPlan,
    CeilingPlan,
    EngineeringPlan,
    AreaPlan,
    Elevation,
    Section,
    Detail,
    DraftingView,
    #[serde(rename = "three_d")]
    ThreeD,
    Rendering,
    Legend,
    Schedule,
    ColumnSchedule,
    PanelSchedule,
    DrawingSheet,
}

impl ViewKind {
    /// Whether views of this kind carry a crop region at all
    pub fn has_crop_region(self) -> bool {
        !matches!(
            self,
            ViewKind::Legend
                | ViewKind::Schedule
                | ViewKind::ColumnSchedule
                | ViewKind::PanelSchedule
                | ViewKind::DrawingSheet
        )
    }

    pub fn is_3d(self) -> bool {
        self == ViewKind::ThreeD
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::FloorPlan => "floor_plan",
            ViewKind::CeilingPlan => "ceiling_plan",
            ViewKind::EngineeringPlan => "engineering_plan",
            ViewKind::AreaPlan => "area_plan",
            ViewKind::Elevation => "elevation",
            ViewKind::Section => "section",
            ViewKind::Detail => "detail",
            ViewKind::DraftingView => "drafting_view",
            ViewKind::ThreeD => "three_d",
            ViewKind::Rendering => "rendering",
            ViewKind::Legend => "legend",
            ViewKind::Schedule => "schedule",
            ViewKind::ColumnSchedule => "column_schedule",
            ViewKind::PanelSchedule => "panel_schedule",
            ViewKind::DrawingSheet => "drawing_sheet",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point or direction in model space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when both directions lie on the same line (either sense)
    pub fn is_parallel_to(self, other: Self) -> bool {
        const TOLERANCE: f64 = 1e-9;
        if self.length() < TOLERANCE || other.length() < TOLERANCE {
            return false;
        }
        self.cross(other).length() < TOLERANCE * self.length() * other.length()
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

/// Annotation crop offsets, measured outward from the crop region
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationOffsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Crop settings of a view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CropSettings {
    /// Crop region, `None` when the view was never cropped
    #[serde(default)]
    pub region: Option<BoundingBox>,

    /// Whether the view is cropped
    #[serde(default)]
    pub active: bool,

    /// Whether the crop boundary is drawn
    #[serde(default)]
    pub visible: bool,

    #[serde(default)]
    pub annotation_crop_active: bool,

    /// `None` when the view cannot carry an annotation crop
    #[serde(default)]
    pub annotation_offsets: Option<AnnotationOffsets>,
}

/// A view of the host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: ViewId,
    pub name: String,
    pub kind: ViewKind,

    /// Project browser folders from the top level down
    #[serde(default)]
    pub folders: Vec<String>,

    #[serde(default)]
    pub is_template: bool,

    /// View direction (towards the viewer)
    #[serde(default = "default_direction")]
    pub direction: Vec3,

    #[serde(default)]
    pub crop: CropSettings,

    /// 3D views only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_box: Option<BoundingBox>,
}

fn default_direction() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

/// How the project browser organizes views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrowserOrganization {
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Every view of one document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub organization: BrowserOrganization,

    #[serde(default)]
    pub views: Vec<ViewRecord>,
}

impl Inventory {
    pub fn view(&self, id: ViewId) -> Option<&ViewRecord> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut ViewRecord> {
        self.views.iter_mut().find(|v| v.id == id)
    }
}
