//! Named reference templates and the immutable template library.

use crate::image::{ImageView, OwnedImage};
use crate::util::BoardResult;

mod library;
mod plan;

pub use library::{AnchorTemplates, TemplateLibrary, ANCHOR_ASSETS, OBJECT_ASSETS};
pub use plan::TemplatePlan;

/// Arrow marker orientation relative to the canonical (upward) arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Canonical,
    Rot90,
    Rot180,
    Rot270,
}

impl Orientation {
    /// The three non-canonical orientations, in scan order.
    pub const ROTATED: [Orientation; 3] = [
        Orientation::Rot90,
        Orientation::Rot180,
        Orientation::Rot270,
    ];

    /// Clockwise quarter turns from the canonical arrow.
    pub fn quarter_turns(self) -> u32 {
        match self {
            Orientation::Canonical => 0,
            Orientation::Rot90 => 1,
            Orientation::Rot180 => 2,
            Orientation::Rot270 => 3,
        }
    }
}

/// Kind of scored object printed on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Buoy,
    Lighthouse,
    BeaconHq,
}

/// Gating family an object template belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectFamily {
    /// Small floating markers found in open water.
    Buoy,
    /// Land structures: lighthouses and the beacon headquarters.
    Lighthouse,
}

impl ObjectKind {
    pub fn family(self) -> ObjectFamily {
        match self {
            ObjectKind::Buoy => ObjectFamily::Buoy,
            ObjectKind::Lighthouse | ObjectKind::BeaconHq => ObjectFamily::Lighthouse,
        }
    }
}

/// What a template is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateRole {
    Anchor(Orientation),
    Object(ObjectKind),
}

/// Named grayscale template with its correlation plan.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    role: TemplateRole,
    img: OwnedImage,
    plan: TemplatePlan,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        name: impl Into<String>,
        role: TemplateRole,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> BoardResult<Self> {
        Self::from_owned(name, role, OwnedImage::new(data, width, height)?)
    }

    /// Creates a template from an owned grayscale plane.
    pub fn from_owned(
        name: impl Into<String>,
        role: TemplateRole,
        img: OwnedImage,
    ) -> BoardResult<Self> {
        let plan = TemplatePlan::from_view(img.view())?;
        Ok(Self {
            name: name.into(),
            role,
            img,
            plan,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> TemplateRole {
        self.role
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template pixels.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }

    /// Derives the template for another arrow orientation by exact rotation.
    pub fn rotated(&self, name: impl Into<String>, orientation: Orientation) -> BoardResult<Self> {
        let img = self.img.rotated_quarter_turns(orientation.quarter_turns());
        Self::from_owned(name, TemplateRole::Anchor(orientation), img)
    }
}
