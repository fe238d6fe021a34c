//! The fixed set of templates a deployment matches against.
//!
//! The library is built once (from an asset directory or from in-memory
//! templates) and only read afterwards, so analysis runs on different threads
//! can share one instance by reference.

use crate::image::io::load_gray_image;
use crate::template::{ObjectKind, Orientation, Template, TemplateRole};
use crate::util::{BoardError, BoardResult};
use std::path::Path;

/// Arrow asset file names, canonical first.
pub const ANCHOR_ASSETS: [(Orientation, &str); 4] = [
    (Orientation::Canonical, "arrow_tight_crop.png"),
    (Orientation::Rot90, "arrow_tight_90.png"),
    (Orientation::Rot180, "arrow_tight_180.png"),
    (Orientation::Rot270, "arrow_tight_270.png"),
];

/// Object asset names, kinds and file names in matching order.
pub const OBJECT_ASSETS: [(&str, ObjectKind, &str); 6] = [
    ("beacon_hq", ObjectKind::BeaconHq, "bp_hq_score_3.png"),
    ("lighthouse", ObjectKind::Lighthouse, "lighthouse_score_3.png"),
    ("buoy_birds", ObjectKind::Buoy, "small_buoy_birds_score_1.png"),
    ("buoy_birds2", ObjectKind::Buoy, "small_buoy_birds2_score_1.png"),
    ("buoy_blue", ObjectKind::Buoy, "small_buoy_blue_score_1.png"),
    ("buoy_score", ObjectKind::Buoy, "small_buoy_score_1.png"),
];

/// Canonical arrow template plus its three rotated variants.
#[derive(Clone, Debug)]
pub struct AnchorTemplates {
    canonical: Template,
    rotated: [Template; 3],
}

impl AnchorTemplates {
    /// Groups separately cropped templates.
    ///
    /// Every template must carry an anchor role; the rotated ones are kept in
    /// the order given.
    pub fn new(canonical: Template, rotated: [Template; 3]) -> BoardResult<Self> {
        if canonical.role() != TemplateRole::Anchor(Orientation::Canonical) {
            return Err(role_mismatch(&canonical, "expected canonical anchor"));
        }
        if let Some(bad) = rotated
            .iter()
            .find(|tpl| !matches!(tpl.role(), TemplateRole::Anchor(o) if o != Orientation::Canonical))
        {
            return Err(role_mismatch(bad, "expected rotated anchor"));
        }
        Ok(Self { canonical, rotated })
    }

    /// Derives the rotated variants from the canonical arrow by quarter turns.
    pub fn from_canonical(canonical: Template) -> BoardResult<Self> {
        let base = canonical.name().to_owned();
        let [r90, r180, r270] = Orientation::ROTATED;
        let rotated = [
            canonical.rotated(format!("{base}_90"), r90)?,
            canonical.rotated(format!("{base}_180"), r180)?,
            canonical.rotated(format!("{base}_270"), r270)?,
        ];
        Self::new(canonical, rotated)
    }

    pub fn canonical(&self) -> &Template {
        &self.canonical
    }

    pub fn rotated(&self) -> &[Template; 3] {
        &self.rotated
    }
}

/// Immutable set of anchor and object templates.
#[derive(Clone, Debug)]
pub struct TemplateLibrary {
    anchors: AnchorTemplates,
    objects: Vec<Template>,
}

impl TemplateLibrary {
    /// Builds a library from in-memory templates.
    ///
    /// Object templates are matched in the order given; on equal confidence
    /// the earlier one wins.
    pub fn new(anchors: AnchorTemplates, objects: Vec<Template>) -> BoardResult<Self> {
        if let Some(bad) = objects
            .iter()
            .find(|tpl| !matches!(tpl.role(), TemplateRole::Object(_)))
        {
            return Err(role_mismatch(bad, "expected object template"));
        }
        Ok(Self { anchors, objects })
    }

    /// Loads the fixed asset set from `dir`.
    ///
    /// Every file in [`ANCHOR_ASSETS`] and [`OBJECT_ASSETS`] must exist and
    /// decode.
    pub fn load<P: AsRef<Path>>(dir: P) -> BoardResult<Self> {
        let dir = dir.as_ref();
        let mut anchors = Vec::with_capacity(ANCHOR_ASSETS.len());
        for (orientation, file) in ANCHOR_ASSETS {
            let name = file.trim_end_matches(".png");
            anchors.push(load_asset(dir, name, file, TemplateRole::Anchor(orientation))?);
        }
        let mut anchors = anchors.into_iter();
        let (Some(canonical), Some(r90), Some(r180), Some(r270)) =
            (anchors.next(), anchors.next(), anchors.next(), anchors.next())
        else {
            return Err(BoardError::TemplateAsset {
                name: "arrow".to_owned(),
                reason: "incomplete anchor set".to_owned(),
            });
        };
        let anchors = AnchorTemplates::new(canonical, [r90, r180, r270])?;

        let objects = OBJECT_ASSETS
            .iter()
            .map(|&(name, kind, file)| load_asset(dir, name, file, TemplateRole::Object(kind)))
            .collect::<BoardResult<Vec<_>>>()?;

        crate::trace::trace_event!(
            "template_library_loaded",
            anchors = 4usize,
            objects = objects.len()
        );
        Self::new(anchors, objects)
    }

    pub fn anchors(&self) -> &AnchorTemplates {
        &self.anchors
    }

    pub fn objects(&self) -> &[Template] {
        &self.objects
    }
}

fn load_asset(dir: &Path, name: &str, file: &str, role: TemplateRole) -> BoardResult<Template> {
    let path = dir.join(file);
    let img = load_gray_image(&path).map_err(|err| BoardError::TemplateAsset {
        name: name.to_owned(),
        reason: format!("{}: {err}", path.display()),
    })?;
    Template::from_owned(name, role, img).map_err(|err| BoardError::TemplateAsset {
        name: name.to_owned(),
        reason: err.to_string(),
    })
}

fn role_mismatch(tpl: &Template, reason: &str) -> BoardError {
    BoardError::TemplateAsset {
        name: tpl.name().to_owned(),
        reason: reason.to_owned(),
    }
}
