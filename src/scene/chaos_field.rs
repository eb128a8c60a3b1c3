use crate::{
    animation::chaos::{random_position, random_rotation},
    animation::interpolate::{InterpolateOptions, interpolate},
    animation::spring::{SpringPreset, spring},
    foundation::core::{Canvas, Fps, Vec2},
    foundation::error::{CurveError, CurveResult},
    timeline::delay::DelayTable,
};

/// What kind of icons a chaos scene scatters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSet {
    /// Mixed office files cycling pdf, doc, unknown.
    Files,
    /// Spreadsheets, every fifth one flagged with an error badge.
    Sheets,
}

/// Tunable geometry and motion of a [`ChaosField`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChaosLayout {
    /// Icons drawn for each document.
    pub icons: IconSet,
    /// Documents in the field unless the scene asks for a different count.
    pub default_documents: usize,
    /// Added to `i * 17` to seed document `i`'s position.
    pub position_seed_offset: f64,
    /// Added to `i * 23` to seed document `i`'s base tilt.
    pub tilt_seed_offset: f64,
    /// Largest base tilt, in degrees.
    pub max_tilt_deg: f64,
    /// Frames between consecutive entrances.
    pub stagger_frames: u64,
    /// Vertical float amplitude in pixels.
    pub float_px: f64,
    /// Rotation wobble amplitude in degrees.
    pub wobble_deg: f64,
    /// Scale of document 0.
    pub base_scale: f64,
    /// Scale added per step of the scale cycle.
    pub scale_step: f64,
    /// Length of the scale cycle.
    pub scale_cycle: usize,
    /// Canvas area not covered by the content area, per axis.
    pub margin: Vec2,
    /// Offset of the scatter inside the content area.
    pub origin: Vec2,
}

/// Document icon footprint subtracted from the scatter bounds.
const ICON_EXTENT: Vec2 = Vec2::new(80.0, 100.0);

/// Named chaos layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaosPreset {
    /// Floating office documents.
    #[default]
    Alfa,
    /// Floating spreadsheets.
    Apree,
}

impl ChaosPreset {
    /// Layout parameters for this preset.
    pub fn layout(self) -> ChaosLayout {
        match self {
            Self::Alfa => ChaosLayout {
                icons: IconSet::Files,
                default_documents: 20,
                position_seed_offset: 0.0,
                tilt_seed_offset: 0.0,
                max_tilt_deg: 35.0,
                stagger_frames: 2,
                float_px: 8.0,
                wobble_deg: 4.0,
                base_scale: 0.8,
                scale_step: 0.15,
                scale_cycle: 3,
                margin: Vec2::new(100.0, 280.0),
                origin: Vec2::new(50.0, 120.0),
            },
            Self::Apree => ChaosLayout {
                icons: IconSet::Sheets,
                default_documents: 18,
                position_seed_offset: 5.0,
                tilt_seed_offset: 3.0,
                max_tilt_deg: 25.0,
                stagger_frames: 3,
                float_px: 10.0,
                wobble_deg: 3.0,
                base_scale: 0.7,
                scale_step: 0.15,
                scale_cycle: 4,
                margin: Vec2::new(120.0, 320.0),
                origin: Vec2::new(60.0, 100.0),
            },
        }
    }
}

impl From<ChaosPreset> for ChaosLayout {
    fn from(p: ChaosPreset) -> Self {
        p.layout()
    }
}

/// File type badge drawn on a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVariant {
    /// PDF file.
    Pdf,
    /// Word document.
    Doc,
    /// Unrecognized file.
    Unknown,
    /// Spreadsheet.
    Sheet,
}

impl DocumentVariant {
    fn for_index(icons: IconSet, i: usize) -> Self {
        match (icons, i % 3) {
            (IconSet::Sheets, _) => Self::Sheet,
            (IconSet::Files, 0) => Self::Pdf,
            (IconSet::Files, 1) => Self::Doc,
            (IconSet::Files, _) => Self::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    variant: DocumentVariant,
    flagged: bool,
    base: Vec2,
    tilt_deg: f64,
    scale: f64,
}

/// One document of a [`ChaosField`] at a given frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChaosDocument {
    /// Document index.
    pub index: usize,
    /// File type badge.
    pub variant: DocumentVariant,
    /// Shows an error badge.
    pub flagged: bool,
    /// Top-left position in pixels, float offset included.
    pub position: Vec2,
    /// Rotation in degrees, wobble included.
    pub rotation_deg: f64,
    /// Current scale, growing from 0.5 to the document's own scale.
    pub scale: f64,
    /// Entrance opacity.
    pub opacity: f64,
}

/// A seeded scatter of documents drifting over the content area.
///
/// Placement depends only on the document index, so every frame sees the same layout; motion is
/// layered on top as a function of the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChaosField {
    layout: ChaosLayout,
    placements: Vec<Placement>,
    delays: DelayTable,
}

impl ChaosField {
    /// Lay out `count` documents over `canvas`.
    pub fn new(count: usize, canvas: Canvas, layout: impl Into<ChaosLayout>) -> CurveResult<Self> {
        let layout = layout.into();
        if count == 0 {
            return Err(CurveError::validation("chaos field needs at least one document"));
        }
        if layout.scale_cycle == 0 {
            return Err(CurveError::validation("chaos layout scale_cycle must be >= 1"));
        }
        let bounds = Vec2::new(f64::from(canvas.width), f64::from(canvas.height))
            - layout.margin
            - ICON_EXTENT;

        let placements = (0..count)
            .map(|i| {
                let fi = i as f64;
                let pos = random_position(fi * 17.0 + layout.position_seed_offset, bounds.x, bounds.y);
                Placement {
                    variant: DocumentVariant::for_index(layout.icons, i),
                    flagged: layout.icons == IconSet::Sheets && i % 5 == 0,
                    base: pos + layout.origin,
                    tilt_deg: random_rotation(fi * 23.0 + layout.tilt_seed_offset, layout.max_tilt_deg),
                    scale: layout.base_scale + (i % layout.scale_cycle) as f64 * layout.scale_step,
                }
            })
            .collect();

        Ok(Self {
            layout,
            placements,
            delays: DelayTable::stagger(count, 0, layout.stagger_frames),
        })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Always `false`; a field holds at least one document.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Layout parameters in use.
    pub fn layout(&self) -> &ChaosLayout {
        &self.layout
    }

    /// Entrance delays, one per document.
    pub fn delays(&self) -> &DelayTable {
        &self.delays
    }

    /// Every document at scene-local `frame`.
    pub fn documents_at(&self, frame: f64, fps: Fps) -> CurveResult<Vec<ChaosDocument>> {
        let l = &self.layout;
        self.placements
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let fi = i as f64;
                let float = ((frame + fi * 20.0) / 25.0).sin() * l.float_px;
                let wobble = ((frame + fi * 15.0) / 35.0).sin() * l.wobble_deg;

                let progress = spring(self.delays.local_frame(i, frame)?, fps, SpringPreset::Smooth);
                let opacity = interpolate(
                    progress,
                    &[0.0, 0.5],
                    &[0.0, 1.0],
                    InterpolateOptions::clamp_right(),
                )?;
                let scale = interpolate(
                    progress,
                    &[0.0, 1.0],
                    &[0.5, p.scale],
                    InterpolateOptions::default(),
                )?;

                Ok(ChaosDocument {
                    index: i,
                    variant: p.variant,
                    flagged: p.flagged,
                    position: Vec2::new(p.base.x, p.base.y + float),
                    rotation_deg: p.tilt_deg + wobble,
                    scale,
                    opacity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/chaos_field.rs"]
mod tests;
