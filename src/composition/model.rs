use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{CurveError, CurveResult},
    scene::chaos_field::ChaosPreset,
    timeline::series::{ActiveScene, SceneSeries, SceneSlot},
};

/// Frame rate shared by every builtin composition.
pub const BUILTIN_FPS: u32 = 30;
/// Square 1:1 output used by every builtin composition.
pub const BUILTIN_CANVAS: Canvas = Canvas {
    width: 1080,
    height: 1080,
};
/// Fade length between consecutive builtin scenes.
pub const BUILTIN_TRANSITION_FRAMES: u64 = 12;
/// Length of the `Scene1-Chaos` preview cut.
pub const CHAOS_PREVIEW_FRAMES: u64 = 150;

/// Narration language of a composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian.
    #[default]
    Ru,
    /// English.
    En,
}

impl Language {
    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            other => Err(CurveError::validation(format!("unknown language '{other}'"))),
        }
    }
}

/// What a scene draws besides its chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneKind {
    /// Header and title only.
    #[default]
    Plain,
    /// A field of drifting documents.
    Chaos {
        /// Number of documents in the field.
        documents: usize,
        /// Layout the field follows.
        preset: ChaosPreset,
    },
}

/// One scene as written in composition JSON.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Scene identifier, unique within the composition.
    pub id: String,
    /// Scene length in frames.
    pub duration_frames: u64,
    /// Number of drifting documents when this is a chaos scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos_documents: Option<usize>,
    /// Chaos layout preset; `alfa` when only `chaos_documents` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos_layout: Option<ChaosPreset>,
}

impl SceneDef {
    /// Plain scene of `duration_frames`.
    pub fn plain(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            id: id.into(),
            duration_frames,
            chaos_documents: None,
            chaos_layout: None,
        }
    }

    /// Content kind derived from the optional fields.
    ///
    /// Setting either chaos field makes a chaos scene; a missing document count falls back to
    /// the preset's default.
    pub fn kind(&self) -> SceneKind {
        if self.chaos_documents.is_none() && self.chaos_layout.is_none() {
            return SceneKind::Plain;
        }
        let preset = self.chaos_layout.unwrap_or_default();
        SceneKind::Chaos {
            documents: self
                .chaos_documents
                .unwrap_or(preset.layout().default_documents),
            preset,
        }
    }
}

/// JSON-facing composition definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionDef {
    /// Composition identifier.
    pub id: String,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Fade length between consecutive scenes.
    #[serde(default)]
    pub transition_frames: u64,
    /// Narration language.
    #[serde(default)]
    pub language: Language,
    /// Cuts the timeline short of the laid-out scene total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
    /// Scenes in playback order.
    pub scenes: Vec<SceneDef>,
}

impl CompositionDef {
    /// Check invariants that do not depend on scene layout.
    pub fn validate(&self) -> CurveResult<()> {
        if self.id.trim().is_empty() {
            return Err(CurveError::validation("composition id must be non-empty"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CurveError::validation("canvas width/height must be > 0"));
        }
        if self.duration_frames == Some(0) {
            return Err(CurveError::validation("composition duration_frames must be > 0"));
        }
        for s in &self.scenes {
            if s.chaos_documents == Some(0) {
                return Err(CurveError::validation(format!(
                    "chaos scene '{}' needs at least one document",
                    s.id
                )));
            }
        }
        Ok(())
    }

    fn slots(&self) -> Vec<SceneSlot> {
        self.scenes
            .iter()
            .map(|s| SceneSlot::new(s.id.clone(), s.duration_frames))
            .collect()
    }
}

/// Validated composition with its scene series laid out.
#[derive(Clone, Debug)]
pub struct Composition {
    def: CompositionDef,
    series: SceneSeries,
}

impl Composition {
    /// Validate `def` and lay out its scenes.
    pub fn new(def: CompositionDef) -> CurveResult<Self> {
        def.validate()?;
        let series = SceneSeries::new(def.slots(), def.transition_frames)?;
        if let Some(cut) = def.duration_frames
            && cut > series.total_frames()
        {
            return Err(CurveError::validation(format!(
                "composition duration_frames {cut} exceeds scene total {}",
                series.total_frames()
            )));
        }
        Ok(Self { def, series })
    }

    /// Parse and validate a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CurveResult<Self> {
        let def: CompositionDef = serde_json::from_reader(r)
            .map_err(|e| CurveError::validation(format!("parse composition JSON: {e}")))?;
        Self::new(def)
    }

    /// Parse and validate a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CurveError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize the definition back to pretty JSON.
    pub fn to_json(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(&self.def).map_err(|e| CurveError::serde(e.to_string()))
    }

    /// Re-check the definition.
    pub fn validate(&self) -> CurveResult<()> {
        self.def.validate()
    }

    /// Underlying definition.
    pub fn def(&self) -> &CompositionDef {
        &self.def
    }

    /// Composition identifier.
    pub fn id(&self) -> &str {
        &self.def.id
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.def.fps
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.def.canvas
    }

    /// Narration language.
    pub fn language(&self) -> Language {
        self.def.language
    }

    /// Scene layout on the timeline.
    pub fn series(&self) -> &SceneSeries {
        &self.series
    }

    /// Total length in frames: the `duration_frames` cut when set, else the scene total.
    pub fn total_frames(&self) -> u64 {
        self.def
            .duration_frames
            .unwrap_or_else(|| self.series.total_frames())
    }

    /// Playable frames, `[0, total_frames)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Scenes visible at `frame`, in painter's order.
    pub fn active_at(&self, frame: FrameIndex) -> CurveResult<Vec<ActiveScene>> {
        if !self.frame_range().contains(frame) {
            return Err(CurveError::evaluation(format!(
                "frame {} is outside composition '{}' (length {})",
                frame.0,
                self.id(),
                self.total_frames()
            )));
        }
        self.series.active_at(frame)
    }

    /// Content kind of scene `index`.
    pub fn scene_kind(&self, index: usize) -> Option<SceneKind> {
        self.def.scenes.get(index).map(SceneDef::kind)
    }
}

const ALFA_SCENES: [(&str, u64); 9] = [
    ("chaos", 150),
    ("no-structure", 90),
    ("registry-problem", 90),
    ("separation", 120),
    ("ai-analysis", 180),
    ("column-mapping", 120),
    ("matching", 150),
    ("export", 150),
    ("tech-stack", 150),
];

const APREE_SCENES: [(&str, u64); 11] = [
    ("spreadsheets", 120),
    ("spaghetti-scripts", 120),
    ("data-leaks", 120),
    ("sales-panel", 150),
    ("google-workspace", 120),
    ("sso", 150),
    ("analytics", 150),
    ("content-system", 150),
    ("integration", 120),
    ("results", 120),
    ("tech-stack", 150),
];

/// Identifiers accepted by [`builtin`].
pub const BUILTIN_IDS: [&str; 5] = [
    "AlfaVideoRU",
    "AlfaVideoEN",
    "ApreeVideoRU",
    "ApreeVideoEN",
    "Scene1-Chaos",
];

fn builtin_def(
    id: &str,
    language: Language,
    transition_frames: u64,
    duration_frames: Option<u64>,
    scenes: &[(&str, u64)],
) -> CompositionDef {
    CompositionDef {
        id: id.to_string(),
        fps: Fps {
            num: BUILTIN_FPS,
            den: 1,
        },
        canvas: BUILTIN_CANVAS,
        transition_frames,
        language,
        duration_frames,
        scenes: scenes
            .iter()
            .map(|&(sid, duration_frames)| SceneDef {
                chaos_layout: match sid {
                    "chaos" => Some(ChaosPreset::Alfa),
                    "spreadsheets" => Some(ChaosPreset::Apree),
                    _ => None,
                },
                ..SceneDef::plain(sid, duration_frames)
            })
            .collect(),
    }
}

/// Definition of a builtin composition by id.
pub fn builtin(id: &str) -> CurveResult<Composition> {
    let def = match id {
        "AlfaVideoRU" => {
            builtin_def(id, Language::Ru, BUILTIN_TRANSITION_FRAMES, None, &ALFA_SCENES)
        }
        "AlfaVideoEN" => {
            builtin_def(id, Language::En, BUILTIN_TRANSITION_FRAMES, None, &ALFA_SCENES)
        }
        "ApreeVideoRU" => {
            builtin_def(id, Language::Ru, BUILTIN_TRANSITION_FRAMES, None, &APREE_SCENES)
        }
        "ApreeVideoEN" => {
            builtin_def(id, Language::En, BUILTIN_TRANSITION_FRAMES, None, &APREE_SCENES)
        }
        // Full Alfa timeline cut to the first scene's length.
        "Scene1-Chaos" => builtin_def(
            id,
            Language::Ru,
            BUILTIN_TRANSITION_FRAMES,
            Some(CHAOS_PREVIEW_FRAMES),
            &ALFA_SCENES,
        ),
        other => {
            return Err(CurveError::validation(format!(
                "unknown builtin composition '{other}' (expected one of: {})",
                BUILTIN_IDS.join(", ")
            )));
        }
    };
    Composition::new(def)
}

/// Every builtin composition, in registry order.
pub fn builtin_compositions() -> CurveResult<Vec<Composition>> {
    BUILTIN_IDS.iter().map(|id| builtin(id)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
