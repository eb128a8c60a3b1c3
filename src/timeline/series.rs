use std::collections::BTreeSet;

use crate::{
    animation::interpolate::{InterpolateOptions, interpolate},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CurveError, CurveResult},
};

/// One scene placed in a [`SceneSeries`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSlot {
    /// Scene identifier, unique within the series.
    pub id: String,
    /// Scene length in frames, including the frames it shares with transitions.
    pub duration_frames: u64,
}

impl SceneSlot {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            id: id.into(),
            duration_frames,
        }
    }
}

/// A scene visible at some frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveScene {
    /// Position in the series.
    pub index: usize,
    /// Scene identifier.
    pub id: String,
    /// Frame relative to the scene's own start.
    pub local_frame: u64,
    /// Transition opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Scenes played back to back, each pair joined by a linear fade of `transition_frames`.
///
/// Consecutive scenes overlap for the length of the transition: the incoming scene fades in on
/// top while the outgoing one stays fully opaque underneath. The total length is therefore
/// `sum(durations) - (n - 1) * transition_frames`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSeries {
    scenes: Vec<SceneSlot>,
    transition_frames: u64,
    starts: Vec<u64>,
}

impl SceneSeries {
    /// Validate and lay out `scenes`.
    ///
    /// Every scene must be longer than the transition, and scenes in the middle of the series must
    /// fit both of their transitions (`duration >= 2 * transition`), so at most two scenes are ever
    /// visible at once.
    pub fn new(scenes: Vec<SceneSlot>, transition_frames: u64) -> CurveResult<Self> {
        if scenes.is_empty() {
            return Err(CurveError::validation("scene series needs at least one scene"));
        }

        let mut seen = BTreeSet::new();
        for s in &scenes {
            if s.id.trim().is_empty() {
                return Err(CurveError::validation("scene id must be non-empty"));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(CurveError::validation(format!(
                    "duplicate scene id '{}'",
                    s.id
                )));
            }
            if s.duration_frames == 0 {
                return Err(CurveError::validation(format!(
                    "scene '{}' must last at least one frame",
                    s.id
                )));
            }
        }

        let n = scenes.len();
        let transition_frames = if n == 1 { 0 } else { transition_frames };
        for (i, s) in scenes.iter().enumerate() {
            let neighbours = u64::from(i > 0) + u64::from(i + 1 < n);
            let needed = transition_frames.saturating_mul(neighbours);
            if neighbours > 0 && s.duration_frames <= transition_frames {
                return Err(CurveError::validation(format!(
                    "scene '{}' ({} frames) must be longer than the {transition_frames}-frame transition",
                    s.id, s.duration_frames
                )));
            }
            if s.duration_frames < needed {
                return Err(CurveError::validation(format!(
                    "scene '{}' ({} frames) is too short for its two {transition_frames}-frame transitions",
                    s.id, s.duration_frames
                )));
            }
        }

        let mut starts = Vec::with_capacity(n);
        let mut at = 0u64;
        for s in &scenes {
            starts.push(at);
            at = at + s.duration_frames - transition_frames;
        }

        let series = Self {
            scenes,
            transition_frames,
            starts,
        };
        tracing::debug!(
            scenes = series.scenes.len(),
            transition_frames,
            total_frames = series.total_frames(),
            "scene series laid out"
        );
        Ok(series)
    }

    /// Scenes in playback order.
    pub fn scenes(&self) -> &[SceneSlot] {
        &self.scenes
    }

    /// Fade length between consecutive scenes (0 for a single scene).
    pub fn transition_frames(&self) -> u64 {
        self.transition_frames
    }

    /// Total timeline length in frames.
    pub fn total_frames(&self) -> u64 {
        let last = self.scenes.len() - 1;
        self.starts[last] + self.scenes[last].duration_frames
    }

    /// Timeline placement `[start, end)` of scene `index`.
    pub fn scene_range(&self, index: usize) -> Option<FrameRange> {
        let slot = self.scenes.get(index)?;
        let start = self.starts[index];
        Some(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + slot.duration_frames),
        })
    }

    /// Scenes visible at `frame` in painter's order (bottom first).
    pub fn active_at(&self, frame: FrameIndex) -> CurveResult<Vec<ActiveScene>> {
        let total = self.total_frames();
        if frame.0 >= total {
            return Err(CurveError::evaluation(format!(
                "frame {} is out of bounds for a {total}-frame series",
                frame.0
            )));
        }

        let mut out = Vec::with_capacity(2);
        for (index, slot) in self.scenes.iter().enumerate() {
            let start = self.starts[index];
            if frame.0 < start {
                break;
            }
            let local = frame.0 - start;
            if local >= slot.duration_frames {
                continue;
            }
            out.push(ActiveScene {
                index,
                id: slot.id.clone(),
                local_frame: local,
                opacity: self.entering_opacity(index, local)?,
            });
        }
        Ok(out)
    }

    fn entering_opacity(&self, index: usize, local: u64) -> CurveResult<f64> {
        if index == 0 || self.transition_frames == 0 || local >= self.transition_frames {
            return Ok(1.0);
        }
        interpolate(
            local as f64,
            &[0.0, self.transition_frames as f64],
            &[0.0, 1.0],
            InterpolateOptions::clamped(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/series.rs"]
mod tests;
