use crate::{
    animation::interpolate::{InterpolateOptions, interpolate},
    animation::ops::reveal,
    animation::spring::{SpringPreset, spring},
    foundation::core::Fps,
    foundation::error::CurveResult,
};

/// Frames the title waits after the header starts entering.
pub const TITLE_DELAY_FRAMES: f64 = 10.0;
/// Pixels the title rises while it enters.
pub const TITLE_RISE_PX: f64 = 20.0;

const FADE_SPAN: f64 = 0.3;

/// Header and title entrance shared by every scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneChrome {
    /// Phase header opacity.
    pub header_opacity: f64,
    /// Title opacity.
    pub title_opacity: f64,
    /// Title vertical offset in pixels.
    pub title_translate_y: f64,
}

impl SceneChrome {
    /// Chrome state at scene-local `frame`.
    pub fn at(frame: f64, fps: Fps) -> CurveResult<Self> {
        let header = spring(frame, fps, SpringPreset::Smooth);
        let header_opacity = interpolate(
            header,
            &[0.0, FADE_SPAN],
            &[0.0, 1.0],
            InterpolateOptions::clamp_right(),
        )?;

        let title = reveal(
            spring(frame - TITLE_DELAY_FRAMES, fps, SpringPreset::Smooth),
            FADE_SPAN,
            TITLE_RISE_PX,
        )?;

        Ok(Self {
            header_opacity,
            title_opacity: title.opacity,
            title_translate_y: title.translate_y,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/chrome.rs"]
mod tests;
