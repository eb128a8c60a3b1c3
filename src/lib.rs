//! Framecurve is a deterministic, frame-driven motion timing library.
//!
//! Every value it produces is a pure function of a frame index and a frame rate. Scenes compose
//! two primitives, [`interpolate`] and [`spring`], with per-element delays to stagger entrances.
//!
//! # Pipeline overview
//!
//! 1. **Define**: a [`Composition`] is parsed from JSON or taken from the [`builtin`] registry.
//! 2. **Lay out**: its scenes form a [`SceneSeries`] joined by fade transitions.
//! 3. **Evaluate**: `Composition + FrameIndex -> EvaluatedFrame` (visible scenes, opacities,
//!    chrome and document state), sequentially or across a rayon pool.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same frame always evaluates to bit-identical output, so frames can
//!   be evaluated out of order or in parallel.
//! - **Loud contract violations**: bad breakpoints or layouts return errors instead of silently
//!   clamping.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod foundation;
mod scene;
mod timeline;

pub use animation::chaos::{DEFAULT_MAX_ROTATION_DEG, pseudo_random, random_position, random_rotation};
pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOptions, RangeMap, interpolate};
pub use animation::ops::{
    DEFAULT_DRAW_SECS, DEFAULT_FADE_SECS, DEFAULT_PULSE_SPEED, DEFAULT_STAGGER_FRAMES, Reveal,
    SlideDirection, count_up, draw_progress, fade_in, fade_out, marching_dash_offset, pulse,
    reveal, scale_in, slide_in, staggered_delay,
};
pub use animation::spring::{
    DEFAULT_REST_THRESHOLD, SpringConfig, SpringParams, SpringPreset, measure_spring, spring,
    spring_with,
};
pub use composition::model::{
    BUILTIN_CANVAS, BUILTIN_FPS, BUILTIN_IDS, BUILTIN_TRANSITION_FRAMES, Composition,
    CHAOS_PREVIEW_FRAMES, CompositionDef, Language, SceneDef, SceneKind, builtin,
    builtin_compositions,
};
pub use eval::evaluator::{EvalThreading, EvaluatedFrame, EvaluatedScene, Evaluator};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{CurveError, CurveResult};
pub use scene::chaos_field::{
    ChaosDocument, ChaosField, ChaosLayout, ChaosPreset, DocumentVariant, IconSet,
};
pub use scene::chrome::{SceneChrome, TITLE_DELAY_FRAMES, TITLE_RISE_PX};
pub use timeline::delay::DelayTable;
pub use timeline::series::{ActiveScene, SceneSeries, SceneSlot};
