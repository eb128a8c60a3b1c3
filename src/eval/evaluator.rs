use rayon::prelude::*;

use crate::{
    composition::model::{Composition, SceneKind},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CurveError, CurveResult},
    scene::chaos_field::{ChaosDocument, ChaosField},
    scene::chrome::SceneChrome,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully evaluated composition state for one frame.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Visible scenes in painter's order.
    pub scenes: Vec<EvaluatedScene>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One visible scene.
pub struct EvaluatedScene {
    /// Scene identifier.
    pub id: String,
    /// Position in the composition's scene list.
    pub index: usize,
    /// Frame relative to the scene's start.
    pub local_frame: u64,
    /// Transition opacity in `[0, 1]`.
    pub opacity: f64,
    /// Header and title state.
    pub chrome: SceneChrome,
    /// Chaos documents; empty for plain scenes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<ChaosDocument>,
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame evaluation.
pub struct EvalThreading {
    /// Evaluate chunks in parallel when `true`.
    pub parallel: bool,
    /// Chunk size in frames.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Stateless evaluator from composition timeline to per-frame state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp), fields(comp = comp.id()))]
    /// Evaluate one frame.
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> CurveResult<EvaluatedFrame> {
        let fps = comp.fps();
        let active = comp.active_at(frame)?;

        let mut scenes = Vec::with_capacity(active.len());
        for a in active {
            let local = a.local_frame as f64;
            let documents = match comp.scene_kind(a.index) {
                Some(SceneKind::Chaos { documents, preset }) => {
                    ChaosField::new(documents, comp.canvas(), preset)?.documents_at(local, fps)?
                }
                Some(SceneKind::Plain) => Vec::new(),
                None => {
                    return Err(CurveError::evaluation(format!(
                        "scene index {} missing from composition '{}'",
                        a.index,
                        comp.id()
                    )));
                }
            };
            scenes.push(EvaluatedScene {
                chrome: SceneChrome::at(local, fps)?,
                id: a.id,
                index: a.index,
                local_frame: a.local_frame,
                opacity: a.opacity,
                documents,
            });
        }

        Ok(EvaluatedFrame { frame, scenes })
    }

    #[tracing::instrument(skip(comp, threading), fields(comp = comp.id()))]
    /// Evaluate every frame in `range`, in order.
    ///
    /// Parallel evaluation splits the range into chunks and evaluates each chunk on a dedicated
    /// rayon pool; the result is identical to sequential evaluation.
    pub fn eval_frames(
        comp: &Composition,
        range: FrameRange,
        threading: &EvalThreading,
    ) -> CurveResult<Vec<EvaluatedFrame>> {
        if range.is_empty() {
            return Err(CurveError::validation("eval range must be non-empty"));
        }
        let playable = comp.frame_range();
        if !(playable.contains(range.start) && playable.contains(FrameIndex(range.end.0 - 1))) {
            return Err(CurveError::evaluation(format!(
                "eval range {}..{} exceeds composition length {}",
                range.start.0,
                range.end.0,
                comp.total_frames()
            )));
        }

        let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
        if !threading.parallel {
            for f in range.start.0..range.end.0 {
                out.push(Self::eval_frame(comp, FrameIndex(f))?);
            }
            return Ok(out);
        }

        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let frames: Vec<u64> = (chunk_start..chunk_end).collect();
            let evaluated = pool.install(|| {
                frames
                    .par_iter()
                    .map(|&f| Self::eval_frame(comp, FrameIndex(f)))
                    .collect::<Vec<_>>()
            });
            for item in evaluated {
                out.push(item?);
            }
            tracing::debug!(chunk_start, chunk_end, "evaluated chunk");
            chunk_start = chunk_end;
        }

        Ok(out)
    }
}

fn build_thread_pool(threads: Option<usize>) -> CurveResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CurveError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CurveError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
