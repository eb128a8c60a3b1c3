use super::*;
use crate::composition::model::builtin;
use crate::scene::chaos_field::DocumentVariant;

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn first_frame_has_one_hidden_chrome_scene() {
    let comp = builtin("AlfaVideoEN").unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap();
    assert_eq!(f.frame, FrameIndex(0));
    assert_eq!(f.scenes.len(), 1);
    let s = &f.scenes[0];
    assert_eq!(s.id, "chaos");
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.chrome.header_opacity, 0.0);
    assert_eq!(s.documents.len(), 20);
}

#[test]
fn transition_frame_stacks_two_scenes() {
    let comp = builtin("AlfaVideoEN").unwrap();
    // Second scene starts at 150 - 12.
    let f = Evaluator::eval_frame(&comp, FrameIndex(144)).unwrap();
    assert_eq!(f.scenes.len(), 2);
    assert_eq!(f.scenes[0].id, "chaos");
    assert_eq!(f.scenes[1].id, "no-structure");
    assert_eq!(f.scenes[1].local_frame, 6);
    assert_eq!(f.scenes[1].opacity, 0.5);
    assert!(f.scenes[1].documents.is_empty());
}

#[test]
fn out_of_bounds_frame_errors() {
    let comp = builtin("Scene1-Chaos").unwrap();
    assert!(Evaluator::eval_frame(&comp, FrameIndex(150)).is_err());
    assert!(Evaluator::eval_frames(&comp, range(140, 151), &EvalThreading::default()).is_err());
    let tail = Evaluator::eval_frames(&comp, range(140, 150), &EvalThreading::default()).unwrap();
    assert_eq!(tail.len(), 10);
}

#[test]
fn chaos_preview_fades_into_second_scene() {
    let comp = builtin("Scene1-Chaos").unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(144)).unwrap();
    let ids: Vec<&str> = f.scenes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["chaos", "no-structure"]);
    assert_eq!(f.scenes[0].opacity, 1.0);
    assert_eq!(f.scenes[0].documents.len(), 20);
    assert_eq!(f.scenes[1].opacity, 0.5);
}

#[test]
fn spreadsheet_scene_uses_sheet_layout() {
    let comp = builtin("ApreeVideoEN").unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(60)).unwrap();
    assert_eq!(f.scenes.len(), 1);
    let docs = &f.scenes[0].documents;
    assert_eq!(f.scenes[0].id, "spreadsheets");
    assert_eq!(docs.len(), 18);
    assert!(docs.iter().all(|d| d.variant == DocumentVariant::Sheet));
    assert!(docs[5].flagged);
    assert!(!docs[6].flagged);
}

#[test]
fn empty_range_is_rejected() {
    let comp = builtin("Scene1-Chaos").unwrap();
    let err = Evaluator::eval_frames(&comp, range(3, 3), &EvalThreading::default()).unwrap_err();
    assert!(matches!(err, CurveError::Validation(_)));
}

#[test]
fn zero_threads_is_rejected() {
    let comp = builtin("Scene1-Chaos").unwrap();
    let threading = EvalThreading {
        parallel: true,
        chunk_size: 8,
        threads: Some(0),
    };
    assert!(Evaluator::eval_frames(&comp, range(0, 10), &threading).is_err());
}

#[test]
fn parallel_matches_sequential() {
    let comp = builtin("ApreeVideoRU").unwrap();
    let r = range(100, 260);
    let seq = Evaluator::eval_frames(&comp, r, &EvalThreading::default()).unwrap();
    let par = Evaluator::eval_frames(
        &comp,
        r,
        &EvalThreading {
            parallel: true,
            chunk_size: 0,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 160);
    assert_eq!(seq, par);
}

#[test]
fn chunk_size_zero_normalizes_to_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(17), 17);
}
