use super::*;
use crate::compile::instruction::{CompositionParams, GapPayload, UnknownPayload};
use crate::diagnostics::CompileWarning;
use crate::foundation::core::FrameWindow;

fn timeline() -> CompiledTimeline {
    CompiledTimeline {
        composition: CompositionParams {
            width: 1920,
            height: 1080,
            fps: 30,
            duration_in_frames: 60,
        },
        instructions: vec![
            RenderInstruction {
                item_id: "a".to_owned(),
                frame_window: FrameWindow {
                    start_frame: 0,
                    frame_count: 30,
                },
                layer: 0,
                payload: Payload::Gap(GapPayload {
                    color: Color::BLACK,
                }),
            },
            RenderInstruction {
                item_id: "b".to_owned(),
                frame_window: FrameWindow {
                    start_frame: 30,
                    frame_count: 30,
                },
                layer: 1,
                payload: Payload::Unknown(UnknownPayload {
                    item_type: "lottie".to_owned(),
                }),
            },
        ],
        warnings: Vec::new(),
    }
}

#[test]
fn fingerprint_is_deterministic() {
    let t = timeline();
    assert_eq!(t.fingerprint(), t.clone().fingerprint());
}

#[test]
fn fingerprint_ignores_warnings() {
    let a = timeline();
    let mut b = timeline();
    b.warnings.push(CompileWarning::MissingItem {
        item_id: "x".to_owned(),
    });
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn fingerprint_changes_with_content() {
    let base = timeline().fingerprint();

    let mut t = timeline();
    t.composition.fps = 25;
    assert_ne!(base, t.fingerprint());

    let mut t = timeline();
    t.instructions[1].frame_window.start_frame = 31;
    assert_ne!(base, t.fingerprint());

    let mut t = timeline();
    t.instructions[0].payload = Payload::Gap(GapPayload {
        color: Color::WHITE,
    });
    assert_ne!(base, t.fingerprint());

    let mut t = timeline();
    t.instructions.swap(0, 1);
    assert_ne!(base, t.fingerprint());
}

#[test]
fn display_is_32_hex_digits() {
    let s = TimelineFingerprint { hi: 1, lo: 0xab }.to_string();
    assert_eq!(s, "000000000000000100000000000000ab");
}
