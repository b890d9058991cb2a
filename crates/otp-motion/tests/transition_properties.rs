//! Property tests for the slide state machine under arbitrary input
//! sequences: interleaved visibility toggles and frame ticks.

use std::time::Duration;

use otp_motion::{FixedHeight, Height, Rendered, Slide, SlideState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Input {
    Toggle(bool),
    Tick(u64),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        any::<bool>().prop_map(Input::Toggle),
        (0u64..120).prop_map(Input::Tick),
    ]
}

fn check_frame(slide: &Slide, rendered: Rendered) -> Result<(), TestCaseError> {
    match rendered {
        Rendered::Nothing => {
            prop_assert_eq!(slide.state(), SlideState::IdleHidden);
        }
        Rendered::Wrapper(style) => {
            prop_assert_ne!(slide.state(), SlideState::IdleHidden);
            prop_assert!((0.0..=1.0).contains(&style.opacity));
            if let Height::Px(h) = style.height {
                prop_assert!(h >= 0.0, "negative height {}", h);
            }
        }
    }
    prop_assert!(slide.snapshot().measured_height >= 0.0);
    Ok(())
}

proptest! {
    /// Unmounted output and a non-hidden state never coexist.
    #[test]
    fn rendered_output_matches_state(
        visible in any::<bool>(),
        force in any::<bool>(),
        height in 0.0f32..400.0,
        inputs in prop::collection::vec(input(), 0..60),
    ) {
        let content = FixedHeight(height);
        let mut slide = Slide::new(visible, force);
        check_frame(&slide, slide.rendered())?;

        for step in inputs {
            let rendered = match step {
                Input::Toggle(v) => {
                    slide.set_visible(v);
                    slide.rendered()
                }
                Input::Tick(ms) => slide.tick(Duration::from_millis(ms), &content),
            };
            check_frame(&slide, rendered)?;
        }
    }

    /// Within one sequence the phase only moves forward.
    #[test]
    fn phase_never_regresses_between_ticks(
        height in 1.0f32..400.0,
        inputs in prop::collection::vec(input(), 0..60),
    ) {
        let content = FixedHeight(height);
        let mut slide = Slide::new(false, false);

        for step in inputs {
            match step {
                Input::Toggle(v) => slide.set_visible(v),
                Input::Tick(ms) => {
                    let (state, phase) = (slide.state(), slide.phase());
                    slide.tick(Duration::from_millis(ms), &content);
                    if slide.state() == state {
                        prop_assert!(
                            slide.phase().ordinal() >= phase.ordinal(),
                            "phase went from {} to {}", phase, slide.phase()
                        );
                    }
                }
            }
        }
    }

    /// Left alone, the slide settles in the resting state matching its input.
    #[test]
    fn settles_on_requested_visibility(
        height in 0.0f32..400.0,
        inputs in prop::collection::vec(input(), 0..40),
    ) {
        let content = FixedHeight(height);
        let mut slide = Slide::new(true, false);
        for step in inputs {
            match step {
                Input::Toggle(v) => slide.set_visible(v),
                Input::Tick(ms) => {
                    slide.tick(Duration::from_millis(ms), &content);
                }
            }
        }

        for _ in 0..64 {
            if !slide.is_animating() {
                break;
            }
            slide.tick(Duration::from_millis(100), &content);
        }

        let expected = if slide.visible() {
            SlideState::IdleVisible
        } else {
            SlideState::IdleHidden
        };
        prop_assert_eq!(slide.state(), expected);
        prop_assert_eq!(slide.rendered().is_mounted(), slide.visible());
    }
}
