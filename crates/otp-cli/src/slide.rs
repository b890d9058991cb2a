//! # Slide Subcommand
//!
//! Drive a [`Slide`] over fixed-height content with a fixed frame interval
//! and print every frame it renders. Useful for checking timing and easing
//! settings without a renderer.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use otp_motion::{Easing, FixedHeight, Phase, Rendered, Slide, SlideConfig, SlideState};

/// Hard stop for a preview run.
pub const MAX_FRAMES: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EasingArg {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::EaseIn => Easing::EaseIn,
            EasingArg::EaseOut => Easing::EaseOut,
            EasingArg::EaseInOut => Easing::EaseInOut,
        }
    }
}

/// Arguments for the `otp slide` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SlideArgs {
    /// Natural height of the content, in pixels.
    #[arg(long, default_value_t = 120.0)]
    pub height: f32,

    /// Start hidden instead of visible.
    #[arg(long)]
    pub hidden: bool,

    /// Animate the initial mount when starting visible.
    #[arg(long)]
    pub force: bool,

    /// Flip visibility just before this frame. Repeatable.
    #[arg(long = "toggle-at", value_name = "FRAME")]
    pub toggle_at: Vec<u32>,

    /// Interval between frames, in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    #[arg(long, default_value_t = 250)]
    pub enter_ms: u64,

    #[arg(long, default_value_t = 250)]
    pub leave_ms: u64,

    #[arg(long, value_enum, default_value_t = EasingArg::EaseOut)]
    pub easing: EasingArg,
}

/// One rendered frame of a preview run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub index: u32,
    pub elapsed_ms: u64,
    pub state: SlideState,
    pub phase: Phase,
    pub rendered: Rendered,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self.rendered {
            Rendered::Nothing => "nothing".to_string(),
            Rendered::Wrapper(style) => style.to_string(),
        };
        write!(
            f,
            "{:>4} {:>6}ms {:<12} {}",
            self.index,
            self.elapsed_ms,
            self.state.to_string(),
            rendered
        )
    }
}

/// Run the slide until it settles and no toggles remain.
pub fn simulate(args: &SlideArgs) -> Vec<Frame> {
    let config = SlideConfig {
        enter_ms: args.enter_ms,
        leave_ms: args.leave_ms,
        easing: args.easing.into(),
    };
    let content = FixedHeight(args.height);
    let interval = Duration::from_millis(args.frame_ms);
    let last_toggle = args.toggle_at.iter().copied().max();

    let mut slide = Slide::with_config(!args.hidden, args.force, config);
    let mut frames = Vec::new();

    for index in 0..MAX_FRAMES {
        for _ in args.toggle_at.iter().filter(|&&at| at == index) {
            slide.set_visible(!slide.visible());
        }

        let rendered = slide.tick(interval, &content);
        frames.push(Frame {
            index,
            elapsed_ms: u64::from(index).saturating_mul(args.frame_ms),
            state: slide.state(),
            phase: slide.phase(),
            rendered,
        });

        let toggles_pending = last_toggle.is_some_and(|at| at > index);
        if !slide.is_animating() && !toggles_pending {
            break;
        }
    }

    tracing::debug!(frames = frames.len(), "slide preview finished");
    frames
}

/// Execute the slide subcommand. Frames are printed one per line, as JSON
/// when `json` is set.
pub fn run_slide(args: &SlideArgs, json: bool) -> Result<u8> {
    for frame in simulate(args) {
        if json {
            let line = serde_json::to_string(&frame).context("failed to encode frame")?;
            println!("{line}");
        } else {
            println!("{frame}");
        }
    }
    Ok(0)
}
