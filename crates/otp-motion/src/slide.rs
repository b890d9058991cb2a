//! # Slide Transition State Machine
//!
//! Animates the appearance and disappearance of a content region by height
//! and opacity so that surrounding layout never jumps.
//!
//! ## States
//!
//! ```text
//!              visible = true
//! IDLE_HIDDEN ───────────────────▶ ENTERING
//!      ▲                             │  (a) tween HIDDEN → {H, 1, hidden}
//!      │                             │  (b) snap  → VISIBLE
//!      │                             ▼
//!   LEAVING ◀─────────────────── IDLE_VISIBLE
//!      (a) snap  → {H, opacity, hidden}   visible = false
//!      (b) tween → HIDDEN, then unmount
//! ```
//!
//! A toggle while ENTERING or LEAVING cancels the running sequence on the
//! spot and requests the opposite one, which starts from the current style.
//!
//! ## Frames
//!
//! Nothing happens until the host calls [`Slide::tick`]. The first tick of a
//! sequence measures the content, emits the starting style and consumes no
//! time. Every later tick advances the current step by the elapsed duration.
//! Toggles that cancel each other before that first tick never reach the
//! screen: the machine falls back to the resting state it left.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::Easing;
use crate::measure::{read_height, Measure};
use crate::style::{Height, SlideStyle};

/// Number of transition records retained by a [`Slide`].
pub const HISTORY_LIMIT: usize = 32;

// ─── Configuration ───────────────────────────────────────────────────

/// Timing of the two tween steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Duration of the expanding step, in milliseconds.
    pub enter_ms: u64,
    /// Duration of the collapsing step, in milliseconds.
    pub leave_ms: u64,
    pub easing: Easing,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            enter_ms: 250,
            leave_ms: 250,
            easing: Easing::EaseOut,
        }
    }
}

impl SlideConfig {
    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn leave(&self) -> Duration {
        Duration::from_millis(self.leave_ms)
    }
}

// ─── States ──────────────────────────────────────────────────────────

/// Externally visible state of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideState {
    /// Content is unmounted.
    IdleHidden,
    /// Content is fully open with no animation running.
    IdleVisible,
    /// An enter sequence is requested or running.
    Entering,
    /// A leave sequence is requested or running.
    Leaving,
}

impl SlideState {
    /// Whether a sequence is requested or running.
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Entering | Self::Leaving)
    }

    fn resting(visible: bool) -> Self {
        if visible {
            Self::IdleVisible
        } else {
            Self::IdleHidden
        }
    }
}

impl std::fmt::Display for SlideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IdleHidden => "IDLE_HIDDEN",
            Self::IdleVisible => "IDLE_VISIBLE",
            Self::Entering => "ENTERING",
            Self::Leaving => "LEAVING",
        };
        f.write_str(s)
    }
}

/// Progress marker within a transition sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    /// Enter step (a): growing to the measured height.
    EnteringMeasuring,
    /// Enter step (b): released to content height.
    EnteringExpanded,
    /// Leave step (a): pinned to the measured height.
    LeavingMeasuring,
    /// Leave step (b): collapsing to zero.
    LeavingCollapsed,
}

impl Phase {
    /// Position within its sequence: 0 when idle, 1 for step (a), 2 for step (b).
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::EnteringMeasuring | Self::LeavingMeasuring => 1,
            Self::EnteringExpanded | Self::LeavingCollapsed => 2,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::EnteringMeasuring => "ENTERING_MEASURING",
            Self::EnteringExpanded => "ENTERING_EXPANDED",
            Self::LeavingMeasuring => "LEAVING_MEASURING",
            Self::LeavingCollapsed => "LEAVING_COLLAPSED",
        };
        f.write_str(s)
    }
}

/// What the slide renders for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rendered {
    /// Content is unmounted.
    Nothing,
    /// Content is mounted inside a wrapper with this style.
    Wrapper(SlideStyle),
}

impl Rendered {
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Wrapper(_))
    }

    pub fn style(&self) -> Option<SlideStyle> {
        match self {
            Self::Nothing => None,
            Self::Wrapper(style) => Some(*style),
        }
    }
}

/// Snapshot of the working state of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    /// Desired end state.
    pub visible: bool,
    pub phase: Phase,
    /// Height captured at the start of the latest sequence.
    pub measured_height: f32,
    /// Whether the content was shown without animation on first paint.
    pub mounted_on_initial_render: bool,
}

/// Record of a state change, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideTransitionRecord {
    pub from: SlideState,
    pub to: SlideState,
    /// Height measured by the sequence that caused the change.
    pub measured_height: f32,
}

// ─── Sequences ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Enter,
    Leave,
}

impl Direction {
    fn toward(visible: bool) -> Self {
        if visible {
            Self::Enter
        } else {
            Self::Leave
        }
    }

    fn state(&self) -> SlideState {
        match self {
            Self::Enter => SlideState::Entering,
            Self::Leave => SlideState::Leaving,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Requested; nothing measured or emitted yet.
    Pending,
    First,
    Second,
}

#[derive(Debug, Clone)]
struct Sequence {
    direction: Direction,
    /// State the slide was in when this sequence was requested.
    origin: SlideState,
    step: Step,
    measured_height: f32,
    /// Style at the start of the current step.
    from: SlideStyle,
    elapsed: Duration,
}

impl Sequence {
    fn requested(direction: Direction, origin: SlideState) -> Self {
        Self {
            direction,
            origin,
            step: Step::Pending,
            measured_height: 0.0,
            from: SlideStyle::HIDDEN,
            elapsed: Duration::ZERO,
        }
    }

    fn phase(&self) -> Phase {
        match (self.direction, self.step) {
            (Direction::Enter, Step::Pending | Step::First) => Phase::EnteringMeasuring,
            (Direction::Enter, Step::Second) => Phase::EnteringExpanded,
            (Direction::Leave, Step::Pending | Step::First) => Phase::LeavingMeasuring,
            (Direction::Leave, Step::Second) => Phase::LeavingCollapsed,
        }
    }

    /// Target style and duration of the current step. Zero duration snaps.
    fn target(&self, config: &SlideConfig) -> (SlideStyle, Duration) {
        let h = self.measured_height;
        let tween = |d: Duration| if h > 0.0 { d } else { Duration::ZERO };
        match (self.direction, self.step) {
            (Direction::Enter, Step::Second) => (SlideStyle::VISIBLE, Duration::ZERO),
            (Direction::Enter, _) => (SlideStyle::clipped(h, 1.0), tween(config.enter())),
            (Direction::Leave, Step::Second) => (SlideStyle::HIDDEN, tween(config.leave())),
            (Direction::Leave, _) => (SlideStyle::clipped(h, self.from.opacity), Duration::ZERO),
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Resting(bool),
    Running(Sequence),
}

// ─── The Slide ───────────────────────────────────────────────────────

/// A collapsible content region driven by its `visible` input.
///
/// The host updates the input with [`set_visible`](Slide::set_visible) and
/// calls [`tick`](Slide::tick) once per frame; there is no other trigger.
#[derive(Debug, Clone)]
pub struct Slide {
    config: SlideConfig,
    visible: bool,
    mode: Mode,
    style: SlideStyle,
    measured_height: f32,
    mounted_on_initial_render: bool,
    transitions: VecDeque<SlideTransitionRecord>,
}

impl Slide {
    /// Create a slide with default timing.
    ///
    /// Visible content appears immediately unless `force_initial_animation`
    /// is set, in which case it enters from the hidden style.
    pub fn new(visible: bool, force_initial_animation: bool) -> Self {
        Self::with_config(visible, force_initial_animation, SlideConfig::default())
    }

    /// Create a slide with explicit timing.
    pub fn with_config(visible: bool, force_initial_animation: bool, config: SlideConfig) -> Self {
        let shown_on_mount = visible && !force_initial_animation;
        let mode = if visible && force_initial_animation {
            Mode::Running(Sequence::requested(Direction::Enter, SlideState::IdleHidden))
        } else {
            Mode::Resting(visible)
        };
        Self {
            config,
            visible,
            mode,
            style: if shown_on_mount {
                SlideStyle::VISIBLE
            } else {
                SlideStyle::HIDDEN
            },
            measured_height: 0.0,
            mounted_on_initial_render: shown_on_mount,
            transitions: VecDeque::new(),
        }
    }

    /// Update the `visible` input. Setting the current value does nothing.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        let direction = Direction::toward(visible);

        let (origin, pending) = match &self.mode {
            Mode::Resting(resting) => (SlideState::resting(*resting), false),
            Mode::Running(seq) if seq.step == Step::Pending => (seq.origin, true),
            Mode::Running(seq) => {
                debug!(
                    cancelled = %seq.direction.state(),
                    phase = %seq.phase(),
                    "slide sequence cancelled"
                );
                (seq.direction.state(), false)
            }
        };

        if pending && origin == SlideState::resting(visible) {
            debug!(state = %origin, "slide toggled back before first frame");
            self.mode = Mode::Resting(visible);
            return;
        }
        self.mode = Mode::Running(Sequence::requested(direction, origin));
    }

    /// Advance by one frame and return what to render.
    ///
    /// `elapsed` is the time since the previous frame. `content` is measured
    /// only on the first frame of a sequence.
    pub fn tick<M: Measure + ?Sized>(&mut self, elapsed: Duration, content: &M) -> Rendered {
        let Mode::Running(seq) = &mut self.mode else {
            return self.rendered();
        };

        if seq.step == Step::Pending {
            let height = match seq.direction {
                Direction::Enter => read_height(content),
                Direction::Leave => match self.style.height {
                    Height::Px(h) if h > 0.0 => h,
                    Height::Px(_) => 0.0,
                    Height::Auto => read_height(content),
                },
            };
            seq.measured_height = height;
            seq.from = self.style;
            seq.elapsed = Duration::ZERO;
            seq.step = Step::First;
            let (origin, to) = (seq.origin, seq.direction.state());
            self.measured_height = height;
            debug!(from = %origin, to = %to, height, "slide sequence started");
            // A restart of the same direction is not a state change.
            if origin != to {
                self.record(origin, to, height);
            }
            return Rendered::Wrapper(self.style);
        }

        seq.elapsed = seq.elapsed.saturating_add(elapsed);
        let (target, duration) = seq.target(&self.config);
        let progress = if duration.is_zero() {
            1.0
        } else {
            seq.elapsed.as_secs_f32() / duration.as_secs_f32()
        };

        if progress < 1.0 {
            let eased = self.config.easing.apply(progress);
            self.style = seq.from.lerp(&target, eased, seq.measured_height);
            return Rendered::Wrapper(self.style);
        }

        self.style = target;
        if seq.step == Step::First {
            seq.step = Step::Second;
            seq.from = target;
            seq.elapsed = Duration::ZERO;
            return Rendered::Wrapper(self.style);
        }

        let (direction, height) = (seq.direction, seq.measured_height);
        self.finish(direction, height)
    }

    fn finish(&mut self, direction: Direction, height: f32) -> Rendered {
        let visible = direction == Direction::Enter;
        self.mode = Mode::Resting(visible);
        if !visible {
            self.mounted_on_initial_render = false;
        }
        let to = SlideState::resting(visible);
        debug!(to = %to, height, "slide sequence completed");
        self.record(direction.state(), to, height);
        self.rendered()
    }

    fn record(&mut self, from: SlideState, to: SlideState, measured_height: f32) {
        if self.transitions.len() == HISTORY_LIMIT {
            self.transitions.pop_front();
        }
        self.transitions.push_back(SlideTransitionRecord {
            from,
            to,
            measured_height,
        });
    }

    /// What the slide currently renders, without advancing.
    pub fn rendered(&self) -> Rendered {
        match self.mode {
            Mode::Resting(false) => Rendered::Nothing,
            _ => Rendered::Wrapper(self.style),
        }
    }

    pub fn state(&self) -> SlideState {
        match &self.mode {
            Mode::Resting(visible) => SlideState::resting(*visible),
            Mode::Running(seq) => seq.direction.state(),
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.mode {
            Mode::Resting(_) => Phase::Idle,
            Mode::Running(seq) => seq.phase(),
        }
    }

    /// The `visible` input as last set.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the host should keep scheduling frames.
    pub fn is_animating(&self) -> bool {
        matches!(self.mode, Mode::Running(_))
    }

    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    pub fn snapshot(&self) -> TransitionState {
        TransitionState {
            visible: self.visible,
            phase: self.phase(),
            measured_height: self.measured_height,
            mounted_on_initial_render: self.mounted_on_initial_render,
        }
    }

    /// Recent state changes, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &SlideTransitionRecord> {
        self.transitions.iter()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
