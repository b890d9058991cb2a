//! # otp-motion — Headless Slide Transitions
//!
//! Frame-driven show/hide animation for collapsible content regions. A
//! [`Slide`] watches a `visible` input, measures its content when a sequence
//! starts, and produces one [`Rendered`] value per frame: either a wrapper
//! style (height, opacity, overflow) or nothing at all once fully hidden.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use otp_motion::{FixedHeight, Rendered, Slide, SlideState, SlideStyle};
//!
//! let content = FixedHeight(120.0);
//! let mut slide = Slide::new(false, false);
//! slide.set_visible(true);
//!
//! while slide.is_animating() {
//!     slide.tick(Duration::from_millis(16), &content);
//! }
//! assert_eq!(slide.state(), SlideState::IdleVisible);
//! assert_eq!(slide.rendered(), Rendered::Wrapper(SlideStyle::VISIBLE));
//! ```
//!
//! ## Crate Policy
//!
//! - No rendering toolkit dependency. Hosts map [`SlideStyle`] onto their own
//!   layout primitives and implement [`Measure`] over their geometry.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod easing;
pub mod measure;
pub mod slide;
pub mod style;

pub use easing::Easing;
pub use measure::{Detached, FixedHeight, Measure};
pub use slide::{
    Phase, Rendered, Slide, SlideConfig, SlideState, SlideTransitionRecord, TransitionState,
    HISTORY_LIMIT,
};
pub use style::{Height, Overflow, SlideStyle};
