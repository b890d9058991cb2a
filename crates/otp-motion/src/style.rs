//! # Wrapper Styles
//!
//! The three style properties a slide wrapper animates: height, opacity and
//! overflow. `Height::Auto` is the only non-numeric value; it is never
//! interpolated, only snapped to.

use serde::{Deserialize, Serialize};

/// Height of the slide wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Height {
    /// Fixed height in layout units.
    Px(f32),
    /// Height follows the content.
    Auto,
}

impl Height {
    /// The fixed height, resolving `Auto` to the given content height.
    pub fn resolve(&self, auto_height: f32) -> f32 {
        match self {
            Self::Px(h) => *h,
            Self::Auto => auto_height,
        }
    }
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(h) => write!(f, "{h:.1}"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// Overflow behaviour of the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Content outside the wrapper box is clipped.
    Hidden,
    /// Content may overflow the wrapper box.
    Visible,
}

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => f.write_str("hidden"),
            Self::Visible => f.write_str("visible"),
        }
    }
}

/// The complete style of the slide wrapper for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideStyle {
    pub height: Height,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    pub overflow: Overflow,
}

impl SlideStyle {
    /// Fully open: content-sized, opaque, unclipped.
    pub const VISIBLE: SlideStyle = SlideStyle {
        height: Height::Auto,
        opacity: 1.0,
        overflow: Overflow::Visible,
    };

    /// Fully collapsed: zero height, transparent, clipped.
    pub const HIDDEN: SlideStyle = SlideStyle {
        height: Height::Px(0.0),
        opacity: 0.0,
        overflow: Overflow::Hidden,
    };

    /// A clipped style at a fixed height.
    pub fn clipped(height: f32, opacity: f32) -> Self {
        Self {
            height: Height::Px(height),
            opacity,
            overflow: Overflow::Hidden,
        }
    }

    /// Interpolate between `self` and `to` at eased fraction `t`.
    ///
    /// `Auto` heights on the source side resolve to `auto_height`. A target
    /// of `Auto` is held at `auto_height` until `t` reaches 1. Overflow
    /// switches to the target value only at the end of the step, except that
    /// clipping applies from the first frame.
    pub fn lerp(&self, to: &SlideStyle, t: f32, auto_height: f32) -> SlideStyle {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return *to;
        }
        let from_h = self.height.resolve(auto_height);
        let to_h = to.height.resolve(auto_height);
        let overflow = if to.overflow == Overflow::Hidden {
            Overflow::Hidden
        } else {
            self.overflow
        };
        SlideStyle {
            height: Height::Px((from_h + (to_h - from_h) * t).max(0.0)),
            opacity: (self.opacity + (to.opacity - self.opacity) * t).clamp(0.0, 1.0),
            overflow,
        }
    }
}

impl std::fmt::Display for SlideStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "height={} opacity={:.3} overflow={}",
            self.height, self.opacity, self.overflow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint_between_hidden_and_clipped() {
        let to = SlideStyle::clipped(120.0, 1.0);
        let mid = SlideStyle::HIDDEN.lerp(&to, 0.5, 120.0);
        assert_eq!(mid.height, Height::Px(60.0));
        assert!((mid.opacity - 0.5).abs() < f32::EPSILON);
        assert_eq!(mid.overflow, Overflow::Hidden);
    }

    #[test]
    fn lerp_resolves_auto_source_height() {
        let from = SlideStyle::VISIBLE;
        let mid = from.lerp(&SlideStyle::HIDDEN, 0.25, 80.0);
        assert_eq!(mid.height, Height::Px(60.0));
        assert_eq!(mid.overflow, Overflow::Hidden);
    }

    #[test]
    fn lerp_at_end_returns_target_exactly() {
        let end = SlideStyle::clipped(40.0, 1.0).lerp(&SlideStyle::VISIBLE, 1.0, 40.0);
        assert_eq!(end, SlideStyle::VISIBLE);
    }

    #[test]
    fn lerp_clamps_fraction() {
        let below = SlideStyle::HIDDEN.lerp(&SlideStyle::clipped(10.0, 1.0), -3.0, 10.0);
        assert_eq!(below.height, Height::Px(0.0));
        let above = SlideStyle::HIDDEN.lerp(&SlideStyle::clipped(10.0, 1.0), 7.0, 10.0);
        assert_eq!(above, SlideStyle::clipped(10.0, 1.0));
    }

    #[test]
    fn style_display() {
        assert_eq!(
            SlideStyle::VISIBLE.to_string(),
            "height=auto opacity=1.000 overflow=visible"
        );
        assert_eq!(
            SlideStyle::HIDDEN.to_string(),
            "height=0.0 opacity=0.000 overflow=hidden"
        );
    }

    #[test]
    fn style_serializes_lowercase() {
        let json = serde_json::to_value(SlideStyle::VISIBLE).unwrap();
        assert_eq!(json["height"], "auto");
        assert_eq!(json["overflow"], "visible");
    }
}
