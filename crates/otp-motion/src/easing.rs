//! Easing curves applied to the linear progress of a tween step.

use serde::{Deserialize, Serialize};

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0, 1]`; endpoints are exact.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
    }

    #[test]
    fn default_is_ease_out() {
        assert_eq!(Easing::default(), Easing::EaseOut);
        let parsed: Easing = serde_json::from_str("\"ease_in_out\"").unwrap();
        assert_eq!(parsed, Easing::EaseInOut);
    }
}
