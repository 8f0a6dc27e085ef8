use crate::color::Rgb;
use crate::error::CoreError;

/// User-adjustable playback settings.
///
/// `interval_ms` is the delay between generated points. The user-facing
/// speed slider is inverted (`slider max − slider value`), so what is stored
/// here is an interval duration, not a rate — smaller means faster.
///
/// `total_points` is fixed at session creation; choosing a new vertex count
/// tears the whole session down, so there is no setter for it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PlaybackConfig {
    /// Milliseconds between generation ticks that emit a point.
    pub interval_ms: u64,

    /// Hue of the rendered point cloud, in degrees `[0, 360)`.
    hue: f64,

    /// Number of fractal points to generate before the session finishes.
    total_points: usize,

    /// Whether generation is active. Pausing stops point emission without
    /// stopping the tick loop.
    pub playing: bool,
}

/// Helper for deserialization — revalidates fields on load.
impl<'de> serde::Deserialize<'de> for PlaybackConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            interval_ms: u64,
            hue: f64,
            total_points: usize,
            playing: bool,
        }
        let raw = Raw::deserialize(deserializer)?;
        let mut config = PlaybackConfig::new(raw.interval_ms, raw.hue, raw.total_points)
            .map_err(serde::de::Error::custom)?;
        config.playing = raw.playing;
        Ok(config)
    }
}

impl PlaybackConfig {
    pub const DEFAULT_INTERVAL_MS: u64 = 1000;
    pub const DEFAULT_HUE: f64 = 180.0;
    pub const DEFAULT_TOTAL_POINTS: usize = 3000;

    pub fn new(interval_ms: u64, hue: f64, total_points: usize) -> crate::Result<Self> {
        if total_points < 1 {
            return Err(CoreError::InvalidTotalPoints(total_points));
        }
        if !hue.is_finite() {
            return Err(CoreError::InvalidHue(hue));
        }
        Ok(Self {
            interval_ms,
            hue: hue.rem_euclid(360.0),
            total_points,
            playing: true,
        })
    }

    /// The generation bound fixed at session creation.
    #[inline]
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    #[inline]
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Update the hue, wrapping into `[0, 360)`. Non-finite input is ignored.
    pub fn set_hue(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.hue = degrees.rem_euclid(360.0);
        }
    }

    /// The solid color every rendered point takes this frame.
    pub fn color(&self) -> Rgb {
        Rgb::from_hue(self.hue)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            hue: Self::DEFAULT_HUE,
            total_points: Self::DEFAULT_TOTAL_POINTS,
            playing: true,
        }
    }
}
