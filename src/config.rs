//! Scan configuration with environment overrides
//!
//! - `QR_RATIO_TOLERANCE`: max allowed ratio between bars (default 1.5, must be >= 1.0)
//! - `QR_THRESHOLD`: fixed binarization threshold (default 127)
//! - `QR_BINARIZE`: `otsu` selects Otsu's method instead of the fixed threshold

/// Default tolerance between bar widths of a finder cross-section
pub const DEFAULT_RATIO_TOLERANCE: f64 = 1.5;

/// Default fixed threshold: gray values above it become white
pub const DEFAULT_THRESHOLD: u8 = 127;

fn parse_env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
}

fn parse_env_u8(name: &str) -> Option<u8> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
}

/// How grayscale input is turned into a binary image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    /// Values above the threshold are white, the rest black
    Fixed(u8),
    /// Threshold picked per image by Otsu's method
    Otsu,
}

impl Default for Binarization {
    fn default() -> Self {
        Binarization::Fixed(DEFAULT_THRESHOLD)
    }
}

/// Tunables for the detection pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Ratio tolerance for the 1:1:3:1:1 classifier
    pub ratio_tolerance: f64,
    /// Binarization used when starting from grayscale or color input
    pub binarization: Binarization,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ratio_tolerance: DEFAULT_RATIO_TOLERANCE,
            binarization: Binarization::default(),
        }
    }
}

impl ScanConfig {
    /// Defaults overridden by `QR_*` environment variables.
    ///
    /// Unparseable values fall back to the defaults; a tolerance below 1.0
    /// would reject everything and is clamped to 1.0.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(tolerance) = parse_env_f64("QR_RATIO_TOLERANCE") {
            config.ratio_tolerance = tolerance.max(1.0);
        }
        if let Some(threshold) = parse_env_u8("QR_THRESHOLD") {
            config.binarization = Binarization::Fixed(threshold);
        }
        if std::env::var("QR_BINARIZE")
            .map(|v| v.trim().eq_ignore_ascii_case("otsu"))
            .unwrap_or(false)
        {
            config.binarization = Binarization::Otsu;
        }
        config
    }

    /// Same config with a different ratio tolerance
    pub fn with_ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.ratio_tolerance = tolerance.max(1.0);
        self
    }

    /// Same config with a different binarization
    pub fn with_binarization(mut self, binarization: Binarization) -> Self {
        self.binarization = binarization;
        self
    }
}
