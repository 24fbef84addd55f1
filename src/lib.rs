#![forbid(unsafe_code)]

pub mod color;
pub mod error;
mod histogram;
mod kmeans;
pub mod palette;

pub use color::LinearRgb;
pub use error::QuantizeError;
pub use palette::Palette;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Configuration for palette quantization.
#[derive(Debug, Clone)]
pub struct QuantizeConfig {
    /// Target number of base colors. Silently clamped down to the input's
    /// distinct-color count when larger.
    pub colors: u32,
    /// Brightness levels per base color (≥1). A value of 1 degenerates to
    /// ordinary single-level k-means.
    pub levels: u32,
    /// Maximum assignment/update steps per attempt.
    pub max_steps: u32,
    /// Number of independent restart attempts; the lowest-error one wins.
    pub attempts: u32,
    /// RNG seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            colors: 16,
            levels: 4,
            max_steps: 1000,
            attempts: 5,
            seed: None,
        }
    }
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(mut self, n: u32) -> Self {
        self.colors = n;
        self
    }

    pub fn levels(mut self, n: u32) -> Self {
        self.levels = n;
        self
    }

    pub fn max_steps(mut self, n: u32) -> Self {
        self.max_steps = n;
        self
    }

    pub fn attempts(mut self, n: u32) -> Self {
        self.attempts = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Quantization result: the winning palette plus selection diagnostics.
#[derive(Debug)]
pub struct QuantizeResult {
    palette: Palette,
    attempt_errors: Vec<f64>,
    best_attempt: usize,
    distinct_colors: usize,
}

impl QuantizeResult {
    /// The finished palette of the winning attempt.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_palette(self) -> Palette {
        self.palette
    }

    /// Reconstruction error of every attempt, in attempt order.
    pub fn attempt_errors(&self) -> &[f64] {
        &self.attempt_errors
    }

    /// 1-based index of the winning attempt.
    pub fn best_attempt(&self) -> usize {
        self.best_attempt
    }

    /// Reconstruction error of the winning attempt.
    pub fn best_error(&self) -> f64 {
        self.attempt_errors[self.best_attempt - 1]
    }

    /// Number of distinct colors in the input.
    pub fn distinct_colors(&self) -> usize {
        self.distinct_colors
    }
}

/// Quantize one image's pixels into a multi-level palette.
///
/// `pixels` is every pixel of the image as integer RGB; duplicates are
/// collapsed into a weighted histogram before clustering, so pixel order
/// does not matter.
pub fn quantize(
    pixels: &[rgb::RGB<u8>],
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    validate(config)?;

    let points = histogram::build_points(pixels, config.levels)?;
    let distinct = points.len();
    let target = (config.colors as usize).min(distinct);
    if target < config.colors as usize {
        warn!(
            "requested {} colors but input has only {distinct} distinct; clamping",
            config.colors
        );
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clustering = kmeans::Clustering::new(points, target, config.levels, config.max_steps);
    let outcome = clustering.run(config.attempts, &mut rng);
    let palette = Palette::from_centroids(&outcome.centroids, config.levels);

    Ok(QuantizeResult {
        palette,
        attempt_errors: outcome.attempt_errors,
        best_attempt: outcome.best_attempt,
        distinct_colors: distinct,
    })
}

fn validate(config: &QuantizeConfig) -> Result<(), QuantizeError> {
    if config.colors == 0 {
        return Err(QuantizeError::InvalidColorCount);
    }
    if config.levels == 0 {
        return Err(QuantizeError::InvalidLevelCount);
    }
    if config.max_steps == 0 {
        return Err(QuantizeError::InvalidStepLimit);
    }
    if config.attempts == 0 {
        return Err(QuantizeError::InvalidAttemptCount);
    }
    Ok(())
}
