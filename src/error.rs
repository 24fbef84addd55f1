use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("input contains no colors")]
    EmptyHistogram,

    #[error("target color count must be at least 1")]
    InvalidColorCount,

    #[error("brightness level count must be at least 1")]
    InvalidLevelCount,

    #[error("step budget must be at least 1")]
    InvalidStepLimit,

    #[error("attempt count must be at least 1")]
    InvalidAttemptCount,

    #[error("level {level} is outside the palette's range [0, {levels}]")]
    LevelOutOfRange { level: u32, levels: u32 },

    #[error("color index {index} is outside the palette's {colors} base colors")]
    ColorOutOfRange { index: usize, colors: usize },
}
