use crate::color::LinearRgb;
use crate::error::QuantizeError;

/// The finished quantization palette.
///
/// Entries are ordered: for each base color, its brightness variants from
/// dimmest (level 1) up to full brightness (level = levels), followed by one
/// reserved pure-black terminal entry. Length is always
/// `colors * levels + 1`. Entries are immutable once materialized.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<rgb::RGB<u8>>,
    colors: usize,
    levels: u32,
}

impl Palette {
    /// Expand winning centroids into their level variants plus the terminal
    /// black entry, rounding each to integer RGB.
    pub(crate) fn from_centroids(centroids: &[LinearRgb], levels: u32) -> Self {
        let mut entries = Vec::with_capacity(centroids.len() * levels as usize + 1);
        for centroid in centroids {
            for level in 1..=levels {
                entries.push(centroid.level_variant(level, levels).to_rgb8());
            }
        }
        entries.push(rgb::RGB { r: 0, g: 0, b: 0 });
        Self {
            entries,
            colors: centroids.len(),
            levels,
        }
    }

    /// All palette entries, in (base color, ascending level) order with the
    /// terminal black entry last.
    pub fn entries(&self) -> &[rgb::RGB<u8>] {
        &self.entries
    }

    /// Total entry count, `colors * levels + 1`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of base colors.
    pub fn colors(&self) -> usize {
        self.colors
    }

    /// Brightness levels per base color.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Index of the reserved terminal black entry.
    pub fn black_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Palette index of one base color at one brightness level.
    ///
    /// Level 0 is the "use black" sentinel and maps to the terminal entry;
    /// levels in [1, levels] map to that base color's variants in ascending
    /// brightness. Out-of-range requests are rejected rather than producing
    /// an out-of-range palette index.
    pub fn variant_index(&self, color: usize, level: u32) -> Result<usize, QuantizeError> {
        if color >= self.colors {
            return Err(QuantizeError::ColorOutOfRange {
                index: color,
                colors: self.colors,
            });
        }
        if level > self.levels {
            return Err(QuantizeError::LevelOutOfRange {
                level,
                levels: self.levels,
            });
        }
        if level == 0 {
            return Ok(self.black_index());
        }
        Ok(color * self.levels as usize + level as usize - 1)
    }
}
