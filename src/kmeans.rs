use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use crate::color::LinearRgb;
use crate::histogram::ColorPoint;

/// Weighted multi-level k-means over a deduplicated point set.
///
/// Assignment is joint over (centroid, level): a point may be served by a
/// dimmed rendition of a base color, and the update stage rescales such
/// points back to full brightness before averaging. Centroids are only ever
/// mutated between assignment passes, so every pass reads a frozen snapshot.
pub(crate) struct Clustering {
    points: Vec<ColorPoint>,
    centroids: Vec<LinearRgb>,
    colors: usize,
    levels: u32,
    max_steps: u32,
    /// Fixed chunk length for the worker partition, one chunk per worker.
    chunk_len: usize,
}

/// Result of the best-of-N restart loop.
pub(crate) struct RunOutcome {
    /// Centroids of the winning attempt.
    pub centroids: Vec<LinearRgb>,
    /// Reconstruction error of every attempt, in attempt order.
    pub attempt_errors: Vec<f64>,
    /// 1-based index of the winning attempt.
    pub best_attempt: usize,
}

impl Clustering {
    /// `colors` must already be clamped to the distinct-color count.
    pub(crate) fn new(points: Vec<ColorPoint>, colors: usize, levels: u32, max_steps: u32) -> Self {
        let workers = rayon::current_num_threads().max(1);
        let chunk_len = points.len().div_ceil(workers);
        Self {
            points,
            centroids: Vec::new(),
            colors,
            levels,
            max_steps,
            chunk_len,
        }
    }

    /// k-means++ seeding: weighted random draws, each proportional to the
    /// squared distance to the nearest already-chosen centroid.
    ///
    /// Chosen points are swapped into the leading slots; the cached
    /// nearest-seen distances persist across attempts and only shrink.
    fn seed_centroids(&mut self, rng: &mut StdRng) {
        let n = self.points.len();
        self.points.swap(0, rng.gen_range(0..n));

        for slot in 1..self.colors {
            let latest = self.points[slot - 1].color;
            let mut sum = 0.0f64;
            for point in &mut self.points[slot..] {
                let d = f64::from(point.color.distance_sq(latest));
                if d < point.seed_dist {
                    point.seed_dist = d;
                }
                sum += point.seed_dist;
            }

            let threshold = rng.gen::<f64>() * sum;
            let mut cumulative = 0.0f64;
            // Rounding can push the threshold past every prefix; the last
            // remaining point is the fallback.
            let mut next = n - 1;
            for (i, point) in self.points.iter().enumerate().skip(slot) {
                cumulative += point.seed_dist;
                if cumulative > threshold {
                    next = i;
                    break;
                }
            }
            self.points.swap(slot, next);
        }

        self.centroids = self.points[..self.colors].iter().map(|p| p.color).collect();
    }

    /// One assignment pass: every point gets the (centroid, level) pair with
    /// the smallest squared distance to its true color.
    ///
    /// Ties resolve to the current assignment, then to the first pair in
    /// centroid-outer, level-inner ascending order. Returns how many points
    /// changed assignment; each worker counts its own chunk and the counts
    /// are summed after the join.
    fn assign(&mut self) -> u64 {
        let levels = self.levels;
        let chunk_len = self.chunk_len;
        let centroids = &self.centroids;
        self.points
            .par_chunks_mut(chunk_len)
            .map(|chunk| {
                let mut changed = 0u64;
                for point in chunk.iter_mut() {
                    let mut best_seg = point.segment;
                    let mut best_level = point.level;
                    let mut best_dist = point.color.distance_sq(
                        centroids[point.segment as usize].level_variant(point.level, levels),
                    );
                    for (seg, centroid) in centroids.iter().enumerate() {
                        for level in 1..=levels {
                            let dist =
                                point.color.distance_sq(centroid.level_variant(level, levels));
                            if dist < best_dist {
                                best_dist = dist;
                                best_seg = seg as u32;
                                best_level = level;
                            }
                        }
                    }
                    if best_seg != point.segment || best_level != point.level {
                        point.segment = best_seg;
                        point.level = best_level;
                        changed += 1;
                    }
                }
                changed
            })
            .sum()
    }

    /// Recompute each centroid as the weighted mean of its assigned points,
    /// rescaling every contribution back to full brightness first. Segments
    /// with no assigned weight keep their previous centroid. Returns the
    /// total centroid movement, for progress reporting only.
    fn update(&mut self) -> f64 {
        let mut sums = vec![[0.0f64; 3]; self.colors];
        let mut weights = vec![0u64; self.colors];
        for point in &self.points {
            let seg = point.segment as usize;
            let k = f64::from(self.levels) / f64::from(point.level) * point.count as f64;
            sums[seg][0] += f64::from(point.color.r) * k;
            sums[seg][1] += f64::from(point.color.g) * k;
            sums[seg][2] += f64::from(point.color.b) * k;
            weights[seg] += point.count;
        }

        let mut movement = 0.0f64;
        for (seg, centroid) in self.centroids.iter_mut().enumerate() {
            if weights[seg] == 0 {
                continue;
            }
            let w = weights[seg] as f64;
            let new = LinearRgb::new(
                (sums[seg][0] / w) as f32,
                (sums[seg][1] / w) as f32,
                (sums[seg][2] / w) as f32,
            );
            movement += f64::from(new.distance_sq(*centroid)).sqrt();
            *centroid = new;
        }
        movement
    }

    /// Exact weighted reconstruction error of the current assignment:
    /// occurrence count times true (square-rooted) distance from each point
    /// to its assigned level variant.
    fn score(&self) -> f64 {
        self.points
            .iter()
            .map(|p| {
                let variant =
                    self.centroids[p.segment as usize].level_variant(p.level, self.levels);
                f64::from(p.color.distance_sq(variant)).sqrt() * p.count as f64
            })
            .sum()
    }

    /// Run `attempts` independent seed-and-converge attempts, keeping the
    /// centroids of the lowest-error one.
    ///
    /// Each attempt alternates assignment and update until an assignment
    /// pass changes nothing or the step budget runs out, then does one final
    /// assignment so the score reflects the latest centroids.
    pub(crate) fn run(mut self, attempts: u32, rng: &mut StdRng) -> RunOutcome {
        let mut attempt_errors = Vec::with_capacity(attempts as usize);
        let mut best_centroids = Vec::new();
        let mut best_attempt = 0usize;
        let mut best_error = f64::INFINITY;

        for attempt in 1..=attempts {
            self.seed_centroids(rng);
            for step in 1..=self.max_steps {
                let changed = self.assign();
                if changed == 0 {
                    debug!("attempt {attempt}: fixed point after {step} steps");
                    break;
                }
                let movement = self.update();
                debug!(
                    "attempt {attempt} step {step}/{}: moved {movement:.6}, changed {changed}",
                    self.max_steps
                );
            }
            self.assign();

            let error = self.score();
            info!("attempt {attempt}/{attempts}: reconstruction error {error:.6}");
            if attempt == 1 || error < best_error {
                best_attempt = attempt as usize;
                best_error = error;
                best_centroids = self.centroids.clone();
            }
            attempt_errors.push(error);
        }

        info!("best attempt: {best_attempt} (error {best_error:.6})");
        RunOutcome {
            centroids: best_centroids,
            attempt_errors,
            best_attempt,
        }
    }
}
