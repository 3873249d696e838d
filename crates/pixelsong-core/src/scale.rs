//! Scale templates and the immutable pool of transposed scales.
//!
//! A pool is built once from the interval templates and a caller-supplied
//! generator, then shared read-only between sonification calls.

use rand::Rng;
use serde::Serialize;

use crate::error::{SonifyError, SonifyResult};
use crate::rng::{create_rng, derive_component_seed};

/// Number of scales in a default pool.
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Largest transposition offset in semitones (inclusive).
pub const MAX_TRANSPOSITION: u32 = 11;

/// A named pattern of semitone offsets, before transposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleTemplate {
    /// Human-readable scale name.
    pub name: &'static str,
    /// Ascending semitone offsets from the root.
    pub intervals: &'static [u32],
}

impl ScaleTemplate {
    /// Creates a template.
    pub const fn new(name: &'static str, intervals: &'static [u32]) -> Self {
        Self { name, intervals }
    }

    /// Number of degrees in the template.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if the template has no degrees.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Applies a transposition, producing a concrete scale.
    pub fn transpose(&self, offset: u32) -> Scale {
        Scale {
            template: self.name,
            offset,
            semitones: self.intervals.iter().map(|&i| i + offset).collect(),
        }
    }
}

/// The six built-in templates.
pub const BUILTIN_TEMPLATES: [ScaleTemplate; 6] = [
    ScaleTemplate::new("major pentatonic", &[0, 2, 4, 7, 9]),
    ScaleTemplate::new("minor pentatonic", &[0, 3, 5, 7, 10]),
    ScaleTemplate::new("natural minor", &[0, 2, 3, 5, 7, 8, 10]),
    ScaleTemplate::new("major", &[0, 2, 4, 5, 7, 9, 11]),
    ScaleTemplate::new("blues", &[0, 3, 5, 6, 7, 10]),
    ScaleTemplate::new("simplified blues", &[0, 3, 5, 7, 10]),
];

/// A template transposed by a fixed offset.
///
/// Semitone values are not reduced modulo 12, so a transposed scale may reach
/// past the octave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scale {
    /// Name of the template this scale came from.
    pub template: &'static str,
    /// Transposition in semitones, in `0..=MAX_TRANSPOSITION`.
    pub offset: u32,
    /// Transposed semitone values in template order.
    pub semitones: Vec<u32>,
}

impl Scale {
    /// Number of degrees in the scale.
    pub fn len(&self) -> usize {
        self.semitones.len()
    }

    /// Returns true if the scale has no degrees.
    pub fn is_empty(&self) -> bool {
        self.semitones.is_empty()
    }
}

/// Fixed collection of scales, never mutated after construction.
#[derive(Debug, Clone)]
pub struct ScalePool {
    scales: Vec<Scale>,
}

impl ScalePool {
    /// Builds a pool of `pool_size` scales.
    ///
    /// For every entry one template is picked uniformly, then one offset in
    /// `0..=11`. The result depends only on the generator stream.
    pub fn build<R: Rng + ?Sized>(
        templates: &[ScaleTemplate],
        pool_size: usize,
        rng: &mut R,
    ) -> SonifyResult<Self> {
        if templates.is_empty() {
            return Err(SonifyError::configuration("no scale templates supplied"));
        }
        if let Some(empty) = templates.iter().find(|t| t.is_empty()) {
            return Err(SonifyError::configuration(format!(
                "scale template '{}' has no intervals",
                empty.name
            )));
        }
        if pool_size == 0 {
            return Err(SonifyError::configuration("scale pool size must be positive"));
        }

        let scales = (0..pool_size)
            .map(|_| {
                let template = &templates[rng.gen_range(0..templates.len())];
                let offset = rng.gen_range(0..=MAX_TRANSPOSITION);
                template.transpose(offset)
            })
            .collect();

        Ok(Self { scales })
    }

    /// Builds a pool from the built-in templates using a seed-derived stream.
    pub fn from_seed(seed: u32, pool_size: usize) -> SonifyResult<Self> {
        let mut rng = create_rng(derive_component_seed(seed, "scale-pool"));
        Self::build(&BUILTIN_TEMPLATES, pool_size, &mut rng)
    }

    /// Picks one scale uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Scale {
        &self.scales[rng.gen_range(0..self.scales.len())]
    }

    /// Returns the scale at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Scale> {
        self.scales.get(index)
    }

    /// Number of scales in the pool.
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Always false for a successfully built pool.
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Iterates over the scales in construction order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scale> {
        self.scales.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use rand::rngs::mock::StepRng;

    fn template_named(name: &str) -> &'static ScaleTemplate {
        BUILTIN_TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .expect("built-in template")
    }

    #[test]
    fn test_builtin_templates() {
        assert_eq!(BUILTIN_TEMPLATES.len(), 6);
        assert_eq!(template_named("major").intervals, &[0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(template_named("blues").len(), 6);
        assert!(BUILTIN_TEMPLATES.iter().all(|t| t.intervals[0] == 0));
    }

    #[test]
    fn test_transpose_does_not_wrap() {
        let scale = template_named("major").transpose(11);
        assert_eq!(scale.semitones, vec![11, 13, 15, 16, 18, 20, 22]);
        assert_eq!(scale.offset, 11);
    }

    #[test]
    fn test_pool_has_requested_size() {
        let pool = ScalePool::build(&BUILTIN_TEMPLATES, 100, &mut create_rng(1)).unwrap();
        assert_eq!(pool.len(), 100);
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_pool_entries_match_their_template() {
        let pool = ScalePool::build(&BUILTIN_TEMPLATES, 250, &mut create_rng(9)).unwrap();
        for scale in pool.iter() {
            assert!(scale.offset <= MAX_TRANSPOSITION);
            let template = template_named(scale.template);
            assert_eq!(scale.len(), template.len());
            for (semi, interval) in scale.semitones.iter().zip(template.intervals) {
                assert_eq!(*semi, interval + scale.offset);
            }
        }
    }

    #[test]
    fn test_pool_is_deterministic_for_seed() {
        let a = ScalePool::from_seed(42, DEFAULT_POOL_SIZE).unwrap();
        let b = ScalePool::from_seed(42, DEFAULT_POOL_SIZE).unwrap();
        let a: Vec<_> = a.iter().cloned().collect();
        let b: Vec<_> = b.iter().cloned().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_stream_picks_first_template_untransposed() {
        let mut rng = StepRng::new(0, 0);
        let pool = ScalePool::build(&BUILTIN_TEMPLATES, 3, &mut rng).unwrap();
        for scale in pool.iter() {
            assert_eq!(scale.template, "major pentatonic");
            assert_eq!(scale.semitones, vec![0, 2, 4, 7, 9]);
        }
        assert_eq!(pool.choose(&mut rng), pool.get(0).unwrap());
    }

    #[test]
    fn test_offsets_cover_full_range() {
        let pool = ScalePool::build(&BUILTIN_TEMPLATES, 2000, &mut create_rng(3)).unwrap();
        let mut seen = [false; 12];
        for scale in pool.iter() {
            seen[scale.offset as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_empty_templates_rejected() {
        let err = ScalePool::build(&[], 10, &mut create_rng(0)).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_template_without_intervals_rejected() {
        let templates = [ScaleTemplate::new("silent", &[])];
        let err = ScalePool::build(&templates, 10, &mut create_rng(0)).unwrap_err();
        assert!(err.to_string().contains("silent"));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let err = ScalePool::build(&BUILTIN_TEMPLATES, 0, &mut create_rng(0)).unwrap_err();
        assert!(matches!(err, SonifyError::Configuration { .. }));
    }
}
