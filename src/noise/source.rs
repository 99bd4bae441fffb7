//! Seeded 3D noise primitive.

use std::fmt;

use glam::Vec3;
use ::noise::{NoiseFn, Simplex};
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_seeder::Seeder;
use serde::{Deserialize, Serialize};

/// A continuous, deterministic 3D noise function with output in [-1, 1].
pub trait NoiseSource {
    /// Samples the noise field at `p`.
    fn sample(&self, p: Vec3) -> f32;
}

/// Planet seed, given either as a number or as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

/// Length of the text seeds drawn by [`Seed::random`].
pub const RANDOM_SEED_LEN: usize = 10;

impl Seed {
    /// Draws a fresh alphanumeric text seed from the thread RNG.
    pub fn random() -> Self {
        let text: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SEED_LEN)
            .map(char::from)
            .collect();
        Seed::Text(text)
    }

    /// Resolves the seed to the primitive's 32-bit seed.
    ///
    /// Both forms go through a ChaCha8 stream so that nearby numeric seeds
    /// still produce unrelated noise fields.
    pub fn to_noise_seed(&self) -> u32 {
        let mut rng: ChaCha8Rng = match self {
            Seed::Number(n) => ChaCha8Rng::seed_from_u64(*n),
            Seed::Text(s) => Seeder::from(s.as_str()).make_rng(),
        };
        rng.gen::<u32>()
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{}", n),
            Seed::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// 3D simplex noise from the `noise` crate.
#[derive(Clone)]
pub struct SimplexSource {
    simplex: Simplex,
}

impl SimplexSource {
    pub fn new(seed: &Seed) -> Self {
        Self {
            simplex: Simplex::new(seed.to_noise_seed()),
        }
    }
}

impl NoiseSource for SimplexSource {
    fn sample(&self, p: Vec3) -> f32 {
        let v = self.simplex.get([p.x as f64, p.y as f64, p.z as f64]);
        (v as f32).clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for SimplexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexSource").finish_non_exhaustive()
    }
}

/// Returns the same value everywhere. Used to pin noise output in tests.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f32);

impl NoiseSource for ConstantSource {
    fn sample(&self, _p: Vec3) -> f32 {
        self.0
    }
}
