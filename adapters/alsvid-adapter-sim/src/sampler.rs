//! Thermal sampler for diagonal cost Hamiltonians.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use alsvid_convert::Hamiltonian;

use crate::error::{SamplerError, SamplerResult};

/// Raw result of a sampling run: packed bitstrings with shot counts.
///
/// This is the sampler's native format; [`SimTranspiler`] normalizes it
/// into the canonical bit-sample set.
///
/// [`SimTranspiler`]: crate::SimTranspiler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterResult {
    /// Shot counts keyed by the measured bitstring packed little-endian.
    pub counts: FxHashMap<u64, u64>,
    /// Width of the measured register.
    pub num_qubits: u32,
}

/// Samples basis states of a diagonal Hamiltonian from a Boltzmann
/// distribution over its eigenvalues.
///
/// The full spectrum is enumerated, so the qubit count is capped; this is
/// a testing and prototyping backend, not a production solver. Runs are
/// reproducible: the same seed and Hamiltonian give the same counts.
#[derive(Debug, Clone)]
pub struct DiagonalSampler {
    shots: u64,
    beta: f64,
    seed: u64,
    max_qubits: u32,
}

impl DiagonalSampler {
    /// Default inverse temperature. High enough that low-energy states
    /// dominate on unit-scale Hamiltonians.
    pub const DEFAULT_BETA: f64 = 5.0;

    /// Full enumeration beyond this width is refused.
    pub const MAX_QUBITS: u32 = 24;

    /// Create a sampler with the given shot count and a default
    /// temperature and seed.
    pub fn new(shots: u64) -> Self {
        Self {
            shots,
            beta: Self::DEFAULT_BETA,
            seed: 0,
            max_qubits: Self::MAX_QUBITS,
        }
    }

    /// Set the inverse temperature β.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw shots from `exp(-β·(E(state) - E_min))` over all basis states.
    #[instrument(skip(self, hamiltonian), fields(shots = self.shots))]
    pub fn sample(&self, hamiltonian: &Hamiltonian) -> SamplerResult<CounterResult> {
        if self.shots == 0 {
            return Err(SamplerError::NoShots);
        }
        let num_qubits = hamiltonian.num_qubits();
        if num_qubits > self.max_qubits {
            return Err(SamplerError::TooManyQubits {
                num_qubits,
                max: self.max_qubits,
            });
        }

        let n_states = 1u64 << num_qubits;
        let mut energies = Vec::with_capacity(n_states as usize);
        for state in 0..n_states {
            let bits: Vec<u8> = (0..num_qubits).map(|i| ((state >> i) & 1) as u8).collect();
            let e = hamiltonian
                .diagonal_energy(&bits)
                .ok_or(SamplerError::NonDiagonal)?;
            energies.push(e);
        }

        // Shift by the minimum so the largest weight is exactly 1.
        let e_min = energies.iter().copied().fold(f64::INFINITY, f64::min);
        let weights: Vec<f64> = energies
            .iter()
            .map(|&e| (-self.beta * (e - e_min)).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut counts: FxHashMap<u64, u64> = FxHashMap::default();
        for _ in 0..self.shots {
            let mut u = rng.gen_range(0.0..total);
            let mut drawn = n_states - 1;
            for (state, &w) in weights.iter().enumerate() {
                if u < w {
                    drawn = state as u64;
                    break;
                }
                u -= w;
            }
            *counts.entry(drawn).or_insert(0) += 1;
        }

        debug!(
            num_qubits,
            distinct = counts.len(),
            ground_energy = e_min,
            "sampled diagonal Hamiltonian"
        );
        Ok(CounterResult { counts, num_qubits })
    }
}
