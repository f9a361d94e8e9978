//! The encode/decode orchestrator.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use alsvid_hal::{BitsSampleSet, QuantumTranspiler};
use alsvid_ising::{IsingModel, IsingNormalize, qubo_to_ising};
use alsvid_model::{DecodedState, DetailParameters, ProblemInstance, RelaxMethod, SampleSet};

use crate::error::{ConvertError, ConvertResult};
use crate::operator::Hamiltonian;

/// Encode state of a [`Converter`].
///
/// The transition is one-way: once an Ising model has been cached the
/// converter stays `Encoded` for its lifetime. Build a fresh converter to
/// recompute with different construction parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum EncodeState {
    /// No Ising model has been cached yet.
    #[default]
    Unencoded,
    /// The cached Ising model.
    Encoded(IsingModel),
}

/// Contract for algorithm-specific converters.
///
/// Implementations must produce a Hamiltonian equivalent to the cached
/// Ising model over the same spin-index space, triggering the encode
/// themselves when none is cached yet.
pub trait CostHamiltonianProvider {
    /// Build the cost Hamiltonian for the underlying problem.
    fn cost_hamiltonian(&mut self) -> ConvertResult<Hamiltonian>;
}

/// Orchestrates encoding a [`ProblemInstance`] into an Ising model and
/// decoding backend measurement results back into evaluated sample sets.
///
/// The converter owns its cache exclusively: the Ising model and the
/// spin-index → variable-label registry are populated on the first
/// successful encode and only mutated by this instance's own encode calls.
#[derive(Debug, Clone)]
pub struct Converter {
    instance: ProblemInstance,
    relax_method: RelaxMethod,
    normalize_model: bool,
    normalize_ising: Option<String>,
    state: EncodeState,
    labels: FxHashMap<u32, String>,
}

impl Converter {
    /// Create a converter with default configuration: squared-penalty
    /// relaxation, no model normalization, no Ising normalization.
    pub fn new(instance: ProblemInstance) -> Self {
        Self {
            instance,
            relax_method: RelaxMethod::default(),
            normalize_model: false,
            normalize_ising: None,
            state: EncodeState::default(),
            labels: FxHashMap::default(),
        }
    }

    /// Set the relaxation method used for QUBO reduction.
    #[must_use]
    pub fn with_relax_method(mut self, relax_method: RelaxMethod) -> Self {
        self.relax_method = relax_method;
        self
    }

    /// Normalize the objective and each constraint by their own maximum
    /// absolute coefficient before combination.
    #[must_use]
    pub fn with_normalize_model(mut self, normalize_model: bool) -> Self {
        self.normalize_model = normalize_model;
        self
    }

    /// Set the Ising normalization mode (`"abs_max"` or `"rms"`).
    ///
    /// The mode string is validated at encode time; an unrecognized value
    /// makes the encode fail before any coefficient is computed.
    #[must_use]
    pub fn with_normalize_ising(mut self, mode: impl Into<String>) -> Self {
        self.normalize_ising = Some(mode.into());
        self
    }

    /// The wrapped problem instance.
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// The spin-index → variable-label registry.
    ///
    /// Empty until the first successful encode; rebuilt from scratch on
    /// every encode so it always matches the most recent index map.
    pub fn labels(&self) -> &FxHashMap<u32, String> {
        &self.labels
    }

    /// Reduce the instance to `(QuboCoefficients, constant)` under the
    /// configured relaxation method, without penalty multipliers.
    pub fn instance_to_qubo(
        &self,
    ) -> ConvertResult<(alsvid_ising::QuboCoefficients, f64)> {
        Ok(self
            .instance
            .to_qubo(self.relax_method, None, None, self.normalize_model)?)
    }

    /// The cached Ising model, encoding first if necessary.
    ///
    /// The first call runs reduction + transform with default multipliers
    /// and caches the result; later calls return the cache untouched.
    pub fn get_ising(&mut self) -> ConvertResult<&IsingModel> {
        if matches!(self.state, EncodeState::Unencoded) {
            let model = self.ising_encode(None, None)?;
            self.state = EncodeState::Encoded(model);
        }
        match &self.state {
            EncodeState::Encoded(model) => Ok(model),
            EncodeState::Unencoded => Err(ConvertError::NotEncoded),
        }
    }

    /// Encode the instance into an Ising model.
    ///
    /// Always recomputes; the cache used by [`get_ising`](Self::get_ising)
    /// is not touched. `multipliers` scale the penalties of named
    /// constraint families and `detail_parameters` override `(λ, μ)` for
    /// specific constraint entries.
    ///
    /// On success the label registry is replaced wholesale; on error
    /// neither the registry nor the cache is modified.
    pub fn ising_encode(
        &mut self,
        multipliers: Option<&FxHashMap<String, f64>>,
        detail_parameters: Option<&DetailParameters>,
    ) -> ConvertResult<IsingModel> {
        // Validate configuration before any coefficient work.
        let normalize = self
            .normalize_ising
            .as_deref()
            .map(str::parse::<IsingNormalize>)
            .transpose()?;

        let (qubo, constant) = self.instance.to_qubo(
            self.relax_method,
            multipliers,
            detail_parameters,
            self.normalize_model,
        )?;
        let mut ising = qubo_to_ising(&qubo, constant, false);
        if let Some(mode) = normalize {
            ising.normalize(mode);
        }

        // Build the label registry into a fresh map so a failure leaves
        // the previous registry intact.
        let variables: FxHashMap<u32, String> = self
            .instance
            .decision_variables()?
            .into_iter()
            .map(|v| (v.id, v.label()))
            .collect();
        let mut labels = FxHashMap::default();
        for (&spin, &qubo_index) in ising.index_map() {
            let label = variables
                .get(&qubo_index)
                .ok_or(ConvertError::UnknownVariable { index: qubo_index })?;
            labels.insert(spin, label.clone());
        }
        self.labels = labels;

        debug!(
            spins = ising.num_spins(),
            labels = self.labels.len(),
            "encoded instance to Ising model"
        );
        Ok(ising)
    }

    /// Decode a raw backend result into an evaluated sample set.
    ///
    /// The transpiler normalizes the SDK-native result into a
    /// [`BitsSampleSet`], which is then decoded against the cached Ising
    /// model (encoding first if necessary).
    pub fn decode<T: QuantumTranspiler>(
        &mut self,
        transpiler: &T,
        raw: &T::RawResult,
    ) -> ConvertResult<SampleSet> {
        let bits = transpiler.convert_result(raw)?;
        self.decode_bits_to_sampleset(&bits)
    }

    /// Decode a bit-sample set into an evaluated sample set.
    ///
    /// Every bit position is mapped through the cached index map back to
    /// its QUBO variable index; a missing entry is a fatal
    /// index-consistency error. Each distinct state receives one sample id
    /// per occurrence, strictly increasing from 0 within this call.
    pub fn decode_bits_to_sampleset(
        &mut self,
        bitssampleset: &BitsSampleSet,
    ) -> ConvertResult<SampleSet> {
        self.get_ising()?;
        let EncodeState::Encoded(ising) = &self.state else {
            return Err(ConvertError::NotEncoded);
        };

        let mut next_id: u64 = 0;
        let mut entries = Vec::with_capacity(bitssampleset.len());
        for sample in bitssampleset.iter() {
            let mut state = DecodedState::new();
            for (position, &bit) in sample.bits.iter().enumerate() {
                let spin = position as u32;
                let index = ising
                    .ising_to_qubo_index(spin)
                    .ok_or(ConvertError::IndexMapMissing { spin })?;
                state.set(index, bit);
            }
            let ids: Vec<u64> = (next_id..next_id + sample.num_occurrences).collect();
            next_id += sample.num_occurrences;
            entries.push((state, ids));
        }

        debug!(
            states = entries.len(),
            shots = next_id,
            "decoded bit samples"
        );
        Ok(self.instance.evaluate_samples(entries)?)
    }
}
