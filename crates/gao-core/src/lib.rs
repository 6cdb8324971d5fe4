//! # gao-core: GPU allocation data model
//!
//! Provides the fundamental, immutable value types that describe one GPU
//! allocation optimization call: the variant catalog, demand, supply, cost,
//! and flags that make up an [`OptimizationInput`], and the
//! [`AllocationResult`] produced by solving it.
//!
//! ## Design Philosophy
//!
//! Every entity here is read-only for the duration of a single call — there
//! is no mutation, no caching, and no state carried between calls. The only
//! behavior this crate owns beyond plain data is [`validate::validate`],
//! which rejects malformed input before the optimizer ever tries to encode
//! it (see `gao_algo` for the encoder itself).
//!
//! ## Quick Start
//!
//! ```
//! use gao_core::{OptimizationInput, Variant};
//! use std::collections::HashMap;
//!
//! let mut variants = HashMap::new();
//! variants.insert(
//!     "flan".to_string(),
//!     HashMap::from([(
//!         "flan-a100".to_string(),
//!         Variant {
//!             variant_id: "flan-a100".into(),
//!             accelerator_type: "A100".into(),
//!             accelerator_count: 6.0,
//!             max_service_rate: 15.0,
//!             role: "inference".into(),
//!             slo_class: "standard".into(),
//!             max_concurrency: 4.0,
//!         },
//!     )]),
//! );
//!
//! let input = OptimizationInput {
//!     variants,
//!     ..Default::default()
//! };
//! assert!(gao_core::validate::validate(&input).is_ok());
//! ```

pub mod error;
pub mod validate;

pub use error::{GaoError, GaoResult};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Composite key identifying a single (model, variant) pair.
///
/// Used wherever the source system keys a dictionary by a `(model_id,
/// variant_id)` tuple — replica bounds, the current layout, and the
/// decision-variable maps in `gao_algo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub model_id: String,
    pub variant_id: String,
}

impl VariantKey {
    pub fn new(model_id: impl Into<String>, variant_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            variant_id: variant_id.into(),
        }
    }
}

/// A candidate deployment of a model on a specific accelerator type.
///
/// `role`, `slo_class`, and `max_concurrency` are carried through to callers
/// but are not read by the optimizer itself; they are descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub variant_id: String,
    pub accelerator_type: String,
    /// Accelerator units consumed per replica of this variant.
    pub accelerator_count: f64,
    /// Sustainable requests/sec one replica of this variant can serve.
    pub max_service_rate: f64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub slo_class: String,
    #[serde(default)]
    pub max_concurrency: f64,
}

/// `model_id -> variant_id -> Variant`.
pub type ModelCatalog = HashMap<String, HashMap<String, Variant>>;

/// `model_id -> required aggregate service rate`.
pub type Demand = HashMap<String, f64>;

/// `accelerator_type -> available unit count`.
pub type Supply = HashMap<String, u32>;

/// `accelerator_type -> unit cost`.
pub type Cost = HashMap<String, f64>;

/// `model_id -> variant_id -> replica count`, used for both the current
/// layout and the min/max replica bound maps.
pub type ReplicaMap = HashMap<String, HashMap<String, u32>>;

/// The full, validated input bundle for one `optimize` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationInput {
    pub variants: ModelCatalog,
    pub demand: Demand,
    pub supply: Supply,
    pub cost: Cost,
    pub scale_to_zero: HashSet<String>,
    pub current_layout: Option<ReplicaMap>,
    pub change_penalty: f64,
    pub homogeneous: bool,
    pub max_replicas: ReplicaMap,
    pub min_replicas: ReplicaMap,
}

impl OptimizationInput {
    /// Replica count currently deployed for `(model_id, variant_id)`, or 0.
    pub fn current_replicas(&self, model_id: &str, variant_id: &str) -> u32 {
        self.current_layout
            .as_ref()
            .and_then(|layout| layout.get(model_id))
            .and_then(|setups| setups.get(variant_id))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `model_id` has any replicas in the current layout.
    pub fn is_currently_deployed(&self, model_id: &str) -> bool {
        self.current_layout
            .as_ref()
            .and_then(|layout| layout.get(model_id))
            .map(|setups| setups.values().sum::<u32>() > 0)
            .unwrap_or(false)
    }
}

/// One line of `models_data[model].requiredInstances`: how many replicas of
/// a variant the plan assigns, alongside its static accelerator attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceAllocation {
    pub instance_num: u32,
    pub accelerator_type: String,
    pub accelerator_count: f64,
}

/// The replica assignment for every variant of one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAllocation {
    #[serde(rename = "requiredInstances")]
    pub required_instances: HashMap<String, InstanceAllocation>,
}

/// The output of one `optimize` call.
///
/// All fields are always present — a no-solution outcome is an
/// [`AllocationResult::empty`] record, not an absent one. The diagnostic
/// lists are reserved for a future validation layer; the core always
/// produces them empty (see `gao_algo`'s result assembler).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub gpu_after_allocation: HashMap<String, u32>,
    pub models_data: HashMap<String, ModelAllocation>,
    pub impossible_models: Vec<String>,
    pub strange_models: Vec<String>,
    pub missing_models: Vec<String>,
    pub impossible_instances: HashMap<String, Vec<String>>,
}

impl AllocationResult {
    /// The structurally valid "no feasible plan" record (§4.4).
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` if this is the empty/no-solution record.
    pub fn is_empty(&self) -> bool {
        self.gpu_after_allocation.is_empty() && self.models_data.is_empty()
    }
}
