//! # llc_core - LLC Resonant Converter Design Engine
//!
//! `llc_core` turns a small set of electrical requirements into the design
//! parameters of an LLC resonant DC-DC converter: transformer turns ratio,
//! reflected load resistance, multi-core current distribution, and the
//! switching-frequency range the tank must cover.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the violated constraint
//! - **Bounded**: Every calculation is closed-form or a fixed-iteration search
//!
//! ## Quick Start
//!
//! ```rust
//! use llc_core::calculations::battery::{calculate_all_parameters, ElectricalRequirement};
//!
//! let requirement = ElectricalRequirement {
//!     input_voltage_nom_v: 400.0,
//!     input_voltage_min_v: 350.0,
//!     input_voltage_max_v: 450.0,
//!     output_voltage_v: 48.0,
//!     output_power_w: 100.0,
//!     efficiency_percent: 95.0,
//! };
//!
//! let params = calculate_all_parameters(&requirement).unwrap();
//! let json = serde_json::to_string_pretty(&params).unwrap();
//! assert!(json.contains("turns_ratio"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Battery, parallel transformer and frequency range calculators
//! - [`equations`] - Closed-form formulas and the gain-equation solver
//! - [`pipeline`] - All calculators chained for one design point
//! - [`settings`] - Design constants
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod pipeline;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use pipeline::{design, LlcDesignInput, LlcDesignResult, TankParameters};
pub use settings::DesignSettings;
