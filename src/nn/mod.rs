//! Agent-facing interfaces.
//!
//! ## Overview
//!
//! - **Encoding**: `ObservationEncoder` trait and the normalized `FlatEncoder`
//! - **Policies**: `Policy` trait and the `MaskedRandomPolicy` baseline
//!
//! ## Usage
//!
//! ```
//! use yamb_env::core::EnvConfig;
//! use yamb_env::env::YambEnv;
//! use yamb_env::nn::{FlatEncoder, MaskedRandomPolicy, ObservationEncoder, Policy};
//!
//! let mut env = YambEnv::new(EnvConfig::new().with_seed(1));
//! let obs = env.reset(None);
//!
//! let features = FlatEncoder::new().encode(&obs);
//! assert_eq!(features.len(), FlatEncoder::FEATURES);
//!
//! let mut policy = MaskedRandomPolicy::new(1);
//! let action = policy.act(&obs, &env.legal_action_mask());
//! assert!(!env.step(&action).truncated);
//! ```

pub mod encoder;
pub mod policy;
pub mod traits;

pub use encoder::{FlatEncoder, ObservationEncoder, MAX_CELL_VALUE};
pub use policy::MaskedRandomPolicy;
pub use traits::{EncodedState, Policy};
