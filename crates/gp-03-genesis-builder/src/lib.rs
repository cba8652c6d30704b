//! # Genesis Builder (gp-03)
//!
//! Folds an ordered set of staker records into the genesis document a
//! proof-of-stake node consumes as its consensus-critical initial state.
//!
//! ## Document Shape
//!
//! ```text
//! GenesisDocument
//! ├── networkID
//! ├── allocations[]          one per staker: ethAddr, luxAddr, initialAmount, unlockSchedule[]
//! ├── startTime
//! ├── initialStakeDuration / initialStakeDurationOffset
//! ├── initialStakedFunds[]   allocation addresses, de-duplicated
//! ├── initialStakers[]       one per staker: nodeID, rewardAddress, delegationFee, signer?
//! ├── cChainGenesis          execution-chain genesis, object or JSON string
//! └── message
//! ```
//!
//! ## Validation
//!
//! Every check runs before anything is written. A failed build leaves the
//! previous genesis file on disk untouched.
//!
//! | Check | Error |
//! |-------|-------|
//! | No records | `NoEligibleStakers` (missing input) |
//! | Record without identity | `Unresolved` |
//! | Two slots, same identity | `DuplicateIdentity` |
//! | Address does not parse or has the wrong HRP | `InvalidAddress` |
//! | Only one BLS field, or bad shape | `InvalidSigner` |
//! | Amount zero, bad fee, bad timestamp | `InvalidConfig` |
//! | Total supply exceeds `u64` | `SupplyOverflow` |

pub mod adapters;
pub mod domain;
pub mod service;

pub use adapters::writer::GenesisWriter;
pub use domain::config::{ExecutionEncoding, ExecutionGenesisConfig, GenesisConfig};
pub use domain::document::{
    Allocation, ExecutionPayload, GenesisDocument, InitialStaker, UnlockTranche,
};
pub use domain::errors::GenesisError;
pub use domain::execution::{ChainConfig, ExecutionGenesis};
pub use domain::network::NetworkPreset;
pub use domain::unlock::UnlockPolicy;
pub use service::{GenesisBuilder, SingleNodeInput};
