//! Builtin migration steps, one module per source version

mod v2_upgrade;

pub use v2_upgrade::{V2UpgradeStep, V2_VERSION};
