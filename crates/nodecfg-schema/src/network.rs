//! Deployment network types

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Network a node is configured for
///
/// Parsing never fails: unknown names are kept as [`NetworkType::Custom`]
/// and receive the generic defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkType {
    /// Production network
    Mainnet,
    /// Public test network
    Testnet,
    /// Open staking network
    Pangaea,
    /// Partner integration network
    Partner,
    /// Load test network
    Stressnet,
    /// Developer network
    Devnet,
    /// Single-machine network
    Localnet,
    /// Any other name
    Custom(String),
}

impl NetworkType {
    /// Canonical name as written in configuration files
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Pangaea => "pangaea",
            Self::Partner => "partner",
            Self::Stressnet => "stressnet",
            Self::Devnet => "devnet",
            Self::Localnet => "localnet",
            Self::Custom(name) => name,
        }
    }

    /// Parse a configured name, resolving aliases
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "mainnet" => Self::Mainnet,
            "testnet" => Self::Testnet,
            "pangaea" | "staking" | "stk" => Self::Pangaea,
            "partner" => Self::Partner,
            "stressnet" | "stress" | "stn" => Self::Stressnet,
            "devnet" | "dev" => Self::Devnet,
            "localnet" => Self::Localnet,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl FromStr for NetworkType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
