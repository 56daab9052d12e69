//! nodecfg Document
//!
//! Key-path addressable TOML tree used as the working form of a configuration
//! file while it is upgraded between schema versions.
//!
//! # Core Concepts
//!
//! - [`Document`]: owned TOML table with dotted-path get/set
//! - [`Lookup`]: three-way typed read (present / absent / wrong type)
//! - [`KeyPath`]: validated dotted path for user-supplied keys
//!
//! # Example
//!
//! ```
//! use nodecfg_document::{Document, Lookup};
//!
//! let mut doc: Document = "Version = \"1.0.4\"\n[Network]\nDNSPort = 9000".parse().unwrap();
//! if let Lookup::Present(port) = doc.lookup_int("Network.DNSPort") {
//!     doc.set("DNSSync.Port", port - 3000);
//! }
//! assert_eq!(doc.lookup_int("DNSSync.Port"), Lookup::Present(6000));
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod document;
mod error;
mod lookup;
mod path;

pub use document::{Document, VERSION_KEY};
pub use error::DocumentError;
pub use lookup::Lookup;
pub use path::{KeyPath, PathError};

/// Re-export of the underlying value types
pub use toml::{Table, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
