//! Node directory access
//!
//! Locates the node directory and reads the node's web API URL and API token
//! from it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use node_status::auth::{load_node_credentials, resolve_node_directory};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = resolve_node_directory(None)?;
//! let credentials = load_node_credentials(&dir)?;
//! println!("Node at {}", credentials.node_url);
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{load_node_credentials, resolve_node_directory, NodeCredentials};
