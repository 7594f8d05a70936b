//! Node directory credential loading
//!
//! A node directory holds the web API base URL in `node.url` and the API
//! token in `private/api_auth_token`. Both files are read fresh on every
//! invocation and trimmed of surrounding whitespace.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::client::{ApiToken, StatusConfig};
use crate::constants::{env as env_constants, node};
use crate::errors::{NodeError, NodeResult};

/// Connection details read from a node directory
#[derive(Debug, Clone)]
pub struct NodeCredentials {
    /// Directory the details were read from
    pub node_directory: PathBuf,
    /// Contents of `node.url`
    pub node_url: String,
    /// Contents of `private/api_auth_token`
    pub token: ApiToken,
}

impl NodeCredentials {
    /// Build a status configuration pointing at this node
    pub fn into_status_config(self) -> StatusConfig {
        StatusConfig::new(self.node_url).with_credentials(self.token)
    }
}

/// Resolve the node directory to use
///
/// Precedence: explicit path, then the `NODE_STATUS_DIR` environment
/// variable, then `~/.tahoe`.
pub fn resolve_node_directory(explicit: Option<&Path>) -> NodeResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(env_constants::NODE_DIRECTORY) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path.trim()));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(node::DEFAULT_DIR_NAME))
        .ok_or_else(|| NodeError::NoNodeDirectory {
            var: env_constants::NODE_DIRECTORY.to_string(),
        })
}

/// Read `node.url` and the API token from a node directory
///
/// # Errors
///
/// Returns `NodeError` if the directory is missing or either file is
/// unreadable or empty
pub fn load_node_credentials(node_directory: &Path) -> NodeResult<NodeCredentials> {
    if !node_directory.is_dir() {
        return Err(NodeError::DirectoryNotFound {
            path: node_directory.to_path_buf(),
        });
    }

    let node_url = read_trimmed(&node_directory.join(node::URL_FILE))?;
    let token = read_trimmed(
        &node_directory
            .join(node::PRIVATE_DIR)
            .join(node::API_TOKEN_FILE),
    )?;

    tracing::debug!(
        "Loaded node URL {} from {}",
        node_url,
        node_directory.display()
    );

    Ok(NodeCredentials {
        node_directory: node_directory.to_path_buf(),
        node_url,
        token: ApiToken::new(token),
    })
}

fn read_trimmed(path: &Path) -> NodeResult<String> {
    let content = fs::read_to_string(path).map_err(|source| NodeError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(NodeError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn node_dir(url: &str, token: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("private")).unwrap();
        fs::write(dir.path().join("private").join("api_auth_token"), token).unwrap();
        fs::write(dir.path().join("node.url"), url).unwrap();
        dir
    }

    #[test]
    fn test_load_credentials() {
        let dir = node_dir("localhost:9000\n", &"a".repeat(32));
        let credentials = load_node_credentials(dir.path()).unwrap();

        assert_eq!(credentials.node_url, "localhost:9000");
        assert_eq!(credentials.token.expose(), "a".repeat(32));

        let config = credentials.into_status_config();
        assert_eq!(config.node_url, "http://localhost:9000");
        assert!(config.credentials.is_some());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_node_credentials(&missing),
            Err(NodeError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_token() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("node.url"), "http://127.0.0.1:3456/").unwrap();
        assert!(matches!(
            load_node_credentials(dir.path()),
            Err(NodeError::FileUnreadable { .. })
        ));
    }

    #[test]
    fn test_empty_url_file() {
        let dir = node_dir("  \n", "token");
        assert!(matches!(
            load_node_credentials(dir.path()),
            Err(NodeError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_explicit_directory_wins() {
        let explicit = PathBuf::from("/tmp/some-node");
        assert_eq!(
            resolve_node_directory(Some(&explicit)).unwrap(),
            explicit
        );
    }
}
