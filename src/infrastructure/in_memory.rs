use crate::domain::ports::PackageRegistry;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory registry of installed package ids.
///
/// Stands in for the platform package manager in tests and in the CLI, where the set
/// of installed apps is supplied up front.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPackageRegistry {
    packages: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryPackageRegistry {
    /// Creates an empty registry: every lookup answers "not installed".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: Arc::new(RwLock::new(packages.into_iter().map(Into::into).collect())),
        }
    }

    /// Loads a JSON array of package ids, e.g. `["com.phonepe.app"]`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let packages: Vec<String> = serde_json::from_str(&content)?;
        Ok(Self::from_packages(packages))
    }

    pub async fn install(&self, package: impl Into<String>) {
        self.packages.write().await.insert(package.into());
    }

    pub async fn uninstall(&self, package: &str) {
        self.packages.write().await.remove(package);
    }
}

#[async_trait]
impl PackageRegistry for InMemoryPackageRegistry {
    async fn is_installed(&self, package: &str) -> io::Result<bool> {
        Ok(self.packages.read().await.contains(package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_install_and_uninstall() {
        let registry = InMemoryPackageRegistry::new();
        assert!(!registry.is_installed("net.one97.paytm").await.unwrap());

        registry.install("net.one97.paytm").await;
        assert!(registry.is_installed("net.one97.paytm").await.unwrap());

        registry.uninstall("net.one97.paytm").await;
        assert!(!registry.is_installed("net.one97.paytm").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let registry = InMemoryPackageRegistry::new();
        let clone = registry.clone();
        registry.install("com.phonepe.app").await;
        assert!(clone.is_installed("com.phonepe.app").await.unwrap());
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"["in.org.npci.upiapp", "com.phonepe.app"]"#).unwrap();

        let registry = InMemoryPackageRegistry::from_json_file(file.path()).unwrap();
        assert!(registry.is_installed("in.org.npci.upiapp").await.unwrap());
        assert!(!registry.is_installed("net.one97.paytm").await.unwrap());
    }

    #[test]
    fn test_from_json_file_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"packages": []}}"#).unwrap();
        assert!(InMemoryPackageRegistry::from_json_file(file.path()).is_err());
    }
}
