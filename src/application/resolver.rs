use crate::domain::app::PaymentApp;
use crate::domain::ports::PackageRegistryBox;
use crate::error::{PaymentError, Result};
use tracing::warn;

/// Decides which app a payment may be routed to.
///
/// Registry failures are read as "not installed": a lookup that cannot answer must
/// never be mistaken for a crash.
pub struct AppResolver {
    registry: PackageRegistryBox,
}

impl AppResolver {
    pub fn new(registry: PackageRegistryBox) -> Self {
        Self { registry }
    }

    pub async fn is_installed(&self, package: &str) -> bool {
        match self.registry.is_installed(package).await {
            Ok(installed) => installed,
            Err(e) => {
                warn!(package, error = %e, "package lookup failed, treating as not installed");
                false
            }
        }
    }

    /// Returns `app` unchanged if it can be targeted, `PaymentApp::All` always resolves.
    pub async fn resolve_target(&self, app: PaymentApp) -> Result<PaymentApp> {
        match app.package_name() {
            None => Ok(PaymentApp::All),
            Some(package) if self.is_installed(package).await => Ok(app),
            Some(package) => Err(PaymentError::AppNotFound(package.to_string())),
        }
    }
}
