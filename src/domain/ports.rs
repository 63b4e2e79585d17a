use super::result::{PaymentIntent, PaymentResult};
use async_trait::async_trait;
use std::io;

/// Registry of installed apps on the host platform.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn is_installed(&self, package: &str) -> io::Result<bool>;
}

/// Hands a payment intent to the OS. Returns once the hand-off is done, not when the
/// payment is.
pub trait PaymentLauncher: Send + Sync {
    fn launch(&self, intent: &PaymentIntent) -> io::Result<()>;
}

/// Observer notified with the classified result of a payment.
pub trait PaymentStatusListener: Send + Sync {
    fn on_payment_result(&self, result: &PaymentResult);
}

impl<F> PaymentStatusListener for F
where
    F: Fn(&PaymentResult) + Send + Sync,
{
    fn on_payment_result(&self, result: &PaymentResult) {
        self(result)
    }
}

pub type PackageRegistryBox = Box<dyn PackageRegistry>;
