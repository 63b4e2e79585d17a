use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UPI apps a payment can be pinned to.
///
/// `All` is not an app: it leaves the choice of handler to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentApp {
    #[default]
    All,
    AmazonPay,
    BhimUpi,
    GooglePay,
    Paytm,
    PhonePe,
}

impl PaymentApp {
    pub const CONCRETE: [PaymentApp; 5] = [
        PaymentApp::AmazonPay,
        PaymentApp::BhimUpi,
        PaymentApp::GooglePay,
        PaymentApp::Paytm,
        PaymentApp::PhonePe,
    ];

    /// Android package id of the app, `None` for [`PaymentApp::All`].
    pub fn package_name(self) -> Option<&'static str> {
        match self {
            PaymentApp::All => None,
            PaymentApp::AmazonPay => Some("in.amazon.mShop.android.shopping"),
            PaymentApp::BhimUpi => Some("in.org.npci.upiapp"),
            PaymentApp::GooglePay => Some("com.google.android.apps.nbu.paisa.user"),
            PaymentApp::Paytm => Some("net.one97.paytm"),
            PaymentApp::PhonePe => Some("com.phonepe.app"),
        }
    }

    /// The concrete app owning `package`, if it is one of the known apps.
    pub fn from_package_name(package: &str) -> Option<Self> {
        PaymentApp::CONCRETE
            .into_iter()
            .find(|app| app.package_name() == Some(package))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentApp::All => "all",
            PaymentApp::AmazonPay => "amazon_pay",
            PaymentApp::BhimUpi => "bhim_upi",
            PaymentApp::GooglePay => "google_pay",
            PaymentApp::Paytm => "paytm",
            PaymentApp::PhonePe => "phone_pe",
        }
    }
}

impl fmt::Display for PaymentApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment app `{0}`")]
pub struct UnknownPaymentApp(pub String);

impl FromStr for PaymentApp {
    type Err = UnknownPaymentApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        std::iter::once(PaymentApp::All)
            .chain(PaymentApp::CONCRETE)
            .find(|app| app.as_str().replace('_', "") == normalized)
            .ok_or_else(|| UnknownPaymentApp(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_no_package() {
        assert_eq!(PaymentApp::All.package_name(), None);
        for app in PaymentApp::CONCRETE {
            assert!(app.package_name().is_some(), "{app} should map to a package");
        }
    }

    #[test]
    fn test_from_package_name() {
        assert_eq!(
            PaymentApp::from_package_name("com.phonepe.app"),
            Some(PaymentApp::PhonePe)
        );
        assert_eq!(PaymentApp::from_package_name(""), None);
        assert_eq!(PaymentApp::from_package_name("com.example.wallet"), None);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("PhonePe".parse(), Ok(PaymentApp::PhonePe));
        assert_eq!("phone-pe".parse(), Ok(PaymentApp::PhonePe));
        assert_eq!(" GOOGLE_PAY ".parse(), Ok(PaymentApp::GooglePay));
        assert_eq!("all".parse(), Ok(PaymentApp::All));
        assert_eq!(
            "cred".parse::<PaymentApp>(),
            Err(UnknownPaymentApp("cred".into()))
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&PaymentApp::BhimUpi).unwrap();
        assert_eq!(json, "\"bhim_upi\"");
        let app: PaymentApp = serde_json::from_str("\"amazon_pay\"").unwrap();
        assert_eq!(app, PaymentApp::AmazonPay);
    }
}
