use super::app::PaymentApp;
use crate::error::{Field, PaymentError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// The only currency the UPI deep-link grammar accepts.
pub const CURRENCY: &str = "INR";

// ASCII digits only: `\d` would also accept other Unicode digit classes.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]*$").expect("amount pattern compiles"));

pub(crate) fn validate_vpa(vpa: &str) -> Result<()> {
    if vpa.contains('@') {
        Ok(())
    } else {
        Err(PaymentError::InvalidField {
            field: Field::PayeeVpa,
            reason: "payee VPA address should be valid (e.g. example@vpa)",
        })
    }
}

pub(crate) fn validate_not_blank(field: Field, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PaymentError::InvalidField {
            field,
            reason: "must not be blank",
        })
    } else {
        Ok(())
    }
}

pub(crate) fn validate_amount(amount: &str) -> Result<()> {
    if AMOUNT_PATTERN.is_match(amount) {
        Ok(())
    } else {
        Err(PaymentError::InvalidField {
            field: Field::Amount,
            reason: "amount should be a positive number in decimal format XX.XX (e.g. 100.00)",
        })
    }
}

pub(crate) fn validate_target_package(package: &str) -> Result<PaymentApp> {
    PaymentApp::from_package_name(package).ok_or(PaymentError::InvalidField {
        field: Field::TargetPackage,
        reason: "target package should be the package id of a known UPI app",
    })
}

/// A validated, immutable description of one payment intent.
///
/// Instances only come out of the builder or out of deserialization, and both paths
/// run every field validator, so a `PaymentRequest` is never partially valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PaymentRequestData")]
pub struct PaymentRequest {
    currency: String,
    payee_vpa: String,
    payee_name: String,
    merchant_code: Option<String>,
    transaction_id: String,
    transaction_ref_id: String,
    description: String,
    amount: String,
    target_package: Option<String>,
}

/// Unvalidated wire shape of a [`PaymentRequest`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequestData {
    payee_vpa: String,
    payee_name: String,
    #[serde(default)]
    merchant_code: Option<String>,
    transaction_id: String,
    transaction_ref_id: String,
    description: String,
    amount: String,
    #[serde(default)]
    target_package: Option<String>,
}

impl TryFrom<PaymentRequestData> for PaymentRequest {
    type Error = PaymentError;

    fn try_from(data: PaymentRequestData) -> Result<Self> {
        validate_vpa(&data.payee_vpa)?;
        validate_not_blank(Field::PayeeName, &data.payee_name)?;
        if let Some(code) = &data.merchant_code {
            validate_not_blank(Field::MerchantCode, code)?;
        }
        validate_not_blank(Field::TransactionId, &data.transaction_id)?;
        validate_not_blank(Field::TransactionRefId, &data.transaction_ref_id)?;
        validate_not_blank(Field::Description, &data.description)?;
        validate_amount(&data.amount)?;
        if let Some(package) = &data.target_package {
            validate_target_package(package)?;
        }

        Ok(Self {
            currency: CURRENCY.to_string(),
            payee_vpa: data.payee_vpa,
            payee_name: data.payee_name,
            merchant_code: data.merchant_code,
            transaction_id: data.transaction_id,
            transaction_ref_id: data.transaction_ref_id,
            description: data.description,
            amount: data.amount,
            target_package: data.target_package,
        })
    }
}

impl PaymentRequest {
    /// Assembles a request from values the builder has already validated.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_validated(
        payee_vpa: String,
        payee_name: String,
        merchant_code: Option<String>,
        transaction_id: String,
        transaction_ref_id: String,
        description: String,
        amount: String,
        target_package: Option<String>,
    ) -> Self {
        Self {
            currency: CURRENCY.to_string(),
            payee_vpa,
            payee_name,
            merchant_code,
            transaction_id,
            transaction_ref_id,
            description,
            amount,
            target_package,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn payee_vpa(&self) -> &str {
        &self.payee_vpa
    }

    pub fn payee_name(&self) -> &str {
        &self.payee_name
    }

    pub fn merchant_code(&self) -> Option<&str> {
        self.merchant_code.as_deref()
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn transaction_ref_id(&self) -> &str {
        &self.transaction_ref_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount exactly as the caller supplied it.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// The amount as a decimal, or `None` if it exceeds `Decimal`'s range.
    pub fn amount_value(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim_end_matches('.')).ok()
    }

    /// Package the request is pinned to; `None` lets the OS pick any handler.
    pub fn target_package(&self) -> Option<&str> {
        self.target_package.as_deref()
    }

    /// The app the request is pinned to, [`PaymentApp::All`] when it is not pinned.
    pub fn target_app(&self) -> PaymentApp {
        self.target_package
            .as_deref()
            .and_then(PaymentApp::from_package_name)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_vpa_validation() {
        assert!(validate_vpa("a@b").is_ok());
        assert!(matches!(
            validate_vpa("noatsign"),
            Err(PaymentError::InvalidField {
                field: Field::PayeeVpa,
                ..
            })
        ));
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount("12.5").is_ok());
        assert!(validate_amount("12.").is_ok());
        assert!(validate_amount("0.00").is_ok());
        assert!(validate_amount("12").is_err());
        assert!(validate_amount("-5.00").is_err());
        assert!(validate_amount(".5").is_err());
        assert!(validate_amount(" 1.0").is_err());
        assert!(validate_amount("١٢.٥").is_err());
    }

    #[test]
    fn test_blank_validation() {
        assert!(validate_not_blank(Field::PayeeName, "Shop").is_ok());
        assert!(validate_not_blank(Field::PayeeName, "   \t").is_err());
        assert!(validate_not_blank(Field::PayeeName, "").is_err());
    }

    #[test]
    fn test_deserialization_runs_validators() {
        let json = r#"{
            "payeeVpa": "shop@upi",
            "payeeName": "Shop",
            "transactionId": "T1",
            "transactionRefId": "R1",
            "description": "Coffee",
            "amount": "12"
        }"#;
        let err = serde_json::from_str::<PaymentRequest>(json).unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_deserialization_fixes_currency() {
        let json = r#"{
            "payeeVpa": "shop@upi",
            "payeeName": "Shop",
            "transactionId": "T1",
            "transactionRefId": "R1",
            "description": "Coffee",
            "amount": "12.50"
        }"#;
        let request: PaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency(), "INR");
        assert_eq!(request.merchant_code(), None);
        assert_eq!(request.amount_value(), Some(dec!(12.50)));
    }

    #[test]
    fn test_deserialization_checks_target_package() {
        let request = |target: &str| {
            format!(
                r#"{{"payeeVpa":"a@b","payeeName":"A","transactionId":"T",
                    "transactionRefId":"R","description":"D","amount":"1.0",
                    "targetPackage":"{target}"}}"#
            )
        };

        let pinned: PaymentRequest = serde_json::from_str(&request("com.phonepe.app")).unwrap();
        assert_eq!(pinned.target_app(), PaymentApp::PhonePe);

        for target in ["", "com.example.wallet"] {
            let err = serde_json::from_str::<PaymentRequest>(&request(target)).unwrap_err();
            assert!(err.to_string().contains("targetPackage"), "{target:?}: {err}");
        }
    }

    #[test]
    fn test_amount_value_with_trailing_point() {
        let request = PaymentRequest::from_validated(
            "a@b".into(),
            "A".into(),
            None,
            "t".into(),
            "r".into(),
            "d".into(),
            "7.".into(),
            None,
        );
        assert_eq!(request.amount_value(), Some(dec!(7)));
        assert_eq!(request.amount(), "7.");
    }
}
