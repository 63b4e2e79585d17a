use super::resolver::AppResolver;
use crate::domain::app::PaymentApp;
use crate::domain::payment::{PaymentRequest, validate_amount, validate_not_blank, validate_vpa};
use crate::error::{Field, PaymentError, Result};
use tracing::debug;

/// Incrementally validates caller input and produces a [`PaymentRequest`].
///
/// Every setter checks its value immediately and fails with an error naming the field.
/// Unset fields stay `None` until [`build`](Self::build) scans them.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequestBuilder {
    app: PaymentApp,
    payee_vpa: Option<String>,
    payee_name: Option<String>,
    merchant_code: Option<String>,
    transaction_id: Option<String>,
    transaction_ref_id: Option<String>,
    description: Option<String>,
    amount: Option<String>,
}

fn required(value: Option<String>, field: Field) -> Result<String> {
    value.ok_or(PaymentError::MissingField(field))
}

/// Seeds a builder with an already validated request, e.g. one read from JSON.
/// A pinned target app is carried over and resolved again by `build()`.
impl From<PaymentRequest> for PaymentRequestBuilder {
    fn from(request: PaymentRequest) -> Self {
        Self {
            app: request.target_app(),
            payee_vpa: Some(request.payee_vpa().to_string()),
            payee_name: Some(request.payee_name().to_string()),
            merchant_code: request.merchant_code().map(str::to_string),
            transaction_id: Some(request.transaction_id().to_string()),
            transaction_ref_id: Some(request.transaction_ref_id().to_string()),
            description: Some(request.description().to_string()),
            amount: Some(request.amount().to_string()),
        }
    }
}

impl PaymentRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the payment to one app. Defaults to [`PaymentApp::All`].
    pub fn with(mut self, app: PaymentApp) -> Self {
        self.app = app;
        self
    }

    /// Payee VPA, e.g. `example@vpa`.
    pub fn set_payee_vpa(mut self, vpa: impl Into<String>) -> Result<Self> {
        let vpa = vpa.into();
        validate_vpa(&vpa)?;
        self.payee_vpa = Some(vpa);
        Ok(self)
    }

    pub fn set_payee_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_not_blank(Field::PayeeName, &name)?;
        self.payee_name = Some(name);
        Ok(self)
    }

    /// Merchant category code. Optional; only pass it if the payee has one.
    pub fn set_merchant_code(mut self, merchant_code: impl Into<String>) -> Result<Self> {
        let merchant_code = merchant_code.into();
        validate_not_blank(Field::MerchantCode, &merchant_code)?;
        self.merchant_code = Some(merchant_code);
        Ok(self)
    }

    /// Transaction id, as generated by the PSP for merchant payments.
    pub fn set_transaction_id(mut self, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_not_blank(Field::TransactionId, &id)?;
        self.transaction_id = Some(id);
        Ok(self)
    }

    /// Merchant reference: order number, bill id, booking id and the like.
    pub fn set_transaction_ref_id(mut self, ref_id: impl Into<String>) -> Result<Self> {
        let ref_id = ref_id.into();
        validate_not_blank(Field::TransactionRefId, &ref_id)?;
        self.transaction_ref_id = Some(ref_id);
        Ok(self)
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Result<Self> {
        let description = description.into();
        validate_not_blank(Field::Description, &description)?;
        self.description = Some(description);
        Ok(self)
    }

    /// Amount in INR as a decimal string (`90.88`). Passed through to the URI verbatim.
    pub fn set_amount(mut self, amount: impl Into<String>) -> Result<Self> {
        let amount = amount.into();
        validate_amount(&amount)?;
        self.amount = Some(amount);
        Ok(self)
    }

    /// Validates that every required field is present and resolves the target app.
    ///
    /// Missing fields are reported in a fixed order (see [`Field::REQUIRED`]) so the
    /// error is the same for the same input. App resolution only runs once the fields
    /// are complete.
    pub async fn build(self, resolver: &AppResolver) -> Result<(PaymentRequest, PaymentApp)> {
        let payee_vpa = required(self.payee_vpa, Field::PayeeVpa)?;
        let payee_name = required(self.payee_name, Field::PayeeName)?;
        let transaction_id = required(self.transaction_id, Field::TransactionId)?;
        let transaction_ref_id = required(self.transaction_ref_id, Field::TransactionRefId)?;
        let description = required(self.description, Field::Description)?;
        let amount = required(self.amount, Field::Amount)?;

        let app = resolver.resolve_target(self.app).await?;

        let request = PaymentRequest::from_validated(
            payee_vpa,
            payee_name,
            self.merchant_code,
            transaction_id,
            transaction_ref_id,
            description,
            amount,
            app.package_name().map(str::to_string),
        );
        debug!(
            transaction_id = request.transaction_id(),
            app = %app,
            "built payment request"
        );
        Ok((request, app))
    }
}
