use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// The caller-supplied fields of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PayeeVpa,
    PayeeName,
    MerchantCode,
    TransactionId,
    TransactionRefId,
    Description,
    Amount,
    TargetPackage,
}

impl Field {
    /// Required fields in the order `build()` checks them.
    pub const REQUIRED: [Field; 6] = [
        Field::PayeeVpa,
        Field::PayeeName,
        Field::TransactionId,
        Field::TransactionRefId,
        Field::Description,
        Field::Amount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::PayeeVpa => "payeeVpa",
            Field::PayeeName => "payeeName",
            Field::MerchantCode => "merchantCode",
            Field::TransactionId => "transactionId",
            Field::TransactionRefId => "transactionRefId",
            Field::Description => "description",
            Field::Amount => "amount",
            Field::TargetPackage => "targetPackage",
        }
    }

    pub fn setter(self) -> &'static str {
        match self {
            Field::PayeeVpa => "set_payee_vpa",
            Field::PayeeName => "set_payee_name",
            Field::MerchantCode => "set_merchant_code",
            Field::TransactionId => "set_transaction_id",
            Field::TransactionRefId => "set_transaction_ref_id",
            Field::Description => "set_description",
            Field::Amount => "set_amount",
            Field::TargetPackage => "with",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum PaymentError {
    #[error("missing required field `{0}`: call `{setter}()` before `build()`", setter = .0.setter())]
    #[diagnostic(code(upi::missing_field))]
    MissingField(Field),

    #[error("invalid `{field}`: {reason}")]
    #[diagnostic(code(upi::invalid_field))]
    InvalidField { field: Field, reason: &'static str },

    #[error("payment app `{0}` is not installed")]
    #[diagnostic(
        code(upi::app_not_found),
        help("install the app or select `all` to let the user choose")
    )]
    AppNotFound(String),

    #[error("could not launch payment app: {0}")]
    #[diagnostic(code(upi::launch))]
    Launch(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PaymentError {
    /// The builder field a validation error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            PaymentError::MissingField(field) | PaymentError::InvalidField { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
