use crate::domain::app::PaymentApp;
use crate::domain::payment::PaymentRequest;
use crate::domain::result::PaymentIntent;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped in a URI query component: alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SCHEME_AND_AUTHORITY: &str = "upi://pay";

/// Serializes payment requests into `upi://pay` deep links.
///
/// Parameters are always emitted in the order `pa, pn, mc, tid, tr, tn, am, cu`, and
/// `mc` is left out entirely when there is no merchant code, so the same request always
/// encodes to the same bytes.
pub struct UriEncoder;

impl UriEncoder {
    /// The target app never changes the URI, so it is not an argument here; use
    /// [`intent`](Self::intent) to pair the URI with the app's package.
    pub fn encode(request: &PaymentRequest) -> String {
        let params = [
            ("pa", Some(request.payee_vpa())),
            ("pn", Some(request.payee_name())),
            ("mc", request.merchant_code()),
            ("tid", Some(request.transaction_id())),
            ("tr", Some(request.transaction_ref_id())),
            ("tn", Some(request.description())),
            ("am", Some(request.amount())),
            ("cu", Some(request.currency())),
        ];

        let query = params
            .into_iter()
            .filter_map(|(key, value)| {
                value.map(|value| format!("{key}={}", utf8_percent_encode(value, COMPONENT)))
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{SCHEME_AND_AUTHORITY}?{query}")
    }

    /// Builds the launcher hand-off for `request`, targeting `app`'s package unless it
    /// is [`PaymentApp::All`].
    pub fn intent(request: &PaymentRequest, app: PaymentApp) -> PaymentIntent {
        PaymentIntent {
            uri: Self::encode(request),
            package: app.package_name().map(str::to_string),
        }
    }
}
