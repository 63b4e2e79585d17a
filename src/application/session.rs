use super::builder::PaymentRequestBuilder;
use super::channel::ResultChannel;
use crate::domain::app::PaymentApp;
use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{PaymentLauncher, PaymentStatusListener};
use crate::domain::result::{PaymentIntent, PaymentResult};
use crate::error::{PaymentError, Result};
use crate::interfaces::upi::encoder::UriEncoder;
use crate::interfaces::upi::response_parser::ResponseParser;
use tracing::{debug, info};

/// One payment request and the channel its result is delivered on.
///
/// A session is single-flight: start a payment, then feed the app's response to
/// [`complete`](Self::complete). Issuing a second payment before the first returns is
/// not detected. The session does not track host lifecycles; whoever owns the listener
/// must call [`remove_payment_status_listener`](Self::remove_payment_status_listener)
/// (or `clear` on a [`channel`](Self::channel) handle) when its scope ends.
#[derive(Debug)]
pub struct PaymentSession {
    request: PaymentRequest,
    app: PaymentApp,
    channel: ResultChannel,
}

impl PaymentSession {
    pub fn builder() -> PaymentRequestBuilder {
        PaymentRequestBuilder::new()
    }

    pub fn new(request: PaymentRequest, app: PaymentApp) -> Self {
        Self::with_channel(request, app, ResultChannel::new())
    }

    pub fn with_channel(request: PaymentRequest, app: PaymentApp, channel: ResultChannel) -> Self {
        Self {
            request,
            app,
            channel,
        }
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn app(&self) -> PaymentApp {
        self.app
    }

    /// A handle to this session's result channel.
    pub fn channel(&self) -> ResultChannel {
        self.channel.clone()
    }

    pub fn set_payment_status_listener<L>(&self, listener: L)
    where
        L: PaymentStatusListener + 'static,
    {
        self.channel.set_listener(listener);
    }

    pub fn remove_payment_status_listener(&self) {
        self.channel.clear();
    }

    pub fn intent(&self) -> PaymentIntent {
        UriEncoder::intent(&self.request, self.app)
    }

    /// Encodes the request and hands it to `launcher`. Returns as soon as the launch is
    /// handed off; the outcome arrives later through [`complete`](Self::complete).
    pub fn start_payment(&self, launcher: &dyn PaymentLauncher) -> Result<()> {
        let intent = self.intent();
        debug!(uri = %intent.uri, "encoded payment request");
        launcher.launch(&intent).map_err(PaymentError::Launch)?;
        info!(
            transaction_id = self.request.transaction_id(),
            package = intent.package.as_deref().unwrap_or("any"),
            "payment app launched"
        );
        Ok(())
    }

    /// Classifies the payment app's response and delivers it to the registered listener.
    ///
    /// `None` means the app returned without any payload, which is `Unknown` with an
    /// empty raw response. The result is returned as well, whether or not a listener
    /// received it.
    pub fn complete(&self, raw_response: Option<&str>) -> PaymentResult {
        let result = ResponseParser::parse(raw_response.unwrap_or_default());
        self.channel.deliver(&result);
        result
    }
}
