use crate::domain::ports::PaymentLauncher;
use crate::domain::result::PaymentIntent;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Launcher that writes the deep link to a stream instead of opening an app.
///
/// The CLI uses it on stdout so the link can be piped to whatever opens URIs on the
/// target device.
pub struct WriterLauncher<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLauncher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterLauncher<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> PaymentLauncher for WriterLauncher<W> {
    fn launch(&self, intent: &PaymentIntent) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", intent.uri)?;
        writer.flush()
    }
}
