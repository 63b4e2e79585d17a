use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use upi_intent::application::builder::PaymentRequestBuilder;
use upi_intent::application::resolver::AppResolver;
use upi_intent::application::session::PaymentSession;
use upi_intent::domain::app::PaymentApp;
use upi_intent::domain::payment::PaymentRequest;
use upi_intent::domain::ports::PackageRegistryBox;
use upi_intent::error::PaymentError;
use upi_intent::infrastructure::in_memory::InMemoryPackageRegistry;
use upi_intent::infrastructure::writer_launcher::WriterLauncher;
use upi_intent::interfaces::upi::response_parser::ResponseParser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level. Otherwise `RUST_LOG` applies, defaulting to `warn`.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a payment request and print its `upi://pay` deep link
    Encode(EncodeArgs),
    /// Classify a payment app's response and print the result as JSON
    Parse {
        /// Raw response string. Read from stdin when omitted.
        raw: Option<String>,
    },
}

#[derive(Args)]
struct EncodeArgs {
    /// Read the request from a JSON file. Field flags and `UPI_*` field variables are
    /// ignored when this is given.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Payee VPA (e.g. example@vpa)
    #[arg(long, env = "UPI_PAYEE_VPA")]
    vpa: Option<String>,

    #[arg(long, env = "UPI_PAYEE_NAME")]
    name: Option<String>,

    #[arg(long, env = "UPI_MERCHANT_CODE")]
    merchant_code: Option<String>,

    #[arg(long, env = "UPI_TRANSACTION_ID")]
    transaction_id: Option<String>,

    #[arg(long, env = "UPI_TRANSACTION_REF_ID")]
    transaction_ref_id: Option<String>,

    #[arg(long, env = "UPI_DESCRIPTION")]
    description: Option<String>,

    /// Amount in INR, decimal format (e.g. 100.00)
    #[arg(long, env = "UPI_AMOUNT")]
    amount: Option<String>,

    /// App to pin the payment to (all, amazon_pay, bhim_upi, google_pay, paytm, phone_pe).
    /// Overrides a request file's `targetPackage`; defaults to `all`.
    #[arg(long, env = "UPI_APP")]
    app: Option<PaymentApp>,

    /// JSON array of installed package ids. Without it no concrete app is installed.
    #[arg(long, env = "UPI_INSTALLED_APPS")]
    installed: Option<PathBuf>,
}

impl EncodeArgs {
    fn builder(&self) -> upi_intent::error::Result<PaymentRequestBuilder> {
        if let Some(path) = &self.request {
            let content = std::fs::read_to_string(path)?;
            let request: PaymentRequest = serde_json::from_str(&content)?;
            return Ok(PaymentRequestBuilder::from(request));
        }

        let mut builder = PaymentRequestBuilder::new();
        if let Some(vpa) = &self.vpa {
            builder = builder.set_payee_vpa(vpa)?;
        }
        if let Some(name) = &self.name {
            builder = builder.set_payee_name(name)?;
        }
        if let Some(code) = &self.merchant_code {
            builder = builder.set_merchant_code(code)?;
        }
        if let Some(id) = &self.transaction_id {
            builder = builder.set_transaction_id(id)?;
        }
        if let Some(ref_id) = &self.transaction_ref_id {
            builder = builder.set_transaction_ref_id(ref_id)?;
        }
        if let Some(description) = &self.description {
            builder = builder.set_description(description)?;
        }
        if let Some(amount) = &self.amount {
            builder = builder.set_amount(amount)?;
        }
        Ok(builder)
    }

    fn registry(&self) -> upi_intent::error::Result<PackageRegistryBox> {
        let registry = match &self.installed {
            Some(path) => InMemoryPackageRegistry::from_json_file(path)?,
            None => InMemoryPackageRegistry::new(),
        };
        Ok(Box::new(registry))
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn encode(args: EncodeArgs) -> Result<()> {
    let resolver = AppResolver::new(args.registry()?);
    let mut builder = args.builder()?;
    if let Some(app) = args.app {
        builder = builder.with(app);
    }
    let (request, app) = builder.build(&resolver).await?;

    let session = PaymentSession::new(request, app);
    session.start_payment(&WriterLauncher::stdout())?;
    Ok(())
}

fn parse(raw: Option<String>) -> Result<()> {
    let result = match raw {
        Some(raw) => ResponseParser::parse(&raw),
        None => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input).into_diagnostic()?;
            let input = input.strip_suffix(b"\n").unwrap_or(&input[..]);
            let input = input.strip_suffix(b"\r").unwrap_or(input);
            ResponseParser::parse_bytes(input)
        }
    };

    let json = serde_json::to_string(&result).map_err(PaymentError::from)?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode(args) => encode(args).await,
        Command::Parse { raw } => parse(raw),
    }
}
