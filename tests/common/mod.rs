#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use upi_intent::application::builder::PaymentRequestBuilder;
use upi_intent::application::resolver::AppResolver;
use upi_intent::domain::ports::{PackageRegistry, PaymentLauncher};
use upi_intent::domain::result::PaymentIntent;
use upi_intent::error::Field;
use upi_intent::infrastructure::in_memory::InMemoryPackageRegistry;

/// A builder with every required field set except `skip`.
pub fn builder_without(skip: Option<Field>) -> PaymentRequestBuilder {
    let mut builder = PaymentRequestBuilder::new();
    for field in Field::REQUIRED {
        if Some(field) == skip {
            continue;
        }
        builder = match field {
            Field::PayeeVpa => builder.set_payee_vpa("merchant@okbank"),
            Field::PayeeName => builder.set_payee_name("Corner Store"),
            Field::TransactionId => builder.set_transaction_id("TXN-0001"),
            Field::TransactionRefId => builder.set_transaction_ref_id("ORDER/77"),
            Field::Description => builder.set_description("Groceries & milk"),
            Field::Amount => builder.set_amount("249.50"),
            Field::MerchantCode | Field::TargetPackage => unreachable!("optional field"),
        }
        .unwrap();
    }
    builder
}

pub fn complete_builder() -> PaymentRequestBuilder {
    builder_without(None)
}

pub fn resolver_with(packages: &[&str]) -> AppResolver {
    AppResolver::new(Box::new(InMemoryPackageRegistry::from_packages(
        packages.iter().copied(),
    )))
}

/// Registry whose every lookup fails.
pub struct FailingRegistry;

#[async_trait]
impl PackageRegistry for FailingRegistry {
    async fn is_installed(&self, _package: &str) -> io::Result<bool> {
        Err(io::Error::other("package manager unavailable"))
    }
}

/// Launcher that records every intent it is handed.
#[derive(Default)]
pub struct RecordingLauncher {
    pub launched: Mutex<Vec<PaymentIntent>>,
}

impl PaymentLauncher for RecordingLauncher {
    fn launch(&self, intent: &PaymentIntent) -> io::Result<()> {
        self.launched.lock().push(intent.clone());
        Ok(())
    }
}

const ALPHABET: &[u8] = b"=&;|\n\r %+_-statusSUCCESSfailpendingtxnRefReason0123456789";

/// Deterministic pseudo-random response payloads, biased toward separator and
/// status-like characters.
pub fn random_payloads(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..64);
            (0..len)
                .map(|_| {
                    if rng.gen_bool(0.8) {
                        ALPHABET[rng.gen_range(0..ALPHABET.len())]
                    } else {
                        rng.r#gen::<u8>()
                    }
                })
                .collect()
        })
        .collect()
}
