use crate::domain::result::PaymentResult;
use percent_encoding::percent_decode_str;
use tracing::debug;

const SEPARATORS: &[char] = &['&', ';', '|', '\n', '\r'];

// Keys are compared lower-cased with `_` and `-` stripped.
const STATUS_KEYS: &[&str] = &["status", "txnstatus", "transactionstatus"];
const APPROVAL_KEYS: &[&str] = &["approvalrefno", "approvalref", "approvalrefid", "txnref"];
const REASON_KEYS: &[&str] = &["reason", "reasoncode", "errorcode", "responsecode"];

/// Status tokens ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum StatusToken {
    Success,
    Submitted,
    Failure,
}

impl StatusToken {
    fn classify(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" | "completed" => Some(StatusToken::Success),
            "submitted" | "pending" => Some(StatusToken::Submitted),
            "failure" | "failed" | "cancelled" | "canceled" => Some(StatusToken::Failure),
            _ => None,
        }
    }
}

/// A `key=value` pair from a response, key normalized.
#[derive(Debug, PartialEq, Eq)]
struct ResponseField {
    key: String,
    value: String,
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn tokenize(raw: &str) -> Vec<ResponseField> {
    raw.split(SEPARATORS)
        .filter_map(|token| token.split_once('='))
        .filter_map(|(key, value)| {
            let key = normalize_key(key);
            if key.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim())
                .decode_utf8_lossy()
                .trim()
                .to_string();
            Some(ResponseField { key, value })
        })
        .collect()
}

fn first_value(fields: &[ResponseField], aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        fields
            .iter()
            .find(|field| field.key == *alias && !field.value.is_empty())
            .map(|field| field.value.clone())
    })
}

/// Classifies the free-form response string a UPI app hands back.
///
/// Parsing is total: any input, including an empty or garbled one, yields a
/// [`PaymentResult`]. When several status keys disagree the most restrictive reading
/// wins (failure over submitted over success), and a response with no recognised
/// status token is `Unknown` even if it carries an approval reference.
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(raw: &str) -> PaymentResult {
        let fields = tokenize(raw);
        let status = fields
            .iter()
            .filter(|field| STATUS_KEYS.contains(&field.key.as_str()))
            .filter_map(|field| StatusToken::classify(&field.value))
            .max();

        let raw_response = raw.to_string();
        let result = match status {
            Some(StatusToken::Failure) => PaymentResult::Failed {
                reason_code: first_value(&fields, REASON_KEYS),
                raw_response,
            },
            Some(StatusToken::Submitted) => PaymentResult::Submitted { raw_response },
            Some(StatusToken::Success) => PaymentResult::Success {
                approval_ref_id: first_value(&fields, APPROVAL_KEYS),
                raw_response,
            },
            None => PaymentResult::Unknown { raw_response },
        };

        debug!(
            status = result.status_label(),
            fields = fields.len(),
            "classified UPI response"
        );
        result
    }

    /// Parses a response that may not be valid UTF-8; invalid sequences are replaced.
    pub fn parse_bytes(raw: &[u8]) -> PaymentResult {
        Self::parse(&String::from_utf8_lossy(raw))
    }
}
