//! # unit-domain
//!
//! Domain reconnaissance unit.
//!
//! Prompts the operator for a domain name and resolves its A, AAAA, and NS
//! records through Google's DNS-over-HTTPS JSON endpoint. Results are
//! printed to the console; the unit keeps no state between invocations.

use argus_unit_core::{InputSource, Unit, UnitError, UnitResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// Record types queried per domain, in display order.
const RECORD_TYPES: [&str; 3] = ["A", "AAAA", "NS"];

/// Response shape of the DoH JSON API. Only the fields we read.
#[derive(Debug, Deserialize)]
pub struct DohResponse {
    /// DNS response code; 0 is NOERROR.
    #[serde(rename = "Status")]
    pub status: u32,

    #[serde(rename = "Answer", default)]
    pub answers: Vec<DohAnswer>,
}

/// One answer record.
#[derive(Debug, Deserialize)]
pub struct DohAnswer {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: u32,

    #[serde(rename = "TTL")]
    pub ttl: u32,

    pub data: String,
}

/// Check that operator input looks like a queryable domain name.
///
/// This is a plausibility check, not RFC validation; the resolver gives the
/// authoritative answer.
pub fn validate_domain(input: &str) -> UnitResult<&str> {
    let domain = input.trim();
    if domain.is_empty() {
        return Err(UnitError::Input("domain must not be empty".to_string()));
    }
    if domain.contains(char::is_whitespace) {
        return Err(UnitError::Input(format!(
            "'{domain}' contains whitespace"
        )));
    }
    if !domain.contains('.') {
        return Err(UnitError::Input(format!(
            "'{domain}' is not a fully qualified domain"
        )));
    }
    Ok(domain)
}

/// The interactive domain reconnaissance unit.
///
/// Prompts through the toolkit's shared [`InputSource`] rather than opening
/// stdin itself; a second buffered reader over the same stream would fight
/// the dispatch loop for lines.
pub struct DomainReconUnit {
    client: reqwest::Client,
    input: InputSource,
}

impl DomainReconUnit {
    /// Create a new domain recon unit reading prompts from `input`.
    pub fn new(input: InputSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            input,
        }
    }

    /// Resolve one record type for a domain.
    pub async fn lookup(&self, domain: &str, record_type: &str) -> UnitResult<DohResponse> {
        debug!("DoH query: {} {}", domain, record_type);
        let response = self
            .client
            .get(DOH_ENDPOINT)
            .query(&[("name", domain), ("type", record_type)])
            .send()
            .await
            .map_err(|e| UnitError::Network(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| UnitError::Network(e.to_string()))?
            .json::<DohResponse>()
            .await
            .map_err(|e| UnitError::Network(format!("bad DoH response: {e}")))
    }

    async fn report(&self, domain: &str) -> UnitResult<()> {
        for record_type in RECORD_TYPES {
            let result = self.lookup(domain, record_type).await?;
            if result.status != 0 {
                println!("  {record_type}: lookup returned status {}", result.status);
                continue;
            }
            if result.answers.is_empty() {
                println!("  {record_type}: no records");
                continue;
            }
            for answer in &result.answers {
                println!(
                    "  {record_type}: {} (ttl {}s)",
                    answer.data, answer.ttl
                );
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Unit for DomainReconUnit {
    fn name(&self) -> &str {
        "domain-recon"
    }

    async fn run(&self) -> UnitResult<()> {
        println!("Domain to examine (blank to cancel):");

        let Some(line) = self.input.next_line().await? else {
            println!("Cancelled.");
            return Ok(());
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            println!("Cancelled.");
            return Ok(());
        }

        let domain = validate_domain(trimmed)?;
        println!("Resolving {domain}...");
        self.report(domain).await
    }
}
