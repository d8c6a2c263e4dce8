use crate::config::InputConfig;
use crate::types::{Dataset, Lead};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "latitude",
    "longitude",
    "monthly_total_income",
    "source",
    "call_id",
];

/// Loads the leads CSV once. One attempt, no retries: any failure is returned
/// to the caller and nothing partial is kept.
pub async fn load_dataset(config: &InputConfig) -> Result<Dataset> {
    let location = config.data_url.as_str();
    info!("Loading leads from {}", location);

    let parsed = if is_remote(location) {
        let bytes = fetch_remote(location).await?;
        parse_leads(bytes.as_slice())
    } else {
        let file = std::fs::File::open(location)
            .with_context(|| format!("Failed to open CSV file: {:?}", location))?;
        parse_leads(file)
    };
    let dataset = parsed.with_context(|| format!("Failed to load leads from {}", location))?;

    info!(
        "Loaded {} leads ({} distinct names)",
        dataset.len(),
        dataset.names.len()
    );
    Ok(dataset)
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Server refused {}", url))?;
    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;
    debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Parses CSV text into typed leads. Extra columns are ignored; a missing
/// required column or an unparsable value fails the whole load. Fields are
/// taken verbatim, so `" Ann"` and `"Ann"` are different names.
pub fn parse_leads<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().context("Failed to read CSV header")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(anyhow!("Required column '{}' not found in CSV", column));
        }
    }

    let mut leads = Vec::new();
    for (row, result) in rdr.deserialize::<Lead>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let lead = result.with_context(|| format!("Malformed lead on line {}", row + 2))?;
        leads.push(lead);
    }

    Ok(Dataset::new(leads))
}
