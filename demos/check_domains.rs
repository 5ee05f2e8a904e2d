//! Checks domain availability, reading credentials from a TOML file with env overrides.
//!
//! ```bash
//! cargo run --example check_domains -- namecheap.toml example.com example.net
//! ```

use namecheap_rs::{Client, NamecheapConfig, NamecheapError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "namecheap.toml".to_string());
    let domains: Vec<String> = args.collect();
    if domains.is_empty() {
        eprintln!("usage: check_domains <config.toml> <domain>...");
        std::process::exit(2);
    }

    let client = Client::new(NamecheapConfig::from_file_with_env(&config_path)?)?;

    // Large lists go in a POST body.
    let mut params = client.params("namecheap.domains.check");
    params.insert("DomainList", domains.join(","));

    match client.post_request(&params).await {
        Ok(response) => {
            let results = response
                .command_response()
                .map(|payload| payload.elements_by_tag_name("DomainCheckResult"))
                .unwrap_or_default();
            for result in results {
                println!(
                    "{:<40} available={}",
                    result.attribute("Domain").unwrap_or("?"),
                    result.attribute("Available").unwrap_or("?"),
                );
            }
        }
        Err(NamecheapError::Api { message, errors }) => {
            for error in &errors {
                eprintln!("error {}: {}", error.number.as_deref().unwrap_or("-"), error.message);
            }
            return Err(message.into());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
