//! Lists the domains on a Namecheap account.
//!
//! ```bash
//! export NAMECHEAP_URL=https://api.sandbox.namecheap.com/xml.response
//! export NAMECHEAP_NAME=apiuser NAMECHEAP_USER=apiuser
//! export NAMECHEAP_KEY=... NAMECHEAP_CLIENT_IP=203.0.113.10
//! cargo run --example list_domains
//! ```

use namecheap_rs::{Client, NamecheapConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new(NamecheapConfig::from_env())?;

    let mut params = client.params("namecheap.domains.getList");
    params.insert("PageSize", "100");

    let response = client.get_request(&params).await?;

    let Some(payload) = response.command_response() else {
        println!("No CommandResponse in reply");
        return Ok(());
    };

    for domain in payload.elements_by_tag_name("Domain") {
        println!(
            "{:<40} expires {:<12} auto-renew {}",
            domain.attribute("Name").unwrap_or("?"),
            domain.attribute("Expires").unwrap_or("?"),
            domain.attribute("AutoRenew").unwrap_or("?"),
        );
    }

    for warning in response.warnings() {
        println!("warning: {}", warning.message);
    }

    Ok(())
}
