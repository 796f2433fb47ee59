use std::io;

use smsportalen::{Credentials, ServiceConfig, SmsClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = std::env::var("SMSPORTALEN_USERNAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSPORTALEN_USERNAME environment variable is required",
        )
    })?;
    let token = std::env::var("SMSPORTALEN_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSPORTALEN_TOKEN environment variable is required",
        )
    })?;
    let phone = std::env::var("SMSPORTALEN_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSPORTALEN_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("SMSPORTALEN_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsportalen demo.".to_owned());

    let client = SmsClient::builder(Credentials::new(username, token)?)
        .debug_mode(ServiceConfig::from_env().debug)
        .build()?;

    let response = client.send([phone], message, 2).await?;
    println!(
        "status: {}, message: {:?}, scheduled_recipients_count: {}",
        response.status, response.message, response.scheduled_recipients_count
    );

    Ok(())
}
