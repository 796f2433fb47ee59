use smsportalen::{ServiceConfig, SmsService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let service = SmsService::new(ServiceConfig::from_env())?;
    let recipients = std::env::args().skip(1).collect::<Vec<_>>();

    let response = service
        .send(recipients, "Hello from the smsportalen service demo.", None)
        .await?;
    println!("{}", response.raw());

    Ok(())
}
