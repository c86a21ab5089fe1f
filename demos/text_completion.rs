use std::time::Duration;

use dotenv::dotenv;
use openai_completion::{CompletionClient, CompletionError, CompletionRequest, Context};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,openai_completion=debug")),
        )
        .init();

    // Reads OPENAI_API_KEY and (optionally) OPENAI_ORG_ID.
    let client = CompletionClient::from_env()?;
    let ctx = Context::background().with_timeout(Duration::from_secs(30));

    let request = CompletionRequest::new(
        "gpt-3.5-turbo-instruct",
        "Write a one-line haiku about the sea.",
        0.7,
        32,
    );

    match client.complete(&ctx, &request).await {
        Ok(response) => {
            if let Some(choice) = response.choices.first() {
                println!("{}", choice.text.trim());
            }
            if let Some(usage) = response.usage {
                println!("({} tokens)", usage.total_tokens);
            }
        }
        Err(CompletionError::Api(e)) => eprintln!("Server rejected the request: {e}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
