//! Fetch a resource with a scoped client and print the outcome.
//!
//! Run with: `cargo run --example get_user`

use rest_client_http::client::{OutcomeChannel, RestClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = RestClient::scoped_to("https://httpbin.org");
    client.set_header("X-Demo", "get_user");

    if !client.is_network_available() {
        anyhow::bail!("network unavailable, skipping request");
    }

    let (delegate, mut outcomes) = OutcomeChannel::new();
    let handle = client.get("/get", delegate)?;
    println!("dispatched request {}", handle.id());

    let (id, outcome) = outcomes
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("delegate channel closed"))?;

    match outcome {
        Ok(response) => println!("request {id} finished: {}\n{}", response.status, response.text()),
        Err(e) => println!("request {id} failed: {e}"),
    }

    Ok(())
}
