//! Create a resource via POST with form-encoded params.
//!
//! Run with: `cargo run --example post_form`

use rest_client_http::client::{OutcomeChannel, RestClient};
use std::collections::BTreeMap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = RestClient::scoped_to_with_auth("https://httpbin.org", "demo", "secret");

    let mut params = BTreeMap::new();
    params.insert("name".to_string(), "foo".to_string());
    params.insert("size".to_string(), "large".to_string());

    let (delegate, mut outcomes) = OutcomeChannel::new();
    client.post("/post", &params, delegate)?;

    let (_id, outcome) = outcomes
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("delegate channel closed"))?;

    match outcome {
        Ok(response) => println!("created: {}\n{}", response.status, response.text()),
        Err(e) => println!("create failed: {e}"),
    }

    Ok(())
}
