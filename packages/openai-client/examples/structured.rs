//! Structured output example with a schema generated from a Rust type

use openai_client::OpenAIClient;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Review {
    /// Match score from 1 to 5
    score: u8,

    /// Brief justification
    reasoning: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenAIClient::from_env()?;

    let system = "You review apartment listings against a renter's wishes. \
        Score the match from 1 to 5 and justify the score briefly.";
    let user = "Wishes: quiet street, near a park, under $2000.\n\
        Listing: Sunny 1BR on a cul-de-sac, two blocks from Riverside Park, $1850/mo.";

    // Schema is generated from the Review type; the response is
    // parsed straight into it.
    let review: Review = client.extract("gpt-4o-mini", system, user).await?;

    println!("Score: {}/5", review.score);
    println!("Reasoning: {}", review.reasoning);

    Ok(())
}
