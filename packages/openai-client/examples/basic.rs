//! Basic OpenAI client usage example

use openai_client::{ChatRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = OpenAIClient::from_env()?;

    // Simple chat completion
    println!("=== Chat Completion ===");
    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o-mini")
                .message(Message::system("You are a helpful assistant."))
                .message(Message::user("What is Rust in one sentence?"))
                .temperature(0.7)
                .max_tokens(100),
        )
        .await?;

    println!("Response: {}", response.content);

    // Multi-modal: describe an image by URL
    println!("\n=== Image Input ===");
    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o-mini").message(Message::user_with_images(
                "Describe this photo in one sentence.",
                ["https://upload.wikimedia.org/wikipedia/commons/4/47/PNG_transparency_demonstration_1.png"],
            )),
        )
        .await?;

    println!("Response: {}", response.content);

    if let Some(usage) = response.usage {
        println!("\nTokens used: {}", usage.total_tokens);
    }

    Ok(())
}
