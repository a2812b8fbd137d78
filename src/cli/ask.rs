use crate::error::Result;
use crate::llm::{LlmConfig, OpenRouterClient};

pub fn run(prompt: &str, system: Option<&str>) -> Result<()> {
    let client = OpenRouterClient::new(LlmConfig::from_env()?);
    let answer = client.quick_query(prompt, system)?;
    println!("{answer}");
    Ok(())
}
