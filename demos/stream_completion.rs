//! Register SambaNova models and stream a completion to stdout.
//!
//! ```bash
//! export SAMBANOVA_KEY=your_api_key_here
//! cargo run --example stream_completion -- sambanova/Meta-Llama-3.1-8B-Instruct "Tell me a joke"
//! ```
//!
//! With no arguments the first registered model and a default prompt are used.
//! Set `RUST_LOG=llm_sambanova=debug` to see discovery and request logs.

use futures_util::StreamExt;
use llm_sambanova::{
    register_models, resolve_key, EnvKeyStore, Error, ModelRegistry, Prompt, SambaNovaConfig,
};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = SambaNovaConfig::from_env()?;
    let keys = EnvKeyStore;

    let mut registry = ModelRegistry::new();
    register_models(&config, &keys, &mut |model| registry.register(model)).await?;

    if registry.is_empty() {
        println!("No SambaNova models registered. Is SAMBANOVA_KEY set?");
        return Ok(());
    }

    println!("Registered {} models:", registry.len());
    for model in registry.models() {
        println!("  {model}");
    }

    let mut args = std::env::args().skip(1);
    let model = match args.next() {
        Some(model_id) => registry
            .get(&model_id)
            .ok_or_else(|| Error::config(format!("unknown model '{model_id}'")))?,
        None => registry
            .models()
            .next()
            .ok_or_else(|| Error::config("no models registered"))?,
    };
    let prompt = Prompt::new(
        args.next()
            .unwrap_or_else(|| "Write a haiku about Rust.".to_string()),
    );

    let api_key = resolve_key(&keys, None, model.key_requirement())?;

    println!("\n{model} says:");
    let mut stream = model
        .execute(&prompt, None, model.can_stream(), &api_key)
        .await?
        .stream();

    let mut stdout = std::io::stdout();
    while let Some(fragment) = stream.next().await {
        print!("{}", fragment?);
        stdout.flush().ok();
    }
    println!();

    Ok(())
}
