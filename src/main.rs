use clap::Parser;
use rdescribe::config::CliConfig;
use rdescribe::logging::init_logging;
use rdescribe::{ProductDescriber, Result};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();
    init_logging(config.log_level());
    tracing::debug!("CLI config: {:?}", redacted(&config));

    match run(&config).await {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(config: &CliConfig) -> Result<String> {
    let describer = ProductDescriber::new(config.gemini_client()?);
    let record = describer.describe(&config.image_path).await?;
    record.to_json()
}

fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    if config.api_key.is_some() {
        config.api_key = Some("***".to_string());
    }
    config
}
