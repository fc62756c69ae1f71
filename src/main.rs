use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voicepipe::Config;
use voicepipe::api::ApiServer;
use voicepipe::pipeline::{Pipeline, ReplyGenerator, SpeechToText, TextToSpeech};

/// Voicepipe - voice conversation gateway
#[derive(Parser)]
#[command(name = "voicepipe", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Frontend origin allowed by CORS
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:3000")]
    frontend_url: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,voicepipe=info",
        1 => "info,voicepipe=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env(cli.port, cli.frontend_url)?;
    tracing::info!(port = config.port, "starting voicepipe gateway");

    let pipeline = Pipeline::new(
        Box::new(SpeechToText::new(config.google_api_key.clone())?),
        Box::new(ReplyGenerator::new(config.huggingface_api_key)?),
        Box::new(TextToSpeech::new(config.google_api_key)?),
    );

    let server = ApiServer::new(pipeline, config.port, config.frontend_url);
    server.run().await?;

    Ok(())
}
