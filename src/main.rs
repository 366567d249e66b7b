use anyhow::{Context, Result};
use clap::Parser;
use cloud_stt::{get_model, CredentialSource, SpeechConfig, AVAILABLE_MODELS};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloud-stt", about = "Transcribe an audio file with a cloud speech API")]
struct Cli {
    /// Audio file to transcribe (.flac, .wav, .mp3, .ogg)
    audio: PathBuf,

    /// Speech model to use
    #[arg(short, long, default_value = "google")]
    model: String,

    /// API key (GOOGLE_API_KEY takes precedence when set)
    #[arg(long)]
    api_key: Option<String>,

    /// Token source when no API key is given (gcloud or keychain)
    #[arg(long, default_value = "gcloud")]
    credential: CredentialSource,

    #[arg(long, default_value = "en-US")]
    language_code: String,

    /// Override the recognize endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SpeechConfig {
        api_key: cli.api_key,
        credential_source: cli.credential,
        language_code: cli.language_code,
        ..Default::default()
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    log::info!("Initializing {} model...", cli.model);
    let model = get_model(&cli.model, config)
        .with_context(|| format!("available models: {}", AVAILABLE_MODELS.join(", ")))?;
    model.load().await?;

    let result = model.transcribe(&cli.audio).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("failed to encode result")?
    );

    if result.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
