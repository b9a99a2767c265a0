use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use credence::config::Config;
use credence::pipeline::AnalysisRequest;

/// Credence: credibility scoring for social-media posts.
///
/// Scores a post 0-100 from language signals, optionally refined by a
/// sentiment model and a heuristic check of an attached image.
#[derive(Parser)]
#[command(name = "credence", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (POST /analyze, GET /health)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: CREDENCE_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: CREDENCE_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Analyze a single post from the command line
    Analyze {
        /// The post text
        text: String,

        /// Image URL attached to the post (only the first is analyzed)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Print the raw JSON response instead of the formatted report
        #[arg(long)]
        json: bool,
    },

    /// Download the ONNX sentiment model (~67 MB)
    DownloadModel,

    /// Show configuration and model status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("credence=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let pipeline = config.pipeline()?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            credence::web::run_server(pipeline, port, &bind).await?;
        }

        Commands::Analyze { text, images, json } => {
            let config = Config::load()?;
            let pipeline = config.pipeline()?;

            let request = AnalysisRequest {
                text,
                images,
                video_url: None,
            };

            let response = match pipeline.analyze(&request).await {
                Ok(response) => response,
                Err(e) => anyhow::bail!("Invalid input: {e}"),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                credence::output::terminal::display_analysis(&response);
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX sentiment model...");
            println!("  Destination: {}", model_dir.display());
            info!(dir = %model_dir.display(), "Downloading sentiment model");

            credence::sentiment::download::download_model(model_dir, true).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!(
                "Sentiment refinement is now available to `credence analyze` and `credence serve`."
            );
        }

        Commands::Status => {
            let config = Config::load()?;
            credence::status::show(&config);
        }
    }

    Ok(())
}
