use anyhow::Result;
use clap::Parser;
use meeting_insights::{
    create_router, AppState, Config, DeepgramClient, GeminiClient, MeetingStore, Pipeline,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "meeting-insights", about = "Meeting audio to insight pipeline")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/meeting-insights")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    cfg.validate()?;

    info!("{} v0.1.0", cfg.service.name);
    info!(
        "HTTP server will bind to {}:{}",
        cfg.service.http.bind, cfg.service.http.port
    );

    let store = MeetingStore::connect(&cfg.database.url).await?;
    store.init_schema().await?;

    let transcriber = Arc::new(DeepgramClient::new(&cfg.transcription)?);
    let generator = Arc::new(GeminiClient::new(&cfg.insights)?);
    let pipeline = Arc::new(Pipeline::new(
        transcriber,
        generator,
        store.clone(),
        cfg.limits.max_audio_bytes,
    ));

    let state = AppState::new(pipeline, store);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
