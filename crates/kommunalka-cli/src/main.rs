mod prompt;
mod render;
mod shell;

use tracing::{info, warn};

use kommunalka_client::{AppContext, ClientConfig, Route};

use prompt::Prompt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they don't interleave with the screens
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kommunalka=info,kommunalka_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let ctx = AppContext::from_config(&config)?;

    let mut route = match std::env::args().nth(1) {
        Some(path) => Route::from_path(&path).unwrap_or_else(|| {
            warn!("Unknown start path {}, showing the landing page", path);
            Route::Landing
        }),
        None => Route::Landing,
    };

    let mut prompt = Prompt::stdin();
    while let Some(next) = shell::show(route, &ctx, &mut prompt).await? {
        route = next;
    }

    info!("Bye");
    Ok(())
}
