use ayuni_api::{init_logging, proxy_router, serve, ProxyState};
use tutor_system::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = ProxyState::from_settings(&settings)?;
    log::info!(
        "Starting PDF proxy on port {} for {}",
        settings.port,
        settings.ngrok_url
    );
    serve(proxy_router(state), settings.port).await
}
