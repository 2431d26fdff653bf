use ayuni_api::{answer_router, init_logging, serve, AnswerState};
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

    if !settings.gemini_configured() {
        log::warn!("GEMINI_API_KEY is not set; answers will carry a configuration error");
    }
    if settings.credentials.is_empty() {
        log::warn!("AYUNI_USUARIOS is empty; every login will be rejected");
    }

    let state = AnswerState::from_settings(&settings)?;
    log::info!(
        "Starting Profesor Ayuni on port {} with {} users",
        settings.port,
        settings.credentials.len()
    );
    serve(answer_router(state), settings.port).await
}
