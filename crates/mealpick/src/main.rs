use mealpick::{
    config::{AppConfig, CredentialSource},
    session::SessionStore,
    telemetry,
    web::{self, AppState},
};
use mealpick_core::MealpickClient;
use mealpick_openai::OpenAiAdapterBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = AppConfig::load()
        .inspect_err(|err| tracing::error!(error = %err, "refusing to start"))?;

    match &config.credential_source {
        CredentialSource::Environment => tracing::info!("using OPENAI_API_KEY from the environment"),
        CredentialSource::SecretsFile(path) => {
            tracing::info!(path = %path.display(), "using OPENAI_API_KEY from the secrets file")
        }
    }

    let adapter = OpenAiAdapterBuilder::new()
        .with_api_key(config.api_key.clone())
        .with_base_url(config.base_url.clone())
        .build()?;
    let client = MealpickClient::new(adapter);

    let state = AppState::new(client, SessionStore::new(config.session_idle));
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
