//src/main.rs

use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

use backoffice::{
    config::{AppState, Config},
    db::MemoryStore,
    routes::app_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; sem ele, `info`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração ou o banco falharem, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let listener = TcpListener::bind(config.bind_addr).await?;

    match config.database_url.as_deref() {
        Some(database_url) => {
            let app_state = AppState::new(&config, database_url).await?;
            let pool = app_state.store.pool().clone();

            serve(listener, app_router(app_state)).await?;
            pool.close().await;
        }
        None => {
            tracing::warn!("DATABASE_URL não definida: usando armazenamento em memória (dados não persistem)");
            serve(listener, app_router(AppState::with_store(MemoryStore::new()))).await?;
        }
    }

    tracing::info!("Servidor encerrado.");
    Ok(())
}

async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

// Ctrl-C ou SIGTERM encerram o servidor depois das requisições em andamento.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Falha ao instalar o handler de Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Falha ao instalar o handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Sinal de encerramento recebido.");
}
