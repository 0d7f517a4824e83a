use std::sync::Arc;

use application_form::catalog::Catalog;
use application_form::config::FormConfig;
use application_form::routes;
use application_form::submission::SpawnDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FormConfig::from_env()?;
    let addr = config.socket_addr();

    eprintln!("📝 Application Form v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Form API: http://{}/api/form", addr);
    match &config.submission.endpoint {
        Some(url) => eprintln!(
            "   Submissions: {} ({}, timeout {}s)",
            url,
            config.submission.mode,
            config.submission.timeout.as_secs()
        ),
        None => eprintln!("   Submissions: not configured (logged only)"),
    }

    // ── Submission ───────────────────────────────────────────────────────
    let sink = config.submission.sink();
    let dispatcher = Arc::new(SpawnDispatcher::new(sink));

    // ── Server ───────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Form server started");
    routes::serve(listener, Catalog::reference(), dispatcher, async {
        tokio::signal::ctrl_c().await.ok();
        eprintln!("\nShutting down...");
    })
    .await?;

    Ok(())
}
