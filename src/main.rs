use std::{process, sync::Arc, time::Duration};

use tokio::{net::TcpListener, sync::watch, try_join};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use vitrine::{
    application::{
        admin::{
            analytics::AdminAnalyticsService, chrome::AdminChromeService,
            submissions::AdminSubmissionsService,
        },
        analytics::ViewCounter,
        chrome::{ChromeService, SiteIdentity},
        contact::ContactService,
        error::AppError,
        page::PageService,
        repos::{
            AnalyticsRepo, DesignRepo, HealthRepo, PagesRepo, SectionsRepo, SubmissionsRepo,
        },
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, HttpState},
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let (http_state, admin_state) = build_states(repositories, &settings);

    info!(
        target = "vitrine::serve",
        public_addr = %settings.server.public_addr,
        admin_addr = %settings.server.admin_addr,
        counter_mode = settings.analytics.counter_mode.as_str(),
        "starting listeners"
    );

    serve_http(&settings, http_state, admin_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let database_url = database_url(&settings)?;
    let pool = PostgresRepositories::connect(database_url, 1)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(target = "vitrine::migrate", "migrations applied");
    Ok(())
}

fn database_url(settings: &config::Settings) -> Result<&str, AppError> {
    settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = database_url(settings)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_states(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> (HttpState, AdminState) {
    let pages_repo: Arc<dyn PagesRepo> = repositories.clone();
    let sections_repo: Arc<dyn SectionsRepo> = repositories.clone();
    let analytics_repo: Arc<dyn AnalyticsRepo> = repositories.clone();
    let design_repo: Arc<dyn DesignRepo> = repositories.clone();
    let submissions_repo: Arc<dyn SubmissionsRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories;

    let identity = SiteIdentity {
        brand_title: settings.site.brand_title.clone(),
        default_title: settings.site.default_title.clone(),
        default_description: settings.site.default_description.clone(),
    };

    let http_state = HttpState {
        pages: Arc::new(PageService::new(pages_repo.clone(), sections_repo)),
        chrome: Arc::new(ChromeService::new(
            pages_repo.clone(),
            design_repo,
            identity,
        )),
        views: Arc::new(ViewCounter::new(
            analytics_repo.clone(),
            settings.analytics.counter_mode,
        )),
        contact: Arc::new(ContactService::new(
            submissions_repo.clone(),
            settings.contact.max_message_chars,
        )),
        health: health_repo.clone(),
    };

    let admin_state = AdminState {
        chrome: Arc::new(AdminChromeService::new(&settings.site.brand_title)),
        analytics: Arc::new(AdminAnalyticsService::new(
            analytics_repo,
            pages_repo,
            submissions_repo.clone(),
        )),
        submissions: Arc::new(AdminSubmissionsService::new(submissions_repo)),
        health: health_repo,
    };

    (http_state, admin_state)
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(http_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!(target = "vitrine::serve", "shutdown requested");
        let _ = shutdown_tx.send(true);
    });

    let public_server = axum::serve(public_listener, public_router.into_make_service())
        .with_graceful_shutdown(stopped(shutdown_rx.clone()));
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service())
        .with_graceful_shutdown(stopped(shutdown_rx.clone()));

    let grace = settings.server.graceful_shutdown;
    tokio::select! {
        result = async { try_join!(public_server, admin_server) } => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = drain_deadline(shutdown_rx, grace) => {
            warn!(
                target = "vitrine::serve",
                grace_seconds = grace.as_secs(),
                "in-flight requests did not finish before the shutdown deadline"
            );
        }
    }

    Ok(())
}

async fn stopped(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Resolves `grace` after shutdown was requested; never resolves otherwise.
async fn drain_deadline(mut shutdown: watch::Receiver<bool>, grace: Duration) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(target = "vitrine::serve", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(target = "vitrine::serve", error = %err, "failed to listen for SIGTERM");
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
}
