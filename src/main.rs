use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use std::io;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use edu_coop::cli::{self, Cli, Command};
use edu_coop::config::AppConfig;
use edu_coop::jobs::Scheduler;
use edu_coop::models::AppStartTime;
use edu_coop::routes;
use edu_coop::runtime::lifetime;
use edu_coop::utils::{json_error_handler, query_error_handler};

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(io::stdout());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .event_format(format);

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let cli = Cli::parse();

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    AppConfig::init().map_err(|e| io::Error::other(format!("Invalid configuration: {e}")))?;
    let config = AppConfig::get();
    let _log_guard = init_logging(config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(app_start_time).await,
        command => {
            let Err(e) = cli::run(command).await else {
                return Ok(());
            };
            if e.is_client_error() {
                warn!("{}", e);
            } else {
                error!("{}", e);
            }
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            #[cfg(not(debug_assertions))]
            eprintln!("error: {}", e.format_simple());
            std::process::exit(1);
        }
    }
}

async fn serve(app_start_time: AppStartTime) -> io::Result<()> {
    let config = AppConfig::get();

    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        Authors: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| io::Error::other(e.to_string()))?;

    let storage = startup.storage.clone();
    let cache = startup.cache.clone();
    let sender = startup.sender.clone();

    let (stop_tx, stop_rx) = watch::channel(false);
    let mut background = Vec::new();
    if config.scheduler.enabled {
        let scheduler = Scheduler::new(storage.clone(), cache.clone(), sender.clone());
        background.push(scheduler.spawn(stop_rx));
    } else {
        warn!("Job scheduler disabled");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );

    warn!("Using {} worker(s) for the server", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(config.cors.max_age),
            )
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                    ))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(sender.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
            .configure(routes::configure_api_routes)
            // fallback, must stay last
            .configure(routes::configure_frontend_routes)
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    let server = {
        #[cfg(unix)]
        {
            if let Some(socket_path) = config.unix_socket_path() {
                warn!("Starting server on Unix socket: {}", socket_path);
                if std::path::Path::new(socket_path).exists() {
                    std::fs::remove_file(socket_path)?;
                }
                server.bind_uds(socket_path)?
            } else {
                let bind_address = config.server_bind_address();
                warn!("Starting server at http://{}", bind_address);
                server.bind(bind_address)?
            }
        }

        #[cfg(not(unix))]
        {
            let bind_address = config.server_bind_address();
            warn!("Starting server at http://{}", bind_address);
            server.bind(bind_address)?
        }
    }
    .run();

    let result = tokio::select! {
        res = server => res,
        _ = lifetime::shutdown::listen_for_shutdown() => Ok(()),
    };

    lifetime::shutdown::stop_background_tasks(stop_tx, background).await;
    warn!("Graceful shutdown completed");
    result
}
