use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use log::info;

use student_support_dashboard::api::{self, DashboardState};
use student_support_dashboard::config::Config;
use student_support_dashboard::data::Dataset;

async fn start_server(state: DashboardState, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    info!("Loading student survey data from {}", config.data.display());
    let dataset = Dataset::load(&config.data, config.delimiter)
        .with_context(|| format!("loading {}", config.data.display()))?;

    let bounds = dataset.grade_bounds();
    info!(
        "Loaded {} student records, final grades {}..={}",
        dataset.len(),
        bounds.min(),
        bounds.max()
    );

    info!("Starting dashboard on http://{}:{}", config.host, config.port);
    start_server(DashboardState::new(dataset, config.title), &config.host, config.port)
        .await
        .with_context(|| format!("serving on {}:{}", config.host, config.port))?;

    Ok(())
}
