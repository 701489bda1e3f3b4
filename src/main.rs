use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use club_portal::{api, dir, Config, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match &config.log_file {
        Some(path) => simple_logging::log_to_file(path, config.log_level)?,
        None => simple_logging::log_to_stderr(config.log_level),
    }

    let store: Arc<Store> = match Store::open(&config) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to open the store at {}: {}", config.data_dir, e);
            std::process::exit(1);
        }
    };

    log::info!("{} listening on {}", dir::APP_NAME, config.bind_addr);

    let data = web::Data::new(store.clone());
    HttpServer::new(move || App::new().app_data(data.clone()).configure(api::configure))
        .bind(config.bind_addr.as_str())?
        .run()
        .await?;

    if let Err(e) = store.flush() {
        log::error!("Failed to flush the store on shutdown: {}", e);
    }
    Ok(())
}
