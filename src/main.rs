use std::io;

use dotenvy::dotenv;
use shop_service::{build_server, create_pool, run_migrations, AppState, Config, Repositories};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let state = AppState::new(Repositories::diesel(pool));
    if config.seed_catalog {
        let catalog = state.catalog.clone();
        actix_web::web::block(move || catalog.seed_defaults())
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
