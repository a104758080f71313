use clap::Parser;
use live_auction::config::Config;
use live_auction::web::app::run_app;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    run_app(config).await
}
