use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result};
use actix_web::middleware::Logger;
use log::info;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{handle, AuctionHouse, Command, CommandSuccess, Errors, RandomItemGenerator, Scheduler, TokioScheduler};
use super::session;
use super::types::{ApiError, AppState, BidRequest, ServerMsg};

// Initialize application state
pub fn init_app_state(config: &Config) -> AppState {
    let generator = Arc::new(RandomItemGenerator::new(config.seed));
    let house = AuctionHouse::new(generator, TokioScheduler::current(), config.phase_interval());
    house.open();
    AppState::new(house)
}

fn bad_request(err: Errors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError {
        message: err.to_string(),
    })
}

// Get the current auction
async fn get_auction<S: Scheduler>(data: web::Data<AppState<S>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(data.house.state()))
}

// Place a bid on the current auction
async fn place_bid<S: Scheduler>(
    bid_req: web::Json<BidRequest>,
    data: web::Data<AppState<S>>,
) -> Result<HttpResponse> {
    match handle(bid_req.to_command(), &*data.house) {
        Ok(success) => Ok(HttpResponse::Ok().json(success)),
        Err(err) => Ok(bad_request(err)),
    }
}

// Replace a sold item with a new one
async fn start_new_auction<S: Scheduler>(data: web::Data<AppState<S>>) -> Result<HttpResponse> {
    match handle(Command::StartNewAuction, &*data.house) {
        Ok(CommandSuccess::AuctionStarted { state }) => {
            data.hub.broadcast(ServerMsg::NewAuctionStarted { state: state.clone() });
            Ok(HttpResponse::Ok().json(state))
        }
        Ok(success) => Ok(HttpResponse::Ok().json(success)),
        Err(err) => Ok(bad_request(err)),
    }
}

/// Any origin may call the API, matching the browser frontend served elsewhere.
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

// Configure routes
pub fn configure_app<S: Scheduler>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/auction", web::get().to(get_auction::<S>))
            .route("/auction/bids", web::post().to(place_bid::<S>))
            .route("/auction/new", web::post().to(start_new_auction::<S>))
            .route("/ws", web::get().to(session::upgrade::<S>))
    );
}

// Main application
pub async fn run_app(config: Config) -> std::io::Result<()> {
    let app_state = init_app_state(&config);
    let house = Arc::clone(&app_state.house);

    info!("Starting server on {}:{}", config.host, config.port);

    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors_middleware())
            .wrap(Logger::default())
            .configure(configure_app::<TokioScheduler>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    house.close();
    result
}
