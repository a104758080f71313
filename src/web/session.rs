use std::collections::HashSet;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::domain::{handle, AuctionState, Command, CommandSuccess, Observer, ObserverError, Scheduler};
use super::hub::Push;
use super::types::{AppState, ClientMsg, ObserverKey, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade<S: Scheduler>(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState<S>>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), data.get_ref().clone());
    ws::start(session, &req, stream)
}

/// Forwards state updates for one UI component to its session's mailbox.
struct ComponentObserver {
    component_id: String,
    recipient: Recipient<Push>,
}

impl Observer for ComponentObserver {
    fn update(&self, state: &AuctionState) -> Result<(), ObserverError> {
        let msg = ServerMsg::AuctionUpdate {
            component_id: self.component_id.clone(),
            state: state.clone(),
        };
        if !self.recipient.connected() {
            return Err(ObserverError::Disconnected);
        }
        self.recipient.do_send(Push(msg));
        Ok(())
    }
}

pub struct WsSession<S: Scheduler> {
    conn_id: Uuid,
    app: AppState<S>,
    components: HashSet<String>,
    last_heartbeat: Instant,
}

impl<S: Scheduler> WsSession<S> {
    fn new(conn_id: Uuid, app: AppState<S>) -> Self {
        Self {
            conn_id,
            app,
            components: HashSet::new(),
            last_heartbeat: Instant::now(),
        }
    }

    fn key(&self, component_id: &str) -> String {
        ObserverKey::new(self.conn_id, component_id).to_string()
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!("Failed to serialize outbound message: {}", err),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        Self::send_json(ctx, &ServerMsg::AuctionError { message: message.into() });
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!("Connection {} timed out", actor.conn_id);
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::AttachObserver { component_id } => {
                let observer = ComponentObserver {
                    component_id: component_id.clone(),
                    recipient: ctx.address().recipient(),
                };
                self.app.house.attach(self.key(&component_id), Box::new(observer));
                self.components.insert(component_id);
            }

            ClientMsg::DetachObserver { component_id } => {
                self.app.house.detach(&self.key(&component_id));
                self.components.remove(&component_id);
            }

            ClientMsg::PlaceBid { bidder_name, bid_amount } => {
                let command = Command::PlaceBid {
                    bidder: bidder_name,
                    amount: bid_amount,
                };
                if let Err(err) = handle(command, &*self.app.house) {
                    Self::send_error(ctx, err.to_string());
                }
            }

            ClientMsg::StartNewAuction => {
                info!("Client {} requested new auction", self.conn_id);
                match handle(Command::StartNewAuction, &*self.app.house) {
                    Ok(CommandSuccess::AuctionStarted { state }) => {
                        self.app.hub.broadcast(ServerMsg::NewAuctionStarted { state });
                    }
                    Ok(_) => {}
                    Err(err) => Self::send_error(ctx, err.to_string()),
                }
            }
        }
    }
}

impl<S: Scheduler> Actor for WsSession<S> {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("User connected: {}", self.conn_id);
        self.app.hub.register(self.conn_id, ctx.address().recipient());
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.app.hub.unregister(self.conn_id);
        for component_id in self.components.drain().collect::<Vec<_>>() {
            self.app.house.detach(&self.key(&component_id));
        }
        info!("User disconnected: {}", self.conn_id);
    }
}

impl<S: Scheduler> Handler<Push> for WsSession<S> {
    type Result = ();

    fn handle(&mut self, msg: Push, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg.0);
    }
}

impl<S: Scheduler> StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession<S> {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => Self::send_error(ctx, format!("Malformed message: {}", err)),
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Binary(_)) => {
                Self::send_error(ctx, "Binary messages are not supported");
            }
            Ok(_) => {}
            Err(err) => {
                warn!("WebSocket protocol error on {}: {}", self.conn_id, err);
                ctx.stop();
            }
        }
    }
}
