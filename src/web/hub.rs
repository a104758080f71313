use std::collections::HashMap;

use actix::prelude::*;
use log::debug;
use parking_lot::Mutex;
use uuid::Uuid;

use super::types::ServerMsg;

/// A message pushed to one WebSocket session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Push(pub ServerMsg);

/// Live WebSocket sessions, for messages that go to every connection.
#[derive(Default)]
pub struct SessionHub {
    sessions: Mutex<HashMap<Uuid, Recipient<Push>>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Push>) {
        self.sessions.lock().insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.sessions.lock().remove(&conn_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn broadcast(&self, msg: ServerMsg) {
        let sessions = self.sessions.lock();
        debug!("Broadcasting to {} sessions", sessions.len());
        for recipient in sessions.values() {
            recipient.do_send(Push(msg.clone()));
        }
    }
}
