//! The chat hub state machine.
//!
//! [`ChatHub`] owns the client registry and the room history and is driven by an
//! [`ActorRunner`](crate::framework::ActorRunner), so every handler below runs to
//! completion before the next request is looked at.

use super::error::HubError;
use super::history::RoomHistory;
use crate::framework::{Actor, Address, ClientId, FrameworkError};
use crate::lifecycle::HubConfig;
use crate::model::{
    Broadcast, Connect, DirectMessage, HubCommand, HubRequest, ListUsersRequest,
    ListUsersResponse, Message, ServerEvent, SystemEvent,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One registered client.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub handle: Address<ServerEvent>,
    pub user_name: String,
    pub room: String,
}

/// Central chat hub: registry of connected clients grouped by room, rolling
/// history per room, fan-out of broadcasts and join/leave events, and routing
/// of direct messages.
pub struct ChatHub {
    default_room: String,
    clients: HashMap<ClientId, ClientInfo>,
    history: RoomHistory,
    // Clients whose mailbox was found closed during the current request.
    closed: Vec<ClientId>,
}

impl ChatHub {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            default_room: config.default_room.clone(),
            clients: HashMap::new(),
            history: RoomHistory::new(config.max_history),
            closed: Vec::new(),
        }
    }

    /// Applies one request, then removes any client whose mailbox turned out to be closed.
    pub fn apply(&mut self, request: HubRequest) -> Result<(), HubError> {
        let HubRequest { from, command } = request;
        let result = match command {
            HubCommand::Connect(msg) => self.connect(from, msg),
            HubCommand::Disconnect(_) => self.disconnect(from.id()),
            HubCommand::Message(msg) => self.post(from.id(), msg),
            HubCommand::DirectMessage(msg) => self.direct(msg),
            HubCommand::ListUsers(msg) => {
                self.list_users(&from, msg);
                Ok(())
            }
        };
        self.reap_closed();
        result
    }

    /// Registers the sender, replays the room's history to it, and tells the
    /// rest of the room.
    pub fn connect(&mut self, from: Address<ServerEvent>, msg: Connect) -> Result<(), HubError> {
        let key = from.id();
        if self.clients.contains_key(&key) {
            return Err(HubError::DuplicateConnect { client: key });
        }

        let room = self.room_or_default(msg.room);
        info!(user = %msg.user_name, %room, client = %key, "Joined");

        for broadcast in self.history.recent(&room) {
            deliver(
                &from,
                ServerEvent::Broadcast(Arc::clone(broadcast)),
                &mut self.closed,
            );
        }

        let event = SystemEvent::joined(&msg.user_name, &room);
        self.clients.insert(
            key,
            ClientInfo {
                handle: from,
                user_name: msg.user_name,
                room: room.clone(),
            },
        );
        self.broadcast_to_room(&room, Some(key), ServerEvent::System(event));
        Ok(())
    }

    /// Removes the sender and tells the rest of its room.
    pub fn disconnect(&mut self, key: ClientId) -> Result<(), HubError> {
        let info = self
            .clients
            .remove(&key)
            .ok_or(HubError::UnknownSenderOnDisconnect { client: key })?;

        info!(user = %info.user_name, room = %info.room, client = %key, "Left");
        let event = SystemEvent::left(&info.user_name, &info.room);
        self.broadcast_to_room(&info.room, Some(key), ServerEvent::System(event));
        Ok(())
    }

    /// Records a room message in history and fans it out to the room, minus the author.
    pub fn post(&mut self, key: ClientId, msg: Message) -> Result<(), HubError> {
        let info = self
            .clients
            .get(&key)
            .ok_or(HubError::UnknownSenderOnMessage { client: key })?;

        let room = if msg.room.is_empty() {
            info.room.clone()
        } else {
            msg.room
        };

        let broadcast = Arc::new(Broadcast {
            from_user: info.user_name.clone(),
            content: msg.content,
            room,
            sent_at: Utc::now(),
        });
        debug!(user = %broadcast.from_user, room = %broadcast.room, "Message");

        self.history.push(Arc::clone(&broadcast));
        let room = broadcast.room.clone();
        self.broadcast_to_room(&room, Some(key), ServerEvent::Broadcast(broadcast));
        Ok(())
    }

    /// Delivers a private message to the first client registered as `to_user`.
    ///
    /// User names are not unique; with duplicates the recipient is whichever
    /// match registry iteration reaches first, which is arbitrary.
    pub fn direct(&mut self, msg: DirectMessage) -> Result<(), HubError> {
        let target = self
            .clients
            .values()
            .find(|info| info.user_name == msg.to_user)
            .map(|info| info.handle.clone());

        let Some(target) = target else {
            return Err(HubError::RecipientNotFound {
                to_user: msg.to_user,
            });
        };

        debug!(from = %msg.from_user, to = %msg.to_user, "Direct message");
        let dm = DirectMessage::new(msg.from_user, msg.to_user, msg.content);
        deliver(&target, ServerEvent::Direct(dm), &mut self.closed);
        Ok(())
    }

    /// Replies to `from` with the names of users in the requested room.
    pub fn list_users(&mut self, from: &Address<ServerEvent>, msg: ListUsersRequest) {
        let room = self.room_or_default(msg.room);
        let user_names = self.users_in(&room);
        debug!(%room, count = user_names.len(), "List users");
        deliver(
            from,
            ServerEvent::Users(ListUsersResponse { user_names }),
            &mut self.closed,
        );
    }

    /// Names of users currently registered in `room`, in no particular order.
    pub fn users_in(&self, room: &str) -> Vec<String> {
        self.clients
            .values()
            .filter(|info| info.room == room)
            .map(|info| info.user_name.clone())
            .collect()
    }

    pub fn client(&self, key: ClientId) -> Option<&ClientInfo> {
        self.clients.get(&key)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn history(&self) -> &RoomHistory {
        &self.history
    }

    /// Drops all clients and history.
    pub fn reset(&mut self) {
        self.clients.clear();
        self.history.clear();
        self.closed.clear();
    }

    fn room_or_default(&self, room: String) -> String {
        if room.is_empty() {
            self.default_room.clone()
        } else {
            room
        }
    }

    fn broadcast_to_room(&mut self, room: &str, exclude: Option<ClientId>, event: ServerEvent) {
        for (key, info) in &self.clients {
            if Some(*key) == exclude || info.room != room {
                continue;
            }
            deliver(&info.handle, event.clone(), &mut self.closed);
        }
    }

    // Removing a client announces its departure, which can surface more closed
    // mailboxes, so keep going until the queue is empty.
    fn reap_closed(&mut self) {
        while let Some(key) = self.closed.pop() {
            let Some(info) = self.clients.remove(&key) else {
                continue;
            };
            info!(user = %info.user_name, room = %info.room, client = %key, "Reaped closed client");
            let event = SystemEvent::left(&info.user_name, &info.room);
            self.broadcast_to_room(&info.room, Some(key), ServerEvent::System(event));
        }
    }
}

/// Best-effort, non-blocking delivery. Closed mailboxes are queued for reaping.
fn deliver(to: &Address<ServerEvent>, event: ServerEvent, closed: &mut Vec<ClientId>) {
    match to.try_tell(event) {
        Ok(()) => {}
        Err(FrameworkError::ActorClosed) => {
            debug!(client = %to.id(), "Mailbox closed");
            closed.push(to.id());
        }
        Err(e) => debug!(client = %to.id(), error = %e, "Delivery dropped"),
    }
}

#[async_trait]
impl Actor for ChatHub {
    type Message = HubRequest;

    async fn on_start(&mut self) {
        info!(
            default_room = %self.default_room,
            max_history = self.history.capacity(),
            "Chat hub started, waiting for clients"
        );
    }

    async fn handle(&mut self, request: HubRequest) {
        if let Err(e) = self.apply(request) {
            warn!(error = %e, "Request dropped");
        }
    }

    async fn on_stop(&mut self) {
        self.reset();
        info!("Chat hub stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{probe, Probe};
    use crate::model::Disconnect;
    use tracing_test::traced_test;

    fn hub() -> ChatHub {
        ChatHub::new(&HubConfig::default())
    }

    fn join(hub: &mut ChatHub, name: &str, room: &str) -> (Address<ServerEvent>, Probe<ServerEvent>) {
        let (address, probe) = probe(64);
        hub.apply(HubRequest::new(address.clone(), Connect::new(name, room)))
            .unwrap();
        (address, probe)
    }

    fn say(hub: &mut ChatHub, from: &Address<ServerEvent>, content: &str) {
        hub.apply(HubRequest::new(from.clone(), Message::new("", content)))
            .unwrap();
    }

    fn system_text(event: ServerEvent) -> String {
        match event {
            ServerEvent::System(e) => e.text,
            other => panic!("expected system event, got {:?}", other),
        }
    }

    fn broadcast_content(event: ServerEvent) -> String {
        match event {
            ServerEvent::Broadcast(b) => b.content.clone(),
            other => panic!("expected broadcast, got {:?}", other),
        }
    }

    #[test]
    fn empty_room_defaults_to_general() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "");
        assert_eq!(hub.client(alice.id()).unwrap().room, "general");
        assert_eq!(hub.users_in("general"), vec!["alice".to_string()]);
    }

    #[test]
    fn join_notifies_others_but_not_self() {
        let mut hub = hub();
        let (_alice, mut alice_rx) = join(&mut hub, "alice", "general");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "general");

        assert_eq!(system_text(alice_rx.try_next().unwrap()), "bob joined general");
        alice_rx.assert_empty();
        bob_rx.assert_empty();
    }

    #[test]
    fn duplicate_connect_is_ignored_without_replay() {
        let mut hub = hub();
        let (alice, mut alice_rx) = join(&mut hub, "alice", "general");
        let (bob, _bob_rx) = join(&mut hub, "bob", "general");
        say(&mut hub, &bob, "hi");
        alice_rx.drain();

        let result = hub.apply(HubRequest::new(alice.clone(), Connect::new("alice", "general")));
        assert_eq!(result, Err(HubError::DuplicateConnect { client: alice.id() }));
        assert_eq!(hub.client_count(), 2);
        alice_rx.assert_empty();
    }

    #[test]
    fn history_is_capped_and_replayed_in_order() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        for n in 0..25 {
            say(&mut hub, &alice, &format!("m{n}"));
        }
        assert_eq!(hub.history().len("general"), 20);

        let (_bob, mut bob_rx) = join(&mut hub, "bob", "general");
        let replayed: Vec<_> = bob_rx.drain().into_iter().map(broadcast_content).collect();
        let expected: Vec<_> = (5..25).map(|n| format!("m{n}")).collect();
        assert_eq!(replayed, expected);
    }

    #[test]
    fn messages_stay_in_their_room() {
        let mut hub = hub();
        let (alice, mut alice_rx) = join(&mut hub, "alice", "a");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "b");
        let (_carol, mut carol_rx) = join(&mut hub, "carol", "a");
        alice_rx.drain();

        say(&mut hub, &alice, "only room a");

        assert_eq!(broadcast_content(carol_rx.try_next().unwrap()), "only room a");
        bob_rx.assert_empty();
        alice_rx.assert_empty();
        assert_eq!(hub.history().len("a"), 1);
        assert_eq!(hub.history().len("b"), 0);
    }

    #[test]
    fn room_override_posts_to_other_room() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "a");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "b");

        hub.apply(HubRequest::new(alice.clone(), Message::new("alice", "hello b").in_room("b")))
            .unwrap();

        match bob_rx.try_next().unwrap() {
            ServerEvent::Broadcast(b) => {
                assert_eq!(b.from_user, "alice");
                assert_eq!(b.room, "b");
            }
            other => panic!("expected broadcast, got {:?}", other),
        }
        assert_eq!(hub.history().len("b"), 1);
    }

    #[test]
    fn post_is_attributed_to_registered_name() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "general");

        hub.apply(HubRequest::new(alice, Message::new("mallory", "hi")))
            .unwrap();
        match bob_rx.try_next().unwrap() {
            ServerEvent::Broadcast(b) => assert_eq!(b.from_user, "alice"),
            other => panic!("expected broadcast, got {:?}", other),
        }
    }

    #[test]
    fn disconnect_notifies_room_and_is_idempotent() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "general");

        hub.apply(HubRequest::new(alice.clone(), Disconnect)).unwrap();
        assert_eq!(system_text(bob_rx.try_next().unwrap()), "alice left general");
        assert_eq!(hub.users_in("general"), vec!["bob".to_string()]);

        let again = hub.apply(HubRequest::new(alice.clone(), Disconnect));
        assert_eq!(again, Err(HubError::UnknownSenderOnDisconnect { client: alice.id() }));
        bob_rx.assert_empty();
    }

    #[test]
    fn unknown_sender_message_is_dropped() {
        let mut hub = hub();
        let (_alice, mut alice_rx) = join(&mut hub, "alice", "general");
        let (stranger, _stranger_rx) = probe(4);

        let result = hub.apply(HubRequest::new(stranger.clone(), Message::new("x", "spam")));
        assert_eq!(result, Err(HubError::UnknownSenderOnMessage { client: stranger.id() }));
        assert_eq!(hub.history().len("general"), 0);
        alice_rx.assert_empty();
    }

    #[test]
    fn direct_message_reaches_only_recipient() {
        let mut hub = hub();
        let (alice, mut alice_rx) = join(&mut hub, "alice", "general");
        let (_bob, mut bob_rx) = join(&mut hub, "bob", "general");
        let (_carol, mut carol_rx) = join(&mut hub, "carol", "general");
        alice_rx.drain();
        bob_rx.drain();

        hub.apply(HubRequest::new(alice, DirectMessage::new("alice", "bob", "psst")))
            .unwrap();

        match bob_rx.try_next().unwrap() {
            ServerEvent::Direct(dm) => {
                assert_eq!(dm.from_user, "alice");
                assert_eq!(dm.to_user, "bob");
                assert_eq!(dm.content, "psst");
            }
            other => panic!("expected direct message, got {:?}", other),
        }
        alice_rx.assert_empty();
        carol_rx.assert_empty();
        assert_eq!(hub.history().len("general"), 0);
    }

    #[test]
    fn direct_message_to_unknown_user_is_dropped() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        let result = hub.apply(HubRequest::new(alice, DirectMessage::new("alice", "zed", "?")));
        assert_eq!(
            result,
            Err(HubError::RecipientNotFound {
                to_user: "zed".into()
            })
        );
    }

    #[test]
    fn list_users_replies_to_requester() {
        let mut hub = hub();
        let (alice, mut alice_rx) = join(&mut hub, "alice", "general");
        let (_bob, _bob_rx) = join(&mut hub, "bob", "general");
        let (_carol, _carol_rx) = join(&mut hub, "carol", "other");
        alice_rx.drain();

        hub.apply(HubRequest::new(alice, ListUsersRequest::default()))
            .unwrap();
        match alice_rx.try_next().unwrap() {
            ServerEvent::Users(resp) => {
                let mut names = resp.user_names;
                names.sort();
                assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
            }
            other => panic!("expected user list, got {:?}", other),
        }
    }

    #[test]
    fn closed_mailbox_is_reaped_on_fan_out() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        let (bob, bob_rx) = join(&mut hub, "bob", "general");
        let (_carol, mut carol_rx) = join(&mut hub, "carol", "general");
        carol_rx.drain();

        bob_rx.close();
        say(&mut hub, &alice, "anyone there?");

        assert!(hub.client(bob.id()).is_none());
        let events = carol_rx.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ServerEvent::Broadcast(_)));
        assert_eq!(system_text(events[1].clone()), "bob left general");
    }

    #[test]
    fn reset_clears_everything() {
        let mut hub = hub();
        let (alice, _alice_rx) = join(&mut hub, "alice", "general");
        say(&mut hub, &alice, "hi");

        hub.reset();
        assert_eq!(hub.client_count(), 0);
        assert_eq!(hub.history().room_count(), 0);
        hub.reset();
        assert_eq!(hub.client_count(), 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn dropped_requests_are_logged() {
        let mut hub = hub();
        let (stranger, _rx) = probe(4);
        hub.handle(HubRequest::new(stranger, Disconnect)).await;
        assert!(logs_contain("Request dropped"));
        assert!(logs_contain("disconnect from unknown client"));
    }
}
