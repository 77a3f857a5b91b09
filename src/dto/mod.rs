//! Wire-level data transfer objects.
//!
//! Field names follow the wire contract (camelCase JSON). `createDate` is
//! assigned by the server: the serializer never emits it, so an outbound
//! message cannot carry one by construction.

use serde::{Deserialize, Serialize};

use crate::session::SessionContext;

/// Broadcast discriminator, `type` on the wire.
///
/// Plain chat messages omit the field entirely; enter/exit broadcasts carry
/// it so the view can render them as system notices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    #[default]
    Chat,
    Enter,
    Exit,
}

impl MessageKind {
    /// Whether this kind renders as a system notice instead of a chat entry
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Enter | Self::Exit)
    }

    /// Whether this is the implicit chat kind (elided on the wire)
    pub fn is_chat(&self) -> bool {
        matches!(self, Self::Chat)
    }
}

/// Chat message as exchanged with the server, in both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message: String,
    pub chat_room_no: u64,
    pub user_no: u64,
    pub user_name: String,
    /// Server-assigned timestamp text; absent on anything this client sends
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub create_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "MessageKind::is_chat", default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Build an outbound chat message from the session and the raw input text
    pub fn outbound(session: &SessionContext, message: &str) -> Self {
        Self {
            message: message.to_string(),
            chat_room_no: session.chat_room_no,
            user_no: session.user_no,
            user_name: session.user_name.clone(),
            create_date: None,
            kind: MessageKind::Chat,
        }
    }

    /// Whether the message was sent by the session's own user
    pub fn is_own(&self, session: &SessionContext) -> bool {
        self.user_no == session.user_no
    }
}

/// Enter/exit notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceNotice {
    pub user_name: String,
    pub chat_room_no: u64,
    pub user_no: u64,
}

impl PresenceNotice {
    /// Build the payload announcing the session's user
    pub fn for_session(session: &SessionContext) -> Self {
        Self {
            user_name: session.user_name.clone(),
            chat_room_no: session.chat_room_no,
            user_no: session.user_no,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(7, "alice", 3, "http://127.0.0.1:8080")
    }

    #[test]
    fn test_outbound_message_never_serializes_create_date() {
        // テスト項目: 送信メッセージに createDate と type が含まれない
        // given (前提条件):
        let message = ChatMessage::outbound(&session(), "hello");

        // when (操作):
        let json = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert!(json.get("createDate").is_none());
        assert!(json.get("type").is_none());
        assert_eq!(json["message"], "hello");
        assert_eq!(json["chatRoomNo"], 3);
        assert_eq!(json["userNo"], 7);
        assert_eq!(json["userName"], "alice");
    }

    #[test]
    fn test_inbound_chat_message_carries_server_timestamp() {
        // テスト項目: 受信チャットメッセージは createDate を保持し kind は Chat になる
        // given (前提条件):
        let raw = r#"{"message":"hi","chatRoomNo":3,"userNo":8,"userName":"bob","createDate":"2026-08-05"}"#;

        // when (操作):
        let message: ChatMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(message.create_date.as_deref(), Some("2026-08-05"));
        assert_eq!(message.kind, MessageKind::Chat);
        assert!(!message.is_own(&session()));
    }

    #[test]
    fn test_inbound_enter_broadcast_is_a_notice() {
        // テスト項目: type が ENTER のメッセージは通知として扱われる
        // given (前提条件):
        let raw = r#"{"message":"bob joined the room.","chatRoomNo":3,"userNo":8,"userName":"bob","type":"ENTER"}"#;

        // when (操作):
        let message: ChatMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(message.kind, MessageKind::Enter);
        assert!(message.kind.is_notice());
    }

    #[test]
    fn test_presence_notice_field_names_match_the_wire() {
        // テスト項目: 入退場ペイロードのフィールド名が camelCase で出力される
        // given (前提条件):
        let notice = PresenceNotice::for_session(&session());

        // when (操作):
        let json = serde_json::to_value(&notice).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"userName": "alice", "chatRoomNo": 3, "userNo": 7})
        );
    }
}
