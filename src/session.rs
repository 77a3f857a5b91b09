//! Immutable per-room session context.

/// Identity and room selection shared read-only by every component.
///
/// Built once from the CLI arguments and passed into the channel client and
/// the room view at construction; never reassigned for the lifetime of the
/// session. `base_url` is the application root used for the history fetch and
/// the post-exit redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_no: u64,
    pub user_name: String,
    pub chat_room_no: u64,
    pub base_url: String,
}

impl SessionContext {
    pub fn new(
        user_no: u64,
        user_name: impl Into<String>,
        chat_room_no: u64,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            user_no,
            user_name: user_name.into(),
            chat_room_no,
            base_url,
        }
    }

    /// Broadcast topic of the room
    pub fn room_topic(&self) -> String {
        format!("/topic/room/{}", self.chat_room_no)
    }

    /// Destination consumed by the server's enter handler
    pub fn enter_destination(&self) -> String {
        format!("/app/chat/enter/{}", self.chat_room_no)
    }

    /// Destination consumed by the server's exit handler
    pub fn exit_destination(&self) -> String {
        format!("/app/chat/exit/{}", self.chat_room_no)
    }

    /// Destination consumed by the server's chat relay
    pub fn message_destination(&self) -> String {
        format!("/app/chat/message/{}", self.chat_room_no)
    }

    /// Room-listing page shown after leaving the room
    pub fn room_list_url(&self) -> String {
        format!("{}/chat/chatRoomList", self.base_url)
    }
}
