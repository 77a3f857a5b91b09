//! Room view: transcript rendering and input validation.

use crate::{dto::ChatMessage, session::SessionContext};

use super::{formatter::EntryFormatter, transcript::Transcript};

/// Alert shown when the user tries to send an empty message
pub const EMPTY_INPUT_ALERT: &str = "Please type at least one character.";

/// Default number of transcript rows visible at once
pub const DEFAULT_VIEWPORT_ROWS: usize = 20;

/// Outcome of a send attempt
#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Validation failed and nothing is transmitted; the field is cleared and
    /// focus returns to the input
    Rejected { alert: &'static str },
    /// The message to transmit, carrying the raw untrimmed input
    Send(ChatMessage),
}

/// The visible room: transcript state plus the pending input field
pub struct RoomView {
    session: SessionContext,
    transcript: Transcript,
    input: String,
}

impl RoomView {
    pub fn new(session: SessionContext) -> Self {
        Self::with_viewport(session, DEFAULT_VIEWPORT_ROWS)
    }

    pub fn with_viewport(session: SessionContext, viewport_rows: usize) -> Self {
        Self {
            session,
            transcript: Transcript::new(viewport_rows),
            input: String::new(),
        }
    }

    /// Seed the transcript with the room's existing conversation, landing on
    /// the most recent entry.
    pub fn load_history(&mut self, history: &[ChatMessage]) {
        for message in history {
            self.render_incoming(message);
        }
    }

    /// Replace the input field content with the typed-but-unsent text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Validate the input field and build the outbound message.
    ///
    /// Whitespace-only input is rejected with a user-facing alert and nothing
    /// is transmitted. Valid input produces exactly one message carrying the
    /// raw untrimmed text. The field is cleared on both paths.
    pub fn send_typed_message(&mut self) -> SendOutcome {
        let raw = std::mem::take(&mut self.input);
        if raw.trim().is_empty() {
            return SendOutcome::Rejected {
                alert: EMPTY_INPUT_ALERT,
            };
        }
        SendOutcome::Send(ChatMessage::outbound(&self.session, &raw))
    }

    /// Render an inbound message and return the appended block.
    ///
    /// Enter/exit broadcasts render as system notices. Chat messages branch
    /// on the sender: the session's own messages are self-styled (timestamp
    /// first), every other sender peer-styled (name first).
    pub fn render_incoming(&mut self, message: &ChatMessage) -> &str {
        let block = if message.kind.is_notice() {
            EntryFormatter::format_notice(&message.message)
        } else {
            let date = message.create_date.as_deref().unwrap_or("");
            if message.is_own(&self.session) {
                EntryFormatter::format_self_chat(date, &message.message)
            } else {
                EntryFormatter::format_peer_chat(&message.user_name, &message.message, date)
            }
        };
        self.transcript.append(block)
    }

    /// Append a standalone system notice not tied to a wire message
    pub fn render_system_notice(&mut self, text: &str) -> &str {
        self.transcript.append(EntryFormatter::format_notice(text))
    }

    /// Append a fallback block for a payload that failed to decode
    pub fn render_undecodable(&mut self, raw: &str) -> &str {
        self.transcript
            .append(EntryFormatter::format_undecodable(raw))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::MessageKind;

    fn session() -> SessionContext {
        SessionContext::new(7, "alice", 3, "http://127.0.0.1:8080")
    }

    fn inbound(user_no: u64, user_name: &str, message: &str) -> ChatMessage {
        ChatMessage {
            message: message.to_string(),
            chat_room_no: 3,
            user_no,
            user_name: user_name.to_string(),
            create_date: Some("2026-08-05".to_string()),
            kind: MessageKind::Chat,
        }
    }

    #[test]
    fn test_whitespace_only_input_is_rejected_and_cleared() {
        // テスト項目: 空白のみの入力は送信されず、フィールドがクリアされる
        // given (前提条件):
        let mut view = RoomView::new(session());
        view.set_input("   \t ");

        // when (操作):
        let outcome = view.send_typed_message();

        // then (期待する結果):
        assert_eq!(
            outcome,
            SendOutcome::Rejected {
                alert: EMPTY_INPUT_ALERT
            }
        );
        assert_eq!(view.input(), "");
    }

    #[test]
    fn test_valid_input_sends_the_raw_untrimmed_text() {
        // テスト項目: 有効な入力は未トリムのまま 1 件だけ送信され、フィールドがクリアされる
        // given (前提条件):
        let mut view = RoomView::new(session());
        view.set_input("  hello there  ");

        // when (操作):
        let outcome = view.send_typed_message();

        // then (期待する結果):
        match outcome {
            SendOutcome::Send(message) => {
                assert_eq!(message.message, "  hello there  ");
                assert_eq!(message.chat_room_no, 3);
                assert_eq!(message.user_no, 7);
                assert_eq!(message.user_name, "alice");
                assert_eq!(message.create_date, None);
            }
            other => panic!("expected a send, got {:?}", other),
        }
        assert_eq!(view.input(), "");
    }

    #[test]
    fn test_own_message_renders_self_styled() {
        // テスト項目: 自分の userNo のメッセージはタイムスタンプ先行で描画される
        // given (前提条件):
        let mut view = RoomView::new(session());
        let message = inbound(7, "alice", "mine");

        // when (操作):
        let block = view.render_incoming(&message).to_string();

        // then (期待する結果):
        assert!(block.find("(2026-08-05)").unwrap() < block.find("mine").unwrap());
        assert!(!block.contains("alice"));
    }

    #[test]
    fn test_peer_message_renders_name_first() {
        // テスト項目: 他人のメッセージは名前が本文より先、タイムスタンプが最後になる
        // given (前提条件):
        let mut view = RoomView::new(session());
        let message = inbound(8, "bob", "hello alice");

        // when (操作):
        let block = view.render_incoming(&message).to_string();

        // then (期待する結果):
        let name_at = block.find("bob").unwrap();
        let text_at = block.find("hello alice").unwrap();
        let date_at = block.find("(2026-08-05)").unwrap();
        assert!(name_at < text_at);
        assert!(text_at < date_at);
    }

    #[test]
    fn test_newline_escapes_render_as_line_breaks() {
        // テスト項目: \n エスケープを含む受信メッセージが複数行で描画される
        // given (前提条件):
        let mut view = RoomView::new(session());
        let message = inbound(8, "bob", "first\\nsecond");

        // when (操作):
        let block = view.render_incoming(&message).to_string();

        // then (期待する結果):
        assert!(!block.contains("\\n"));
        assert!(block.lines().any(|line| line.trim() == "first"));
        assert!(block.lines().any(|line| line.trim() == "second"));
    }

    #[test]
    fn test_enter_broadcast_renders_as_notice() {
        // テスト項目: ENTER ブロードキャストは通知として描画され、名前も日付も付かない
        // given (前提条件):
        let mut view = RoomView::new(session());
        let mut message = inbound(8, "bob", "bob joined the room.");
        message.kind = MessageKind::Enter;
        message.create_date = None;

        // when (操作):
        let block = view.render_incoming(&message).to_string();

        // then (期待する結果):
        assert!(block.contains("bob joined the room."));
        assert_eq!(block.lines().count(), 1);
        assert!(!block.contains('('));
    }

    #[test]
    fn test_transcript_stays_pinned_to_the_bottom() {
        // テスト項目: 履歴読み込み後も新規追記後もスクロール位置が最大値に一致する
        // given (前提条件):
        let mut view = RoomView::with_viewport(session(), 3);
        let history: Vec<ChatMessage> = (0..5)
            .map(|i| inbound(8, "bob", &format!("message {}", i)))
            .collect();

        // when (操作):
        view.load_history(&history);

        // then (期待する結果):
        let transcript = view.transcript();
        assert!(transcript.max_scroll() > 0);
        assert_eq!(transcript.scroll_top(), transcript.max_scroll());

        // when (操作): 新しいメッセージを追記
        view.render_incoming(&inbound(7, "alice", "latest"));

        // then (期待する結果):
        let transcript = view.transcript();
        assert_eq!(transcript.scroll_top(), transcript.max_scroll());
        let window = transcript.visible_window().join("\n");
        assert!(window.contains("latest"));
    }
}
