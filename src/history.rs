//! Room history retrieval over HTTP.

use thiserror::Error;

use crate::dto::ChatMessage;

/// History fetch errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// URL of the room's message history endpoint
pub fn history_url(base_url: &str, chat_room_no: u64) -> String {
    format!(
        "{}/chat/room/{}/messages",
        base_url.trim_end_matches('/'),
        chat_room_no
    )
}

/// Fetch the messages already exchanged in the room.
///
/// Called once at join so the transcript opens on the existing conversation.
pub async fn fetch_room_history(
    base_url: &str,
    chat_room_no: u64,
) -> Result<Vec<ChatMessage>, HistoryError> {
    let url = history_url(base_url, chat_room_no);
    let response = reqwest::get(&url).await?.error_for_status()?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_url_embeds_room_number() {
        // テスト項目: 履歴エンドポイント URL に部屋番号が埋め込まれる
        // given (前提条件):
        let base = "http://127.0.0.1:8080/";

        // when (操作):
        let url = history_url(base, 3);

        // then (期待する結果):
        assert_eq!(url, "http://127.0.0.1:8080/chat/room/3/messages");
    }
}
