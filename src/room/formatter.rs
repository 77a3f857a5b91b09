//! Transcript entry formatting.

/// Width of the transcript rendering area in characters
pub const DISPLAY_WIDTH: usize = 72;

const DIM: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Entry formatter for transcript display
pub struct EntryFormatter;

impl EntryFormatter {
    /// Replace every literal two-character `\n` escape with a real line break.
    ///
    /// Message text travels with the escape sequence embedded; display is the
    /// only place where it becomes an actual break.
    pub fn unescape_newlines(text: &str) -> String {
        text.replace("\\n", "\n")
    }

    /// Format a message sent by the local user.
    ///
    /// Own entries are right-aligned and lead with the timestamp.
    ///
    /// # Arguments
    ///
    /// * `create_date` - Server-assigned timestamp text
    /// * `text` - Message text, possibly containing `\n` escapes
    pub fn format_self_chat(create_date: &str, text: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>width$}\n",
            format!("({})", create_date),
            width = DISPLAY_WIDTH
        ));
        for line in Self::unescape_newlines(text).lines() {
            out.push_str(&format!("{:>width$}\n", line, width = DISPLAY_WIDTH));
        }
        out
    }

    /// Format a message sent by another participant.
    ///
    /// Peer entries lead with the sender's name and trail with the timestamp.
    ///
    /// # Arguments
    ///
    /// * `user_name` - Display name of the sender
    /// * `text` - Message text, possibly containing `\n` escapes
    /// * `create_date` - Server-assigned timestamp text
    pub fn format_peer_chat(user_name: &str, text: &str, create_date: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}{}{}\n", BOLD, user_name, RESET));
        for line in Self::unescape_newlines(text).lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("  ({})\n", create_date));
        out
    }

    /// Format an enter/exit notice: a single centered, de-emphasized line
    /// with no timestamp and no sender.
    pub fn format_notice(text: &str) -> String {
        format!("{}{:^width$}{}\n", DIM, text, RESET, width = DISPLAY_WIDTH)
    }

    /// Format an inbound payload that failed to decode
    pub fn format_undecodable(raw: &str) -> String {
        format!("{}<- undecodable payload: {}{}\n", DIM, raw, RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_replaces_every_newline_escape() {
        // テスト項目: すべての \n エスケープが実際の改行に置き換わる
        // given (前提条件):
        let text = "first\\nsecond\\nthird";

        // when (操作):
        let result = EntryFormatter::unescape_newlines(text);

        // then (期待する結果):
        assert_eq!(result, "first\nsecond\nthird");
    }

    #[test]
    fn test_self_chat_leads_with_the_timestamp() {
        // テスト項目: 自分のメッセージはタイムスタンプが本文より先に表示される
        // given (前提条件):
        let create_date = "2026-08-05";
        let text = "hello";

        // when (操作):
        let result = EntryFormatter::format_self_chat(create_date, text);

        // then (期待する結果):
        let date_at = result.find("(2026-08-05)").unwrap();
        let text_at = result.find("hello").unwrap();
        assert!(date_at < text_at);
    }

    #[test]
    fn test_self_chat_is_right_aligned() {
        // テスト項目: 自分のメッセージ行は表示幅の右端に寄せられる
        // given (前提条件):
        let result = EntryFormatter::format_self_chat("2026-08-05", "hi");

        // when (操作):
        let text_line = result.lines().nth(1).unwrap();

        // then (期待する結果):
        assert_eq!(text_line.len(), DISPLAY_WIDTH);
        assert!(text_line.ends_with("hi"));
    }

    #[test]
    fn test_peer_chat_orders_name_then_text_then_timestamp() {
        // テスト項目: 相手のメッセージは名前、本文、タイムスタンプの順に並ぶ
        // given (前提条件):
        let result = EntryFormatter::format_peer_chat("bob", "hello", "2026-08-05");

        // when (操作):
        let name_at = result.find("bob").unwrap();
        let text_at = result.find("hello").unwrap();
        let date_at = result.find("(2026-08-05)").unwrap();

        // then (期待する結果):
        assert!(name_at < text_at);
        assert!(text_at < date_at);
    }

    #[test]
    fn test_escaped_newlines_render_as_separate_lines() {
        // テスト項目: \n エスケープを含む本文が複数行として描画される
        // given (前提条件):
        let result = EntryFormatter::format_peer_chat("bob", "one\\ntwo", "2026-08-05");

        // when (操作):
        let lines: Vec<&str> = result.lines().collect();

        // then (期待する結果):
        assert_eq!(lines[1].trim(), "one");
        assert_eq!(lines[2].trim(), "two");
        assert!(!result.contains("\\n"));
    }

    #[test]
    fn test_notice_is_centered_and_muted() {
        // テスト項目: 通知は表示幅の中央に寄せられ、減光色で描画される
        // given (前提条件):
        let result = EntryFormatter::format_notice("bob joined the room.");

        // when (操作):
        let stripped = result.replace(DIM, "").replace(RESET, "");
        let line = stripped.lines().next().unwrap();
        let leading = line.len() - line.trim_start().len();
        let trailing = line.len() - line.trim_end().len();

        // then (期待する結果):
        assert!(result.starts_with(DIM));
        assert_eq!(line.len(), DISPLAY_WIDTH);
        assert!(leading > 0);
        assert!(leading.abs_diff(trailing) <= 1);
        assert!(!result.contains('('));
    }
}
