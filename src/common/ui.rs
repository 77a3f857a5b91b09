//! Terminal presentation helpers for the client.

use std::io::Write;

/// Redisplay the input prompt after transcript output interrupted it
pub fn redisplay_prompt(user_name: &str) {
    print!("{}> ", user_name);
    std::io::stdout().flush().ok();
}

/// Show a blocking-alert style warning: bell plus a highlighted line
pub fn show_alert(text: &str) {
    println!("\x07\x1b[33m! {}\x1b[0m", text);
}

/// Announce the post-exit navigation target
pub fn navigate_to(url: &str) {
    println!("\nLeaving room. Continue at {}", url);
}
