//! Room session execution: wiring the channel client to the room view.

use std::time::Duration;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::{
    channel::{ChannelClient, ChannelError, RoomChannel, WebSocketTransport},
    common::ui::{navigate_to, redisplay_prompt, show_alert},
    dto::{ChatMessage, PresenceNotice},
    history::fetch_room_history,
    room::{RoomView, SendOutcome},
    session::SessionContext,
};

const MAX_CONNECT_ATTEMPTS: u32 = 5;
const RETRY_INTERVAL_SECS: u64 = 5;

/// Prompt command that triggers the exit sequence
const EXIT_COMMAND: &str = "/exit";

/// Run the room client, retrying dropped connections a bounded number of
/// times with user-visible status between attempts.
///
/// Ends either after a completed exit sequence or once the retry attempts
/// are exhausted.
pub async fn run_room(
    endpoint: &str,
    session: SessionContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut attempts = 0;

    loop {
        attempts += 1;
        tracing::info!(
            "Connecting to {} as '{}' (attempt {}/{})",
            endpoint,
            session.user_name,
            attempts,
            MAX_CONNECT_ATTEMPTS
        );

        match run_room_session(endpoint, &session).await {
            Ok(()) => {
                tracing::info!("Room session ended normally");
                return Ok(());
            }
            Err(e) => {
                if attempts >= MAX_CONNECT_ATTEMPTS {
                    tracing::error!("Giving up after {} attempts: {}", attempts, e);
                    return Err(Box::new(e));
                }
                show_alert(&format!(
                    "Connection lost ({}). Reconnecting in {} seconds ({}/{})",
                    e, RETRY_INTERVAL_SECS, attempts, MAX_CONNECT_ATTEMPTS
                ));
                tokio::time::sleep(Duration::from_secs(RETRY_INTERVAL_SECS)).await;
            }
        }
    }
}

/// One connected room session, from handshake to exit or connection loss
async fn run_room_session(endpoint: &str, session: &SessionContext) -> Result<(), ChannelError> {
    let mut view = RoomView::new(session.clone());

    // Seed the transcript with the existing conversation; a failed fetch
    // leaves the room usable with an empty transcript.
    match fetch_room_history(&session.base_url, session.chat_room_no).await {
        Ok(history) => view.load_history(&history),
        Err(e) => tracing::warn!("Could not load room history: {}", e),
    }
    for line in view.transcript().visible_window() {
        println!("{}", line);
    }

    // Subscribe before anything is published, so the enter broadcast echo
    // cannot be missed.
    let channel = ChannelClient::connect(endpoint).await?;
    let mut room = channel.subscribe(&session.room_topic()).await?;

    let enter = serde_json::to_string(&PresenceNotice::for_session(session))?;
    room.publish(&session.enter_destination(), &[], &enter)
        .await?;

    println!(
        "\nYou are '{}' in room {}. Type a message and press Enter to send; '{}' leaves the room.\n",
        session.user_name, session.chat_room_no, EXIT_COMMAND
    );

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline_thread(session.user_name.clone(), input_tx);
    redisplay_prompt(&session.user_name);

    loop {
        tokio::select! {
            inbound = room.next_message() => match inbound {
                Some(Ok(body)) => handle_inbound(&mut view, &session.user_name, &body),
                Some(Err(e)) => return Err(e),
                None => return Err(ChannelError::Closed),
            },
            line = input_rx.recv() => match line {
                // Closed input (Ctrl+C / Ctrl+D) leaves like the exit command
                None => return leave_room(room, session).await,
                Some(line) if line == EXIT_COMMAND => return leave_room(room, session).await,
                Some(line) => {
                    view.set_input(line);
                    match view.send_typed_message() {
                        SendOutcome::Rejected { alert } => {
                            show_alert(alert);
                            redisplay_prompt(&session.user_name);
                        }
                        SendOutcome::Send(message) => {
                            let json = serde_json::to_string(&message)?;
                            room.publish(&session.message_destination(), &[], &json).await?;
                        }
                    }
                }
            }
        }
    }
}

/// Render one inbound payload and restore the prompt
fn handle_inbound(view: &mut RoomView, prompt_name: &str, body: &str) {
    let block = match serde_json::from_str::<ChatMessage>(body) {
        Ok(message) => view.render_incoming(&message).to_string(),
        Err(e) => {
            tracing::warn!("Undecodable inbound payload: {}", e);
            view.render_undecodable(body).to_string()
        }
    };
    print!("\n{}", block);
    redisplay_prompt(prompt_name);
}

/// Publish the exit notice, tear the channel down, then navigate.
///
/// Navigation strictly follows disconnect completion: leaving earlier would
/// keep the session visible on the server for several more seconds.
async fn leave_room(
    mut room: RoomChannel<WebSocketTransport>,
    session: &SessionContext,
) -> Result<(), ChannelError> {
    let exit = serde_json::to_string(&PresenceNotice::for_session(session))?;
    room.publish(&session.exit_destination(), &[], &exit)
        .await?;
    room.disconnect().await?;
    navigate_to(&session.room_list_url());
    Ok(())
}

/// Read typed lines on a dedicated thread and forward them untouched.
///
/// The view decides whether a line is sendable, so even empty lines are
/// forwarded. Dropping the sender ends the session loop through its exit
/// path.
fn spawn_readline_thread(user_name: String, input_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", user_name);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }
    });
}
