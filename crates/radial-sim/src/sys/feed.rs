use crate::events::{AppEvent, FrameInput};
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of the feed: a bare command word, or a JSON frame.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    match line.trim() {
        "" => None,
        "reload" => Some(AppEvent::ConfigReload),
        "load" => Some(AppEvent::SessionLoaded),
        "quit" => Some(AppEvent::Quit),
        frame => match serde_json::from_str::<FrameInput>(frame) {
            Ok(input) => Some(AppEvent::Frame(input)),
            Err(e) => {
                log::warn!("Skipping malformed frame: {}", e);
                None
            }
        },
    }
}

pub async fn run_feed(tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(event) = parse_line(&line)
                    && tx.send(event).await.is_err()
                {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read frame feed: {}", e);
                break;
            }
        }
    }

    let _ = tx.send(AppEvent::Quit).await;
}
