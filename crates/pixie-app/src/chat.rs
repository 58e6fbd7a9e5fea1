//! Interactive chat loop.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pixie_ai::{SendError, Session};
use pixie_common::PixieError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::render::ChatView;

/// Delay before the typing indicator appears, so instant replies don't flash it.
const TYPING_DELAY: Duration = Duration::from_millis(150);

/// Read lines from stdin until EOF or `/quit`, sending each to the session.
pub async fn run(session: Arc<Session>, view: &ChatView) -> pixie_common::Result<()> {
    println!("{}", view.header());
    if session.turn_count() == 0 {
        println!("{}\n", view.empty_state());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/usage" => {
                let usage = session.usage();
                println!(
                    "{} calls ({} failed), {} tokens in, {} tokens out",
                    usage.call_count(),
                    usage.failure_count(),
                    usage.total().input_tokens,
                    usage.total().output_tokens,
                );
            }
            text => {
                let _ = exchange(&session, view, text.to_string()).await?;
            }
        }
    }

    info!(session = %session.id(), turns = session.turn_count(), "Chat closed");
    Ok(())
}

/// Send one message, show the typing indicator while waiting, then print
/// every turn the send appended.
pub async fn exchange(
    session: &Arc<Session>,
    view: &ChatView,
    text: String,
) -> pixie_common::Result<Result<String, SendError>> {
    let before = session.turn_count();

    let mut task = {
        let session = Arc::clone(session);
        tokio::spawn(async move { session.send(text).await })
    };

    let mut typing_shown = false;
    let result = loop {
        tokio::select! {
            joined = &mut task => {
                break joined.map_err(|e| PixieError::Other(format!("send task failed: {e}")))?;
            }
            _ = tokio::time::sleep(TYPING_DELAY), if !typing_shown => {
                if session.typing_indicator().is_some() {
                    print!("{}", view.typing());
                    std::io::stdout().flush()?;
                    typing_shown = true;
                }
            }
        }
    };

    if typing_shown {
        // Erase the indicator line.
        print!("\r\x1b[2K");
    }
    for turn in session.turns().iter().skip(before) {
        println!("{}\n", view.turn(turn));
    }

    if let Err(ref e) = result {
        debug!(error = %e, "Send finished without a reply");
    }
    Ok(result)
}
