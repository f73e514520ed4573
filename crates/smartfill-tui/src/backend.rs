use tokio::sync::mpsc;

use smartfill_core::LoadError;
use smartfill_core::source;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Run the backend command listener until the command channel closes.
///
/// Each load runs as its own task so a slow source never blocks a newer
/// request. Cancelled loads report nothing: the popup already moved on.
pub async fn run(
    client: reqwest::Client,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Load(ticket) => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let result =
                        source::load_cancellable(&client, &ticket.spec, &ticket.cancel).await;
                    if matches!(result, Err(LoadError::Cancelled)) {
                        tracing::debug!(generation = ticket.generation, "load cancelled");
                        return;
                    }
                    let _ = tx.send(BackendEvent::Loaded {
                        generation: ticket.generation,
                        result,
                    });
                });
            }
        }
    }
}
