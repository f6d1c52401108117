//! Stage command - Request a stage transition for a ticket

use std::path::Path;

use dialoguer::Confirm;

use crate::errors::Result;
use crate::session::{ConfirmOutcome, RequestOutcome, RollbackPrompt, StageSession};

use super::Workspace;

/// Request a move to `to` as `role`. Rollbacks ask for confirmation unless
/// `yes` is set.
pub async fn run(cwd: Option<&Path>, id: &str, role: &str, to: i64, yes: bool) -> Result<()> {
    let role = crate::cli::parse_role(role)?;
    let workspace = Workspace::locate(cwd)?;
    let mut session = StageSession::open(workspace.store.clone(), id, role)
        .await?
        .with_flash_duration(workspace.config.flash_duration());
    let mut events = session.subscribe();

    match session.request_stage(to).await? {
        RequestOutcome::Committed { from, to } => {
            println!("{}: {} -> {}", id, from, to);
        }
        RequestOutcome::Denied { reason } => {
            println!("{}: unchanged at {} ({})", id, session.ticket().stage(), reason);
        }
        RequestOutcome::AwaitingConfirmation(prompt) => {
            if yes || ask(&prompt).await {
                match session.confirm_rollback().await? {
                    ConfirmOutcome::Committed { from, to } => {
                        println!("{}: {} -> {}", id, from, to);
                    }
                    ConfirmOutcome::Discarded { reason } => {
                        println!("{}: rollback dropped ({})", id, reason);
                    }
                    ConfirmOutcome::NothingPending => {}
                }
            } else {
                session.cancel_rollback();
                println!("{}: rollback cancelled, still at {}", id, session.ticket().stage());
            }
        }
    }

    while let Ok(event) = events.try_recv() {
        if event.notifies_client() {
            println!("Client notice: {}", event.notice());
        }
    }
    Ok(())
}

async fn ask(prompt: &RollbackPrompt) -> bool {
    let text = prompt.notice.clone();
    tokio::task::spawn_blocking(move || {
        Confirm::new()
            .with_prompt(text)
            .default(false)
            .interact()
            .unwrap_or(false)
    })
    .await
    .unwrap_or(false)
}
