//! Show command - Render a ticket's stage track

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::display::{render_to_lines, StageTrackView};
use crate::errors::{Result, ShopError};
use crate::schemas::Ticket;
use crate::store::TicketStore;

use super::Workspace;

const TRACK_WIDTH: u16 = 61;

#[derive(Serialize)]
struct ShowOutput<'a> {
    ticket: &'a Ticket,
    track: StageTrackView,
}

/// Show a ticket and its progress track as seen by `role`
pub async fn run(cwd: Option<&Path>, id: &str, role: &str, json: bool) -> Result<()> {
    let role = crate::cli::parse_role(role)?;
    let workspace = Workspace::locate(cwd)?;
    let ticket = workspace.store.get_ticket(id).await?;
    let track = StageTrackView::build(ticket.stage(), role, None, Utc::now());

    if json {
        let out = serde_json::to_string_pretty(&ShowOutput {
            ticket: &ticket,
            track,
        })
        .map_err(|e| ShopError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Ticket   {}", ticket.id());
    println!("Customer {}", ticket.customer_name);
    println!("Vehicle  {}", ticket.vehicle);
    println!("Issue    {}", ticket.issue);
    println!();
    for line in render_to_lines(&track, TRACK_WIDTH) {
        println!("{}", line.trim_end());
    }

    let clickable: Vec<String> = track
        .affordant_stages()
        .iter()
        .map(|s| s.index().to_string())
        .collect();
    if !clickable.is_empty() {
        println!();
        println!("{} can move to: {}", role, clickable.join(", "));
    }
    Ok(())
}
