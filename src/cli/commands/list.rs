//! List command - Tickets of the configured shop

use std::path::Path;

use crate::domain::{is_terminal_stage, STAGE_COUNT};
use crate::errors::{Result, ShopError};
use crate::schemas::Ticket;
use crate::store::TicketStore;

use super::Workspace;

/// List tickets with their current stage
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let workspace = Workspace::locate(cwd)?;
    let tickets = workspace.store.list_tickets(&workspace.config.shop_id).await?;

    if json {
        let out = serde_json::to_string_pretty(&tickets)
            .map_err(|e| ShopError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if tickets.is_empty() {
        println!("No tickets in shop '{}'", workspace.config.shop_id);
        return Ok(());
    }

    for ticket in &tickets {
        println!("{}", ticket_line(ticket));
    }
    Ok(())
}

/// One row of the plain-text listing
fn ticket_line(ticket: &Ticket) -> String {
    let line = format!(
        "{}  {}/{} {:<18}  {} - {}",
        ticket.id(),
        ticket.stage_index() + 1,
        STAGE_COUNT,
        ticket.stage().label(),
        ticket.customer_name,
        ticket.vehicle
    );
    if is_terminal_stage(ticket.stage()) {
        format!("{}  [closed]", line)
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::apply_stage;
    use crate::schemas::Stage;

    #[test]
    fn test_ticket_line_shows_position_and_label() {
        let ticket = Ticket::new("t-5".to_string(), "east".to_string(), "c-1".to_string())
            .with_details("Ana", "2012 Civic", "Brakes");
        let ticket = apply_stage(&ticket, Stage::QualityCheck);

        let line = ticket_line(&ticket);
        assert!(line.starts_with("t-5  5/7 Quality Check"));
        assert!(line.ends_with("Ana - 2012 Civic"));
    }

    #[test]
    fn test_completed_ticket_marked_closed() {
        let ticket = Ticket::new("t-6".to_string(), "east".to_string(), "c-1".to_string());
        let ticket = apply_stage(&ticket, Stage::Completed);

        let line = ticket_line(&ticket);
        assert!(line.contains("7/7 Completed"));
        assert!(line.ends_with("[closed]"));
    }
}
