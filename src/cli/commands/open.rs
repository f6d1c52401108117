//! Open command - Create a ticket at Checked In

use std::path::Path;

use uuid::Uuid;

use crate::errors::Result;
use crate::schemas::Ticket;
use crate::store::TicketStore;

use super::Workspace;

/// Open a ticket in the configured shop and print its id
pub async fn run(
    cwd: Option<&Path>,
    client_id: &str,
    customer: &str,
    vehicle: &str,
    issue: &str,
) -> Result<()> {
    let workspace = Workspace::locate(cwd)?;
    let ticket = open_ticket(&workspace, client_id, customer, vehicle, issue).await?;
    println!("{}", ticket.id());
    Ok(())
}

pub(crate) async fn open_ticket(
    workspace: &Workspace,
    client_id: &str,
    customer: &str,
    vehicle: &str,
    issue: &str,
) -> Result<Ticket> {
    let ticket = Ticket::new(
        Uuid::new_v4().to_string(),
        workspace.config.shop_id.clone(),
        client_id.to_string(),
    )
    .with_details(customer, vehicle, issue);

    let ticket = workspace.store.create_ticket(ticket).await?;
    tracing::info!(ticket = ticket.id(), shop = ticket.shop_id(), "ticket opened");
    Ok(ticket)
}
