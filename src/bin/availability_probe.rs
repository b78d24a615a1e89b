use canteen::{ApiConfig, AppContext};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Wires the full client stack against a live backend and prints what
/// the session would show: the table list for today and the slot
/// classification of the first table.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(base_url = %config.base_url, "probing canteen backend");

    // Wire the client stack and restore any mirrored commitment
    let mut ctx = AppContext::new(config)?;
    if let Some(reservation) = ctx.session.selected_reservation() {
        info!(
            table_id = reservation.table_id,
            start = %reservation.start_time,
            pending = reservation.is_pending(),
            "restored commitment from snapshot"
        );
    }

    // Unscoped table fetch: global current status
    ctx.session.refresh_tables().await?;
    let tables = ctx.session.tables().to_vec();
    info!(count = tables.len(), "tables fetched");
    for table in &tables {
        info!(
            number = table.number,
            capacity = table.capacity,
            status = ?table.status,
            "table"
        );
    }

    // Classify the operating day for the first table
    if let Some(first) = tables.first() {
        ctx.session.refresh_slot_statuses(first.id).await?;
        for entry in ctx.session.slot_statuses() {
            info!(slot = %entry.slot.id, status = ?entry.status, "slot");
        }
    }

    Ok(())
}
