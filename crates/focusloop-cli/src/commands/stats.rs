use clap::Subcommand;
use focusloop_core::storage::Database;
use focusloop_core::DailyLedger;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's completed focus sessions (after day rollover)
    Today,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Today => {
            let db = Database::open()?;
            let mut ledger = DailyLedger::new(db);
            let record = ledger.record();
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
