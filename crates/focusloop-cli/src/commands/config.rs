use clap::Subcommand;
use focusloop_core::storage::Database;
use focusloop_core::TimerSettings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "focus_minutes")
        key: String,
    },
    /// Set a settings value (minutes, must be >= 1)
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings values
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        ConfigAction::Get { key } => {
            let settings = TimerSettings::load(&db);
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = TimerSettings::load(&db);
            settings.set(&key, &value)?;
            settings.save(&db)?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = TimerSettings::load(&db);
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            TimerSettings::default().save(&db)?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
