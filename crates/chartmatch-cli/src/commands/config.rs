use anyhow::Result;
use chartmatch_engine::{config, Config};

/// Create the default config file if it doesn't exist.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let path = config::config_file_path();

    if created {
        println!("Created config file: {}", path.display());
        println!("Edit it to add your catalog credentials.");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  catalog_base_url: {}", config.catalog_base_url);
    println!("  token_url: {}", config.token_url);
    println!(
        "  client_id: {}",
        config.client_id.as_deref().unwrap_or("<not set>")
    );
    println!(
        "  client_secret: {}",
        if config.client_secret.is_some() { "<set>" } else { "<not set>" }
    );
    println!(
        "  access_token: {}",
        if config.access_token.is_some() { "<set>" } else { "<not set>" }
    );
    println!(
        "  user_id: {}",
        config.user_id.as_deref().unwrap_or("<not set>")
    );
    println!("  search_limit: {}", config.search_limit);
    println!("  batch_size: {}", config.batch_size);
    println!("  entry_pause_ms: {}", config.entry_pause_ms);
    println!("  batch_pause_ms: {}", config.batch_pause_ms);
    println!("  report_path: {}", config.report_path.display());

    println!("\nPriority: CLI args > ENV vars (CM_*) > Config file > Defaults");

    Ok(())
}
