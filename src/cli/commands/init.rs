use crate::config::Config;

/// Write a starter config.toml with a freshly generated token secret.
pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Config file created with a generated token secret.");
        println!("Edit config.toml and run 'lectio serve'.");
    } else {
        println!("config.toml already exists. Nothing to do.");
    }

    Ok(())
}
