use anyhow::Result;
use buddy_infrastructure::ConfigStorage;

pub fn show(storage: &ConfigStorage) -> Result<()> {
    let mut config = storage.load()?;
    if !config.app_password.is_empty() {
        config.app_password = "********".to_string();
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

pub fn path(storage: &ConfigStorage) {
    println!("{}", storage.path().display());
}
