use anyhow::Result;
use buddy_infrastructure::ConfigStorage;

use super::utils;

pub async fn get(storage: &ConfigStorage, key: &str) -> Result<()> {
    match utils::client(storage)?.metadata().get(key).await? {
        Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
        None => println!("{}: not set", key),
    }
    Ok(())
}

pub async fn set(storage: &ConfigStorage, key: &str, value: &str) -> Result<()> {
    let changed = utils::client(storage)?
        .metadata()
        .set(key, value, None, None)
        .await?;
    if changed {
        println!("✓ {} = {}", key, value);
    } else {
        println!("{} unchanged", key);
    }
    Ok(())
}
