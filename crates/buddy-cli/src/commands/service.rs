use anyhow::Result;
use buddy_infrastructure::ConfigStorage;

use super::utils;

pub async fn ping(storage: &ConfigStorage) -> Result<()> {
    let answer = utils::client(storage)?.ping().await?;
    println!("{}", answer.unwrap_or_else(|| "(empty answer)".to_string()));
    Ok(())
}

pub async fn time(storage: &ConfigStorage) -> Result<()> {
    match utils::client(storage)?.service_time().await? {
        Some(time) => println!("{}", time),
        None => println!("(no time reported)"),
    }
    Ok(())
}

pub async fn version(storage: &ConfigStorage) -> Result<()> {
    let version = utils::client(storage)?.service_version().await?;
    println!("{}", version.unwrap_or_else(|| "unknown".to_string()));
    Ok(())
}
