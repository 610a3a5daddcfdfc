use anyhow::Result;
use buddy_infrastructure::ConfigStorage;

use super::utils;

pub async fn login(storage: &ConfigStorage, username: &str, password: &str) -> Result<()> {
    let client = utils::client(storage)?;
    let user = client.login(username, password).await?;

    println!("{}", serde_json::to_string_pretty(user.profile())?);
    println!("token: {}", user.token().expose());
    if client.device_registration_failed() {
        eprintln!("warning: device registration after login failed");
    }
    Ok(())
}
