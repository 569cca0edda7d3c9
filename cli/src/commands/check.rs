//! Check command - Loads and validates the configuration file.

use common::AppResult;
use config_backend_lib::config::DirectoryConfig;

/// Execute the check command
pub fn execute(config_path: &str) -> AppResult<()> {
    let config = DirectoryConfig::from_file(config_path)?;
    tracing::info!("Configuration {} is valid", config_path);

    println!("base DN:  {}", config.backend.base_dn);
    println!("users:    {}", config.users.len());
    println!("groups:   {}", config.groups.len());
    match config.backend.auth_url.as_deref() {
        Some(url) => println!("sso:      {}", config_backend_lib::client::endpoint(url)),
        None => println!("sso:      disabled"),
    }

    for user in config.users_without_primary_group() {
        println!(
            "warning: user {} has unknown primary group {}",
            user.name, user.primary_group
        );
    }

    Ok(())
}
