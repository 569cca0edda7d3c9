//! Bind command - Authenticates a DN the way the directory server would.

use std::sync::Arc;

use common::{AppError, AppResult, InMemoryStats};
use config_backend_lib::{load_handler, Backend, ConnectionContext};

use crate::args::BindArgs;

/// Execute the bind command
pub async fn execute(args: BindArgs, config_path: &str) -> AppResult<()> {
    let stats = Arc::new(InMemoryStats::new());
    let handler = load_handler(config_path, stats.clone())?;

    let code = handler
        .bind(&args.dn, &args.password, &ConnectionContext::default())
        .await;
    println!("{}", code);

    for (key, value) in stats.snapshot() {
        tracing::debug!("{} = {}", key, value);
    }

    if code.is_success() {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}
