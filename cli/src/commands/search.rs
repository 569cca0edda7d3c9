//! Search command - Prints synthesized entries as LDIF.

use std::sync::Arc;

use common::{AppError, AppResult, NoopStats};
use config_backend_lib::{load_handler, Backend, ConnectionContext, SearchRequest};

use crate::args::SearchArgs;

/// Execute the search command
pub async fn execute(args: SearchArgs, config_path: &str) -> AppResult<()> {
    let handler = load_handler(config_path, Arc::new(NoopStats))?;

    let base = args
        .base
        .unwrap_or_else(|| handler.config().backend.base_dn.clone());
    let filter = if args.object_class.is_empty() {
        "(objectClass=*)".to_string()
    } else {
        format!("(objectClass={})", args.object_class)
    };
    let request = SearchRequest::new(base, filter, Some(args.object_class));

    let result = handler
        .search(&args.bind_dn, &request, &ConnectionContext::default())
        .await;

    if !result.result_code.is_success() {
        let message = result.diagnostic.unwrap_or_default();
        return Err(AppError::operations(format!(
            "{}: {}",
            result.result_code, message
        )));
    }

    for entry in &result.entries {
        println!("{}", entry);
    }
    tracing::info!("{} entries", result.entries.len());
    Ok(())
}
