//! Identify verb.

use crate::traits::DataProvider;
use crate::types::OaiError;

use super::params::RequestParams;
use super::{HandlerResult, Payload};

/// Identify takes no arguments besides `verb`.
pub(super) async fn handle(
    provider: &dyn DataProvider,
    base_url: &str,
    params: &RequestParams,
) -> HandlerResult {
    if params.names().any(|name| name != "verb") {
        return Err(OaiError::bad_argument(
            "Request with verb \"Identify\" does not allow query parameters",
        )
        .into());
    }

    // No domain condition applies here; any provider error is a fault.
    let identify = provider.identify(base_url).await?;
    Ok(Payload::Identify(identify))
}
