//! Top-level request classification and routing.

use tracing::{debug, instrument};

use crate::Result;
use crate::traits::DataProvider;
use crate::types::{OaiError, Verb};

use super::params::RequestParams;
use super::{Outcome, Rejection, get_record, identify, list, list_metadata_formats, list_sets};

/// Validate the global argument set and route to the verb handler.
///
/// The checks run in a fixed order and the first failure wins:
/// unrecognized argument names, repeated arguments, missing `verb`, unknown
/// `verb`. Everything past that is the chosen handler's business.
///
/// # Errors
///
/// Returns an error only when the data provider faults. Protocol errors are
/// returned as `Ok(Err(..))`.
#[instrument(skip_all, fields(verb = params.get("verb").unwrap_or_default()))]
pub async fn dispatch(
    provider: &dyn DataProvider,
    base_url: &str,
    params: &RequestParams,
) -> Result<Outcome> {
    let unrecognized = params.unrecognized();
    if !unrecognized.is_empty() {
        return Ok(Err(OaiError::bad_argument(format!(
            "The following query parameters are not supported: {}",
            unrecognized.join(", ")
        ))));
    }

    let repeated = params.repeated();
    if !repeated.is_empty() {
        return Ok(Err(OaiError::bad_argument(format!(
            "The following query parameters may only be given once: {}",
            repeated.join(", ")
        ))));
    }

    let Some(verb) = params.get("verb") else {
        return Ok(Err(OaiError::bad_verb(
            "Missing required query parameter: \"verb\"",
        )));
    };

    let Ok(verb) = verb.parse::<Verb>() else {
        return Ok(Err(OaiError::bad_verb(format!(
            "Invalid value used for query parameter \"verb\": {}",
            verb
        ))));
    };

    debug!(%verb, "Routing request");

    let result = match verb {
        Verb::Identify => identify::handle(provider, base_url, params).await,
        Verb::GetRecord => get_record::handle(provider, params).await,
        Verb::ListRecords => list::handle_records(provider, params).await,
        Verb::ListIdentifiers => list::handle_identifiers(provider, params).await,
        Verb::ListMetadataFormats => list_metadata_formats::handle(provider, params).await,
        Verb::ListSets => list_sets::handle(provider, params).await,
    };

    match result {
        Ok(payload) => Ok(Ok(payload)),
        Err(Rejection::Protocol(err)) => {
            debug!(code = %err.code, message = %err.message, "Request rejected");
            Ok(Err(err))
        }
        Err(Rejection::Fault(err)) => Err(err),
    }
}
