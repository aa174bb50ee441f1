//! ListSets verb.

use crate::error::ProviderError;
use crate::traits::DataProvider;
use crate::types::{ErrorCode, OaiError};

use super::params::RequestParams;
use super::{HandlerResult, ListSets, Payload, RESUMPTION_UNSUPPORTED, Rejection};

pub(super) async fn handle(provider: &dyn DataProvider, params: &RequestParams) -> HandlerResult {
    if params.contains("resumptionToken") {
        return Err(OaiError::new(ErrorCode::BadResumptionToken, RESUMPTION_UNSUPPORTED).into());
    }

    let no_sets = || OaiError::new(ErrorCode::NoSetHierarchy, "This repository does not support sets");

    let sets = provider.list_sets().await.map_err(|err| match err {
        ProviderError::NoSetHierarchy => Rejection::from(no_sets()),
        other => Rejection::from(other),
    })?;

    if sets.is_empty() {
        return Err(no_sets().into());
    }

    Ok(Payload::ListSets(ListSets {
        sets,
        resumption_token: None,
    }))
}
