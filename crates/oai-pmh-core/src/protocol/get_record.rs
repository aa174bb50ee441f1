//! GetRecord verb.

use crate::error::ProviderError;
use crate::traits::DataProvider;
use crate::types::{ErrorCode, MetadataPrefix, OaiError};

use super::params::RequestParams;
use super::{GetRecord, HandlerResult, Payload, Rejection};

pub(super) async fn handle(provider: &dyn DataProvider, params: &RequestParams) -> HandlerResult {
    let identifier = params.get("identifier").ok_or_else(|| {
        OaiError::bad_argument("Missing required query parameter: \"identifier\"")
    })?;
    let prefix = required_prefix(params)?;

    let record = provider
        .get_record(identifier, prefix)
        .await
        .map_err(|err| -> Rejection {
            match err {
                ProviderError::IdDoesNotExist { .. } => OaiError::new(
                    ErrorCode::IdDoesNotExist,
                    format!("Record with identifier \"{}\" does not exist", identifier),
                )
                .into(),
                ProviderError::CannotDisseminateFormat { .. } => OaiError::new(
                    ErrorCode::CannotDisseminateFormat,
                    format!(
                        "The metadata schema \"{}\" is not available for record \"{}\"",
                        prefix, identifier
                    ),
                )
                .into(),
                other => Rejection::from(other),
            }
        })?;

    Ok(Payload::GetRecord(GetRecord { record }))
}

/// Read and validate a mandatory `metadataPrefix`.
pub(super) fn required_prefix(params: &RequestParams) -> Result<MetadataPrefix, OaiError> {
    let value = params.get("metadataPrefix").ok_or_else(|| {
        OaiError::bad_argument("Missing required query parameter: \"metadataPrefix\"")
    })?;

    value.parse().map_err(|_| {
        OaiError::bad_argument(format!(
            "Unknown value used for query parameter \"metadataPrefix\": {}",
            value
        ))
    })
}
