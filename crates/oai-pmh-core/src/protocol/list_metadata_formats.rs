//! ListMetadataFormats verb.

use crate::error::ProviderError;
use crate::traits::DataProvider;
use crate::types::{ErrorCode, OaiError};

use super::params::RequestParams;
use super::{HandlerResult, ListMetadataFormats, Payload, Rejection};

pub(super) async fn handle(provider: &dyn DataProvider, params: &RequestParams) -> HandlerResult {
    let identifier = params.get("identifier");

    let metadata_formats = provider
        .list_metadata_formats(identifier)
        .await
        .map_err(|err| -> Rejection {
            match (err, identifier) {
                (ProviderError::IdDoesNotExist { .. }, Some(id)) => OaiError::new(
                    ErrorCode::IdDoesNotExist,
                    format!("Record with identifier \"{}\" does not exist", id),
                )
                .into(),
                (ProviderError::NoMetadataFormats, Some(id)) => OaiError::new(
                    ErrorCode::NoMetadataFormats,
                    format!("No metadata schema found for record \"{}\"", id),
                )
                .into(),
                (ProviderError::NoMetadataFormats, None) => OaiError::new(
                    ErrorCode::NoMetadataFormats,
                    "No metadata formats are available in this repository",
                )
                .into(),
                (other, _) => Rejection::from(other),
            }
        })?;

    Ok(Payload::ListMetadataFormats(ListMetadataFormats {
        metadata_formats,
    }))
}
