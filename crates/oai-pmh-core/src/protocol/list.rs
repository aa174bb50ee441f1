//! ListRecords and ListIdentifiers verbs.
//!
//! Both verbs take the same arguments and differ only in whether full
//! records or bare headers come back.

use crate::error::ProviderError;
use crate::traits::{DataProvider, ListQuery};
use crate::types::{Datestamp, ErrorCode, OaiError, Verb};

use super::get_record::required_prefix;
use super::params::RequestParams;
use super::{
    HandlerResult, ListIdentifiers, ListRecords, Payload, RESUMPTION_UNSUPPORTED, Rejection,
};

pub(super) async fn handle_records(
    provider: &dyn DataProvider,
    params: &RequestParams,
) -> HandlerResult {
    let query = selection(Verb::ListRecords, params)?;

    let records = provider
        .list_records(&query)
        .await
        .map_err(|err| no_match(err, "records"))?;

    if records.is_empty() {
        return Err(no_match(ProviderError::NoRecordsMatch, "records"));
    }

    Ok(Payload::ListRecords(ListRecords {
        records,
        resumption_token: None,
    }))
}

pub(super) async fn handle_identifiers(
    provider: &dyn DataProvider,
    params: &RequestParams,
) -> HandlerResult {
    let query = selection(Verb::ListIdentifiers, params)?;

    let headers = provider
        .list_identifiers(&query)
        .await
        .map_err(|err| no_match(err, "identifiers"))?;

    if headers.is_empty() {
        return Err(no_match(ProviderError::NoRecordsMatch, "identifiers"));
    }

    Ok(Payload::ListIdentifiers(ListIdentifiers {
        headers,
        resumption_token: None,
    }))
}

/// Validate the selective-harvesting arguments shared by both verbs.
fn selection(verb: Verb, params: &RequestParams) -> Result<ListQuery, OaiError> {
    let has_prefix = params.contains("metadataPrefix");
    let has_token = params.contains("resumptionToken");

    if !has_prefix && !has_token {
        return Err(OaiError::bad_argument(format!(
            "Request with verb \"{}\" requires exactly one of the following query parameters: \"metadataPrefix\" or \"resumptionToken\"",
            verb
        )));
    }
    if has_prefix && has_token {
        return Err(OaiError::bad_argument(format!(
            "Request with verb \"{}\" can only have ONE of the following query parameters: \"metadataPrefix\" or \"resumptionToken\"",
            verb
        )));
    }

    // TODO: decode the token into prefix, cursor and filters once providers
    // can page their results.
    if has_token {
        return Err(OaiError::new(
            ErrorCode::BadResumptionToken,
            RESUMPTION_UNSUPPORTED,
        ));
    }

    let prefix = required_prefix(params)?;
    let from = datestamp(params, "from")?;
    let until = datestamp(params, "until")?;

    if let (Some(from), Some(until)) = (&from, &until)
        && from.start() > until.end()
    {
        return Err(OaiError::bad_argument(
            "The \"from\" datetime must not be later than the \"until\" datetime",
        ));
    }

    Ok(ListQuery {
        prefix,
        from: from.map(|d| d.start()),
        until: until.map(|d| d.end()),
        set: params.get("set").map(str::to_string),
    })
}

fn datestamp(params: &RequestParams, name: &str) -> Result<Option<Datestamp>, OaiError> {
    params
        .get(name)
        .map(|value| {
            Datestamp::parse(value).map_err(|_| {
                OaiError::bad_argument(format!(
                    "The following value is not a valid \"{}\" datetime: \"{}\"",
                    name, value
                ))
            })
        })
        .transpose()
}

fn no_match(err: ProviderError, what: &str) -> Rejection {
    match err {
        ProviderError::NoRecordsMatch => OaiError::new(
            ErrorCode::NoRecordsMatch,
            format!(
                "No {} in the repository match the selected criteria",
                what
            ),
        )
        .into(),
        other => Rejection::from(other),
    }
}
