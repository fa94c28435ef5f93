//! Request assembly.
//!
//! Merges request parameters, head parameters and the parsed query body
//! into a [`CanonicalSearchRequest`] (or a [`QueryRequest`] for
//! filter-only lookups). The space is only read; every default is a
//! per-call constant taken from [`SearchConfig`].

use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::query::{parse_filters, parse_query_value};
use crate::request::{
    CanonicalSearchRequest, HeadParams, QueryParams, QueryRequest, SearchParams, HEAD_LOAD_BALANCE,
    HEAD_QUERY_ONLY_ID, HEAD_ROUTING, HEAD_SIZE, HEAD_SORT,
};
use crate::schema::Space;

const METRIC_TYPE_KEY: &str = "metric_type";
const L2_METRIC: &str = "L2";

/// Builds the canonical search request for `space`.
///
/// # Errors
///
/// - [`Error::UnknownOutputField`] if a requested field is not in the space
/// - [`Error::InvalidIndexParams`] if the index parameters are not a JSON object
/// - [`Error::MalformedInput`] if the head `size` is not an integer
/// - any error of the query body parser
pub fn assemble_search(
    space: &Space,
    params: SearchParams,
    mut head: HeadParams,
    config: &SearchConfig,
) -> Result<CanonicalSearchRequest> {
    let fields = resolve_fields(space, params.fields, &head, params.vector_value, config)?;

    let index_params = params
        .index_params
        .filter(|v| !v.is_null())
        .map(|v| json_text(&v))
        .unwrap_or_default();
    let sort = sort_direction(space, &index_params)?;

    head.insert(HEAD_SORT.to_string(), sort.to_string());
    head.insert(HEAD_LOAD_BALANCE.to_string(), params.load_balance);
    if !params.routing.is_empty() {
        head.insert(HEAD_ROUTING.to_string(), params.routing);
    }

    let parsed = parse_query_value(params.query.unwrap_or(Value::Null), space, config)?;
    let batch_count = i32::try_from(parsed.batch_count)
        .map_err(|_| Error::MalformedInput(format!("batch count {} is too large", parsed.batch_count)))?;

    let topn = match head.get(HEAD_SIZE).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(size) => size
            .parse::<i32>()
            .map_err(|e| Error::MalformedInput(format!("invalid size parameter '{size}': {e}")))?,
        None => match params.size.unwrap_or(0) {
            0 => config.default_size,
            size => size,
        },
    };

    let client_type = head.get(HEAD_LOAD_BALANCE).cloned().unwrap_or_default();

    Ok(CanonicalSearchRequest {
        batch_count,
        topn,
        brute_force: params.is_brute_search,
        vector_queries: parsed.vector_queries,
        range_filters: parsed.range_filters,
        term_filters: parsed.term_filters,
        fields,
        index_params,
        multi_vector_rank: parsed.multi_vector_rank,
        l2_sqrt: params.l2_sqrt,
        ranker: params
            .ranker
            .filter(|v| !v.is_null())
            .map(|v| json_text(&v))
            .unwrap_or_default(),
        head_params: head,
        has_rank: !params.quick,
        is_vector_value: params.vector_value,
        online_log_level: parsed.online_log_level,
        trace: params.trace,
        client_type,
    })
}

/// Builds a filter-only document query for `space`.
///
/// # Errors
///
/// - [`Error::UnknownOutputField`] if a requested field is not in the space
/// - any error of the filter builders
pub fn assemble_query(
    space: &Space,
    params: QueryParams,
    head: &HeadParams,
    config: &SearchConfig,
) -> Result<QueryRequest> {
    let fields = resolve_fields(space, params.fields, head, params.vector_value, config)?;
    let parsed = parse_filters(params.query.unwrap_or(Value::Null), space)?;

    let limit = match params.limit.unwrap_or(0) {
        0 => config.default_size,
        limit => limit,
    };

    Ok(QueryRequest {
        fields,
        range_filters: parsed.range_filters,
        term_filters: parsed.term_filters,
        limit,
        trace: params.trace,
        online_log_level: parsed.online_log_level,
    })
}

/// Resolves the output field list.
///
/// `queryOnlyId` wins over everything. An explicit list is validated
/// against the space. An omitted list expands to the scalar fields in
/// declaration order, then the ID field, then the vector fields when
/// `vector_value` is set. The ID field ends up exactly once.
fn resolve_fields(
    space: &Space,
    requested: Option<Vec<String>>,
    head: &HeadParams,
    vector_value: bool,
    config: &SearchConfig,
) -> Result<Vec<String>> {
    let id_field = config.id_field.as_str();

    if head.get(HEAD_QUERY_ONLY_ID).is_some_and(|v| !v.is_empty()) {
        return Ok(vec![id_field.to_string()]);
    }

    let mut fields = match requested.filter(|list| !list.is_empty()) {
        Some(list) => {
            if let Some(unknown) = list
                .iter()
                .find(|f| f.as_str() != id_field && space.field(f.as_str()).is_none())
            {
                return Err(Error::UnknownOutputField(unknown.clone()));
            }
            list
        }
        None => {
            let mut list: Vec<String> = space
                .fields()
                .filter(|f| !f.is_vector())
                .map(|f| f.name.clone())
                .collect();
            list.push(id_field.to_string());
            if vector_value {
                list.extend(space.fields().filter(|f| f.is_vector()).map(|f| f.name.clone()));
            }
            list
        }
    };

    let mut seen_id = false;
    fields.retain(|f| {
        if f != id_field {
            return true;
        }
        !std::mem::replace(&mut seen_id, true)
    });
    if !seen_id {
        fields.push(id_field.to_string());
    }

    Ok(fields)
}

/// `asc` for L2 spaces, `desc` otherwise.
///
/// Request index parameters take precedence over the space's.
fn sort_direction(space: &Space, request_params: &str) -> Result<&'static str> {
    let params = if request_params.is_empty() {
        match space.index_params() {
            Value::Null => return Ok("desc"),
            params => params.clone(),
        }
    } else {
        serde_json::from_str(request_params)
            .map_err(|e| Error::InvalidIndexParams(format!("{e}: {request_params}")))?
    };

    let params = match params {
        Value::Object(map) => map,
        other => {
            return Err(Error::InvalidIndexParams(format!(
                "index params must be an object, got {other}"
            )))
        }
    };

    let l2 = params.get(METRIC_TYPE_KEY).and_then(Value::as_str) == Some(L2_METRIC);
    Ok(if l2 { "asc" } else { "desc" })
}

/// JSON text of a parameter; strings are taken as already-encoded JSON.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
