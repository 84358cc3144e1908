//! Request paths for model lookups.
//!
//! Every `<parent>_id` parameter with a scalar value becomes a nested
//! `/<parents>/<id>` segment, in parameter order. Whatever is left over is
//! sent as a query string. Identity values are percent-encoded, so an id
//! containing `/` or `?` stays one segment. With `{"firm_id": 3, "lawyer_id": 42, "page": 2}`
//! a collection lookup for `addresses` goes to
//! `/firms/3/lawyers/42/addresses.json?page=2`.

use crate::inflect;
use crate::resource::{Params, ResourceId};
use serde_json::Value;
use url::form_urlencoded;

/// Path of a collection (`/lawyers/42/addresses.json`)
pub fn collection_path(collection_name: &str, params: &Params, extension: &str) -> String {
    let (prefix, query) = split_prefix(params);
    with_query(format!("{}/{}{}", prefix, collection_name, extension), &query)
}

/// Path of a singleton resource nested under its parents (`/lawyers/42/headshot.json`)
pub fn singleton_path(element_name: &str, params: &Params, extension: &str) -> String {
    let (prefix, query) = split_prefix(params);
    with_query(format!("{}/{}{}", prefix, element_name, extension), &query)
}

/// Path of one member of a collection (`/lawyers/42/addresses/7.json`)
pub fn element_path(
    collection_name: &str,
    id: &ResourceId,
    params: &Params,
    extension: &str,
) -> String {
    let (prefix, query) = split_prefix(params);
    let id = id.to_string();
    with_query(
        format!(
            "{}/{}/{}{}",
            prefix,
            collection_name,
            urlencoding::encode(&id),
            extension
        ),
        &query,
    )
}

/// Split parameters into the nested path prefix and the remaining query parameters
pub fn split_prefix(params: &Params) -> (String, Params) {
    let mut prefix = String::new();
    let mut query = Params::new();
    for (key, value) in params {
        match (key.strip_suffix("_id"), segment(value)) {
            (Some(parent), Some(id)) if !parent.is_empty() => {
                prefix.push('/');
                prefix.push_str(&inflect::pluralize(parent));
                prefix.push('/');
                prefix.push_str(&id);
            }
            _ => {
                query.insert(key.clone(), value.clone());
            }
        }
    }
    (prefix, query)
}

/// Only the `*_id` parameters, which is what nested lookups hand to their results
pub fn prefix_params(params: &Params) -> Params {
    params
        .iter()
        .filter(|(key, value)| {
            key.strip_suffix("_id").is_some_and(|p| !p.is_empty()) && segment(value).is_some()
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// A parameter value usable as a path segment, percent-encoded
fn segment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(urlencoding::encode(s).into_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn with_query(path: String, query: &Params) -> String {
    if query.is_empty() {
        return path;
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        match value {
            Value::Null => serializer.append_key_only(key),
            Value::String(s) => serializer.append_pair(key, s),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    format!("{}?{}", path, serializer.finish())
}
