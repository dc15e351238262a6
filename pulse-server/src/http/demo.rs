//! Demo route handlers ported from the original quickstart
//!
//! These endpoints exercise typed and constrained path parameters, query and
//! JSON body echoing, and method-based dispatch. Constraint mismatches return
//! 404, the same observable behavior as a router with typed path converters.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use serde_json::Value;

pub async fn index() -> Json<Value> {
    Json(serde_json::json!({ "hello": "world" }))
}

pub async fn tag(Path(tag): Path<String>) -> String {
    format!("Tag - {}", tag)
}

/// One route serves both the integer and the real-number form: a segment
/// that parses as a non-negative integer takes the integer branch, any other
/// parseable number takes the number branch and is echoed verbatim
/// (`-000123.0321000` stays `-000123.0321000`).
pub async fn number(Path(arg): Path<String>) -> Result<String, StatusCode> {
    if let Ok(n) = arg.parse::<u64>() {
        return Ok(format!("Integer - {}", n));
    }
    if arg.parse::<f64>().is_ok() {
        return Ok(format!("Number - {}", arg));
    }
    Err(StatusCode::NOT_FOUND)
}

/// Only ASCII letters are accepted
pub async fn person(Path(name): Path<String>) -> Result<String, StatusCode> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(format!("Person - {}", name))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Letters and digits only, at most 4 characters
pub async fn folder(Path(folder_id): Path<String>) -> Result<String, StatusCode> {
    if folder_id.len() <= 4 && folder_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(format!("Folder - {}", folder_id))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Echo the parsed JSON body
pub async fn post_body(Json(body): Json<Value>) -> String {
    format!("POST request - {}", body)
}

/// Echo the query string, grouped by key (repeated keys collect into a list)
pub async fn query_args(Query(pairs): Query<Vec<(String, String)>>) -> String {
    let mut args: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        args.entry(key).or_default().push(value);
    }
    // BTreeMap keeps the output deterministic
    format!(
        "GET request - {}",
        serde_json::to_string(&args).unwrap_or_else(|_| "{}".to_string())
    )
}
