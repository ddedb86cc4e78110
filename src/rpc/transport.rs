// rpc/transport.rs - HTTP binding for the procedure router
//
// GET  /api/trpc/:path?input=<json>   queries
// POST /api/trpc/:path  (json body)   mutations
//
// `?batch=1` accepts comma-separated paths with input `{"0": .., "1": ..}`
// and answers with an array of envelopes.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{ProcedureKind, RpcContext, RpcRouter};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RpcParams {
    pub input: Option<String>,
    pub batch: Option<String>,
}

impl RpcParams {
    fn is_batch(&self) -> bool {
        matches!(self.batch.as_deref(), Some("1") | Some("true"))
    }
}

/// GET /api/trpc/:path
pub async fn rpc_query(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<RpcParams>,
    user: Option<Extension<AuthUser>>,
) -> Response {
    let input = match params.input.as_deref().map(serde_json::from_str::<Value>).transpose() {
        Ok(input) => input.unwrap_or(Value::Null),
        Err(e) => {
            let err = ApiError::bad_request(format!("Input is not valid JSON: {}", e));
            return error_response(&path, err);
        }
    };

    let ctx = RpcContext::new(state.store.clone(), user.map(|Extension(u)| u));
    dispatch(&state.rpc, &ctx, ProcedureKind::Query, &path, input, params.is_batch()).await
}

/// POST /api/trpc/:path
pub async fn rpc_mutation(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<RpcParams>,
    user: Option<Extension<AuthUser>>,
    body: Bytes,
) -> Response {
    let input = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(input) => input,
            Err(e) => {
                let err = ApiError::bad_request(format!("Body is not valid JSON: {}", e));
                return error_response(&path, err);
            }
        }
    };

    let ctx = RpcContext::new(state.store.clone(), user.map(|Extension(u)| u));
    dispatch(&state.rpc, &ctx, ProcedureKind::Mutation, &path, input, params.is_batch()).await
}

async fn dispatch(
    router: &RpcRouter,
    ctx: &RpcContext,
    kind: ProcedureKind,
    path: &str,
    input: Value,
    batch: bool,
) -> Response {
    if !batch {
        return match call_one(router, ctx, kind, path, input).await {
            Ok(data) => (StatusCode::OK, Json(success_body(data))).into_response(),
            Err(err) => error_response(path, err),
        };
    }

    let mut envelopes = Vec::new();
    let mut all_ok = true;
    for (index, call_path) in path.split(',').enumerate() {
        let call_input = input.get(index.to_string()).cloned().unwrap_or(Value::Null);
        match call_one(router, ctx, kind, call_path, call_input).await {
            Ok(data) => envelopes.push(success_body(data)),
            Err(err) => {
                all_ok = false;
                envelopes.push(error_body(call_path, &err));
            }
        }
    }

    let status = if all_ok { StatusCode::OK } else { StatusCode::MULTI_STATUS };
    (status, Json(Value::Array(envelopes))).into_response()
}

async fn call_one(
    router: &RpcRouter,
    ctx: &RpcContext,
    kind: ProcedureKind,
    path: &str,
    input: Value,
) -> Result<Value, ApiError> {
    debug!("rpc {} {}", kind, path);
    router.call(path, kind, ctx, input).await.map_err(|err| {
        warn!("rpc {} {} failed: {}", kind, path, err);
        err
    })
}

pub fn success_body(data: Value) -> Value {
    json!({ "result": { "data": data } })
}

pub fn error_body(path: &str, err: &ApiError) -> Value {
    json!({
        "error": {
            "message": err.message(),
            "code": err.error_code(),
            "data": {
                "code": err.error_code(),
                "httpStatus": err.status().as_u16(),
                "path": path
            }
        }
    })
}

fn error_response(path: &str, err: ApiError) -> Response {
    (err.status(), Json(error_body(path, &err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_carries_status_and_path() {
        let body = error_body("user.list", &ApiError::not_found("missing"));
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["data"]["httpStatus"], 404);
        assert_eq!(body["error"]["data"]["path"], "user.list");
    }

    #[test]
    fn batch_flag_accepts_one_or_true() {
        let mut params = RpcParams::default();
        assert!(!params.is_batch());
        params.batch = Some("1".into());
        assert!(params.is_batch());
        params.batch = Some("true".into());
        assert!(params.is_batch());
    }
}
