// rpc/mod.rs - Typed remote procedures over the user store
//
// Procedures are plain types implementing `Procedure`. The router erases
// them to JSON-in/JSON-out so the HTTP transport can dispatch by path.
pub mod transport;
pub mod user;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::database::UserStore;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureKind::Query => f.write_str("query"),
            ProcedureKind::Mutation => f.write_str("mutation"),
        }
    }
}

/// Per-call context handed to every procedure
#[derive(Clone)]
pub struct RpcContext {
    pub store: Arc<dyn UserStore>,
    pub user: Option<AuthUser>,
}

impl RpcContext {
    pub fn new(store: Arc<dyn UserStore>, user: Option<AuthUser>) -> Self {
        Self { store, user }
    }
}

#[async_trait]
pub trait Procedure: Send + Sync + 'static {
    type Input: DeserializeOwned + Send;
    type Output: Serialize + Send;

    /// Dotted path the procedure is served under, e.g. `user.list`
    const PATH: &'static str;
    const KIND: ProcedureKind;

    async fn call(&self, ctx: &RpcContext, input: Self::Input) -> Result<Self::Output, ApiError>;
}

#[async_trait]
trait ErasedProcedure: Send + Sync {
    fn kind(&self) -> ProcedureKind;

    async fn call_json(&self, ctx: &RpcContext, input: Value) -> Result<Value, ApiError>;
}

struct Erased<P>(P);

#[async_trait]
impl<P: Procedure> ErasedProcedure for Erased<P> {
    fn kind(&self) -> ProcedureKind {
        P::KIND
    }

    async fn call_json(&self, ctx: &RpcContext, input: Value) -> Result<Value, ApiError> {
        let input: P::Input = serde_json::from_value(input)
            .map_err(|e| ApiError::bad_request(format!("Invalid input for {}: {}", P::PATH, e)))?;

        let output = self.0.call(ctx, input).await?;

        serde_json::to_value(output).map_err(|e| {
            tracing::error!("Failed to serialize output of {}: {}", P::PATH, e);
            ApiError::internal_server_error("Failed to serialize procedure output")
        })
    }
}

/// Registry of procedures keyed by path
#[derive(Default)]
pub struct RpcRouter {
    procedures: HashMap<&'static str, Box<dyn ErasedProcedure>>,
}

impl RpcRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P: Procedure>(mut self, procedure: P) -> Self {
        self.procedures.insert(P::PATH, Box::new(Erased(procedure)));
        self
    }

    pub fn kind_of(&self, path: &str) -> Option<ProcedureKind> {
        self.procedures.get(path).map(|p| p.kind())
    }

    pub fn paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.procedures.keys().copied().collect();
        paths.sort_unstable();
        paths
    }

    /// Dispatch `path`, rejecting calls whose verb does not match the procedure kind
    pub async fn call(
        &self,
        path: &str,
        kind: ProcedureKind,
        ctx: &RpcContext,
        input: Value,
    ) -> Result<Value, ApiError> {
        let procedure = self.procedures.get(path).ok_or_else(|| {
            ApiError::not_found(format!("No \"{}\"-procedure on path \"{}\"", kind, path))
        })?;

        if procedure.kind() != kind {
            return Err(ApiError::method_not_supported(format!(
                "Procedure \"{}\" is a {}, not a {}",
                path,
                procedure.kind(),
                kind
            )));
        }

        procedure.call_json(ctx, input).await
    }
}

/// Router with every procedure the app serves
pub fn app_router() -> RpcRouter {
    RpcRouter::new().register(user::ListUsers)
}
