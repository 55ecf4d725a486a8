//! The Bridge - single entry point for the host transport.
//!
//! A [`Bridge`] owns the command registry, the data store, and the runtime
//! handle that drives command futures. The registry is assembled while the
//! bridge is being built and is frozen before the first dispatch.
//!
//! # Example
//!
//! ```ignore
//! use dbbridge_executor::{Bridge, Payload, Value};
//!
//! let bridge = Bridge::new(store)?;
//!
//! // Awaitable form
//! let out = bridge
//!     .call("GetTableNames", Some(Payload::new().with("transactionId", Value::Null)))
//!     .await?;
//!
//! // Continuation form: returns immediately, the closure fires exactly once
//! bridge.dispatch("Transaction_Start", None, |result| match result {
//!     Ok(out) => println!("started: {:?}", out),
//!     Err(e) => eprintln!("failed: {}", e),
//! });
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

use dbbridge_core::{DatabaseStore, Payload};
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::error::DecodeError;
use crate::handlers::{self, HandlerContext};
use crate::registry::Registry;
use crate::{Error, Output, Result};

/// Dispatches named commands with untyped payloads to the data store.
///
/// # Thread Safety
///
/// Bridge is `Send + Sync` and cheap to clone; clones share the registry
/// and the store. Concurrent dispatches complete in any order.
#[derive(Clone)]
pub struct Bridge {
    registry: Arc<Registry>,
    ctx: HandlerContext,
    runtime: Handle,
}

impl Bridge {
    /// Bridge over `store` with default configuration, spawning onto the
    /// current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when called outside a tokio runtime.
    pub fn new(store: Arc<dyn DatabaseStore>) -> Result<Self> {
        BridgeBuilder::new().store(store).build()
    }

    /// Start configuring a bridge.
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// The frozen command registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.ctx.config
    }

    /// Run a command to completion.
    pub async fn call(&self, name: &str, args: Option<Payload>) -> Result<Output> {
        invoke(
            self.registry.clone(),
            self.ctx.clone(),
            name.to_string(),
            args,
        )
        .await
    }

    /// Hand a command off and return immediately.
    ///
    /// `on_result` fires exactly once, on whichever runtime worker finishes
    /// the command. There is no cancellation: dropping the returned handle
    /// detaches the task, it does not stop it. If the runtime shuts down
    /// before the command completes, or has already shut down, `on_result`
    /// receives [`Error::Internal`].
    pub fn dispatch<F>(&self, name: &str, args: Option<Payload>, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Output>) + Send + 'static,
    {
        let command = invoke(
            self.registry.clone(),
            self.ctx.clone(),
            name.to_string(),
            args,
        );
        let continuation = Continuation::new(name, on_result);
        self.runtime.spawn(async move {
            continuation.fire(command.await);
        })
    }

    /// [`dispatch`](Self::dispatch) with separate success and failure
    /// continuations; exactly one of them fires.
    ///
    /// `on_success` receives `None` for commands that return no content.
    pub fn dispatch_with<S, E>(
        &self,
        name: &str,
        args: Option<Payload>,
        on_success: S,
        on_failure: E,
    ) -> JoinHandle<()>
    where
        S: FnOnce(Option<Payload>) + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        self.dispatch(name, args, move |result| match result {
            Ok(output) => on_success(output.into_payload()),
            Err(e) => on_failure(e),
        })
    }

    /// Run a command whose arguments and result travel as JSON text.
    ///
    /// Returns `None` for commands that produce no content.
    ///
    /// # Errors
    ///
    /// Besides every error [`call`](Self::call) can return, fails with
    /// [`DecodeError::InvalidJson`] when `args` is not a JSON object.
    pub async fn call_json(&self, name: &str, args: Option<&str>) -> Result<Option<String>> {
        let args = args
            .map(Payload::from_json_str)
            .transpose()
            .map_err(|e| DecodeError::InvalidJson {
                reason: e.to_string(),
            })?;
        let output = self.call(name, args).await?;
        Ok(output.into_payload().map(|p| p.to_json_string()))
    }

    /// Log an error reported by the host side of the bridge.
    pub fn report_error(&self, message: &str) {
        tracing::error!(target: "dbbridge::host", "{}", message);
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("registry", &self.registry)
            .field("config", &self.ctx.config)
            .finish()
    }
}

/// Route one invocation and log its outcome.
///
/// A panicking handler is reported as [`Error::Internal`] so the caller
/// still gets exactly one result.
async fn invoke(
    registry: Arc<Registry>,
    ctx: HandlerContext,
    name: String,
    args: Option<Payload>,
) -> Result<Output> {
    tracing::debug!(target: "dbbridge::dispatch", command = %name, "Dispatching command");

    let routed = {
        let name = name.clone();
        async move { registry.dispatch(&name, ctx, args).await }
    };
    let result = match AssertUnwindSafe(routed).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(Error::Internal {
            reason: format!("handler for '{}' panicked: {}", name, panic_message(&*panic)),
        }),
    };

    match &result {
        Ok(_) => {
            tracing::debug!(target: "dbbridge::dispatch", command = %name, "Command completed");
        }
        Err(e @ Error::UnknownCommand { .. }) | Err(e @ Error::Internal { .. }) => {
            tracing::warn!(target: "dbbridge::dispatch", command = %name, error = %e, "Command failed");
        }
        Err(e) => {
            tracing::debug!(target: "dbbridge::dispatch", command = %name, error = %e, "Command failed");
        }
    }
    result
}

/// Owns a dispatch continuation until it fires.
///
/// Dropping it unfired (the runtime dropped the task) reports
/// [`Error::Internal`] instead.
struct Continuation<F>
where
    F: FnOnce(Result<Output>),
{
    command: String,
    on_result: Option<F>,
}

impl<F> Continuation<F>
where
    F: FnOnce(Result<Output>),
{
    fn new(command: &str, on_result: F) -> Self {
        Self {
            command: command.to_string(),
            on_result: Some(on_result),
        }
    }

    fn fire(mut self, result: Result<Output>) {
        if let Some(on_result) = self.on_result.take() {
            on_result(result);
        }
    }
}

impl<F> Drop for Continuation<F>
where
    F: FnOnce(Result<Output>),
{
    fn drop(&mut self) {
        if let Some(on_result) = self.on_result.take() {
            tracing::warn!(target: "dbbridge::dispatch", command = %self.command, "Runtime dropped command before completion");
            on_result(Err(Error::Internal {
                reason: format!(
                    "runtime shut down before command '{}' completed",
                    self.command
                ),
            }));
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fluent construction of a [`Bridge`].
///
/// ```ignore
/// let bridge = Bridge::builder()
///     .store(store)
///     .config_file(Path::new("dbbridge.toml"))?
///     .runtime(runtime.handle().clone())
///     .build()?;
/// ```
#[derive(Default)]
pub struct BridgeBuilder {
    store: Option<Arc<dyn DatabaseStore>>,
    config: BridgeConfig,
    runtime: Option<Handle>,
}

impl BridgeBuilder {
    /// Builder with default configuration and no store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data store (required).
    pub fn store(mut self, store: Arc<dyn DatabaseStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use an explicit configuration.
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn config_file(mut self, path: &Path) -> Result<Self> {
        self.config = BridgeConfig::from_file(path)?;
        Ok(self)
    }

    /// Spawn dispatched commands onto this runtime instead of the current
    /// one.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Register every command and freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no store was set, or if no runtime was
    /// set and the caller is not inside a tokio runtime.
    pub fn build(self) -> Result<Bridge> {
        let store = self.store.ok_or_else(|| Error::Config {
            reason: "bridge store not set".into(),
        })?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|e| Error::Config {
                reason: format!("no tokio runtime available: {}", e),
            })?,
        };
        let registry = handlers::register_all(Registry::builder()).build();

        tracing::debug!(
            target: "dbbridge::dispatch",
            commands = registry.len(),
            transaction_id = ?self.config.transaction_id,
            "Bridge constructed"
        );

        Ok(Bridge {
            registry: Arc::new(registry),
            ctx: HandlerContext::new(store, Arc::new(self.config)),
            runtime,
        })
    }
}
