//! Command registry: the name → handler map.
//!
//! A [`Registry`] can only be produced by [`RegistryBuilder::build`], and
//! exposes no way to add or remove handlers afterwards. Once built it is
//! shared as `Arc<Registry>` and read concurrently without locking.
//!
//! The registry never decodes payloads. It looks the name up and hands the
//! payload to the handler untouched, so it stays independent of command
//! shapes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dbbridge_core::Payload;
use futures::future::{self, BoxFuture};
use futures::FutureExt;

use crate::handlers::HandlerContext;
use crate::{Error, Output, Result};

/// A registered command handler.
pub type CommandHandler = Arc<
    dyn Fn(HandlerContext, Option<Payload>) -> BoxFuture<'static, Result<Output>> + Send + Sync,
>;

/// Accumulates `(name, handler)` pairs before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, CommandHandler>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    ///
    /// Registering a name twice is a programming error. Debug builds panic;
    /// release builds log a warning and keep the last handler.
    pub fn register<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(HandlerContext, Option<Payload>) -> BoxFuture<'static, Result<Output>>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        let replaced = self.handlers.insert(name.clone(), Arc::new(handler));
        debug_assert!(replaced.is_none(), "command '{}' registered twice", name);
        if replaced.is_some() {
            tracing::warn!(target: "dbbridge::registry", command = %name, "Command registered twice, keeping the last handler");
        }
        self
    }

    /// Freeze the map.
    pub fn build(self) -> Registry {
        Registry {
            handlers: self.handlers,
        }
    }
}

/// Immutable command → handler map.
pub struct Registry {
    handlers: HashMap<String, CommandHandler>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route one invocation.
    ///
    /// An unknown name resolves to `UnknownCommand` without touching any
    /// handler. Otherwise the handler's future is returned as is.
    pub fn dispatch(
        &self,
        name: &str,
        ctx: HandlerContext,
        args: Option<Payload>,
    ) -> BoxFuture<'static, Result<Output>> {
        match self.handlers.get(name) {
            Some(handler) => handler(ctx, args),
            None => future::ready(Err(Error::UnknownCommand {
                name: name.to_string(),
            }))
            .boxed(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}
