//! Reference implementation of the emitted invocation bridge.
//!
//! Exports are looked up by boundary name, their single argument is
//! validated and marshalled exactly as the generated wrappers do, and the
//! registered implementation runs behind a panic guard. Async exports run on
//! the blocking pool and settle a one-shot [`Completion`]; the result is
//! converted back to a boundary value only when the caller awaits it, the
//! way `OnOK` runs on the JavaScript thread.

use crate::error::{BridgeError, BridgeResult};
use crate::marshal::{Marshaller, NativeValue};
use napigen_core::{ExportSchema, SchemaIr};
use parking_lot::RwLock;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// What an implementation returns: native storage, or a failure message
pub type HandlerResult = Result<NativeValue, String>;

type Handler = Arc<dyn Fn(NativeValue) -> HandlerResult + Send + Sync>;

pub struct ReferenceBridge {
    ir: Arc<SchemaIr>,
    handlers: RwLock<HashMap<String, Handler>>,
    runtime: Handle,
    call_counter: AtomicU64,
}

impl ReferenceBridge {
    /// Create a bridge scheduling async exports on `runtime`
    pub fn new(ir: SchemaIr, runtime: Handle) -> Self {
        Self {
            ir: Arc::new(ir),
            handlers: RwLock::new(HashMap::new()),
            runtime,
            call_counter: AtomicU64::new(0),
        }
    }

    pub fn schema(&self) -> &SchemaIr {
        &self.ir
    }

    pub fn marshaller(&self) -> Marshaller<'_> {
        Marshaller::new(&self.ir)
    }

    /// Register the implementation behind `export`.
    ///
    /// The handler receives [`NativeValue::Null`] for exports without a
    /// parameter and returns it for `void` exports.
    pub fn implement<F>(&self, export: &str, handler: F) -> BridgeResult<()>
    where
        F: Fn(NativeValue) -> HandlerResult + Send + Sync + 'static,
    {
        if self.ir.export_by_name(export).is_none() {
            return Err(BridgeError::UnknownExport(export.to_string()));
        }
        self.handlers
            .write()
            .insert(export.to_string(), Arc::new(handler));
        Ok(())
    }

    /// Number of calls dispatched so far
    pub fn call_count(&self) -> u64 {
        self.call_counter.load(Ordering::SeqCst)
    }

    fn resolve(&self, export: &str, is_async: bool) -> BridgeResult<(&ExportSchema, Handler)> {
        let schema = self
            .ir
            .export_by_name(export)
            .ok_or_else(|| BridgeError::UnknownExport(export.to_string()))?;
        if schema.is_async != is_async {
            return Err(BridgeError::CallMode {
                export: export.to_string(),
                is_async: schema.is_async,
            });
        }
        let handler = self
            .handlers
            .read()
            .get(export)
            .cloned()
            .ok_or_else(|| BridgeError::Unimplemented(export.to_string()))?;
        let id = self.call_counter.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("call #{id}: {export}");
        Ok((schema, handler))
    }

    /// Argument check and conversion performed by every wrapper
    fn read_argument(&self, schema: &ExportSchema, args: &[Value]) -> BridgeResult<NativeValue> {
        let Some(ty) = &schema.param_type else {
            return Ok(NativeValue::Null);
        };
        let marshaller = self.marshaller();
        match args.first() {
            Some(value) if marshaller.shape_matches(ty, value) => marshaller.from_boundary(ty, value),
            _ => Err(BridgeError::BadArgument {
                export: schema.name.clone(),
                expected: marshaller.display(ty),
            }),
        }
    }

    /// Call a sync export
    pub fn call(&self, export: &str, args: &[Value]) -> BridgeResult<Value> {
        let (schema, handler) = self.resolve(export, false)?;
        let input = self.read_argument(schema, args)?;
        let output = invoke(&schema.name, &handler, input)?;
        write_result(&self.ir, schema, &output)
    }

    /// Schedule an async export.
    ///
    /// Never blocks past scheduling. Argument failures produce a completion
    /// that is already rejected, like the wrapper's rejected promise.
    pub fn call_async(&self, export: &str, args: &[Value]) -> Completion {
        let (tx, rx) = oneshot::channel();
        let completion = Completion {
            export: export.to_string(),
            ir: Arc::clone(&self.ir),
            rx,
        };

        let prepared = self.resolve(export, true).and_then(|(schema, handler)| {
            let input = self.read_argument(schema, args)?;
            Ok((schema, handler, input))
        });

        match prepared {
            Ok((schema, handler, input)) => {
                let name = schema.name.clone();
                self.runtime.spawn_blocking(move || {
                    let outcome = invoke(&name, &handler, input);
                    if tx.send(outcome).is_err() {
                        tracing::debug!("{name}: completion dropped before the worker finished");
                    }
                });
            }
            Err(e) => {
                tracing::debug!("{export}: rejected before scheduling: {e}");
                let _ = tx.send(Err(e));
            }
        }

        completion
    }
}

/// Run an implementation, turning failures and panics into errors
fn invoke(export: &str, handler: &Handler, input: NativeValue) -> BridgeResult<NativeValue> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler(input))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(message)) => Err(BridgeError::Handler {
            export: export.to_string(),
            message,
        }),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!("{export} panicked: {message}");
            Err(BridgeError::Panic {
                export: export.to_string(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn write_result(ir: &SchemaIr, schema: &ExportSchema, output: &NativeValue) -> BridgeResult<Value> {
    match &schema.return_type {
        Some(ty) => Marshaller::new(ir).to_boundary(ty, output),
        None => Ok(Value::Null),
    }
}

/// Single-resolution result of an async export
pub struct Completion {
    export: String,
    ir: Arc<SchemaIr>,
    rx: oneshot::Receiver<BridgeResult<NativeValue>>,
}

impl Completion {
    pub fn export(&self) -> &str {
        &self.export
    }

    /// Wait for the worker and convert its result on the awaiting side
    pub async fn wait(self) -> BridgeResult<Value> {
        let Completion { export, ir, rx } = self;
        let output = rx
            .await
            .map_err(|_| BridgeError::WorkerLost(export.clone()))??;
        settle(&ir, &export, &output)
    }

    /// Blocking variant of [`Completion::wait`] for callers outside a runtime
    pub fn wait_blocking(self) -> BridgeResult<Value> {
        let Completion { export, ir, rx } = self;
        let output = rx
            .blocking_recv()
            .map_err(|_| BridgeError::WorkerLost(export.clone()))??;
        settle(&ir, &export, &output)
    }
}

fn settle(ir: &SchemaIr, export: &str, output: &NativeValue) -> BridgeResult<Value> {
    let schema = ir
        .export_by_name(export)
        .ok_or_else(|| BridgeError::UnknownExport(export.to_string()))?;
    write_result(ir, schema, output)
}
