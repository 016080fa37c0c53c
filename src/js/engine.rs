//! JavaScript Engine
//!
//! Manages the Boa JavaScript runtime with a dedicated worker thread
//! and proper event loop integration.

use boa_engine::{Context, JsError, Source};
use boa_runtime::extensions::{ConsoleExtension, MicrotaskExtension, TimeoutExtension};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::js::JsEngineClient;

/// Commands that can be sent to the JS engine thread.
#[derive(Debug)]
pub enum JsCommand {
    /// Execute a JS script.
    Execute { source: String },
    /// Run pending jobs and timers.
    FlushEventLoop,
    /// Shutdown the JS engine.
    Shutdown,
}

/// An embedder-provided subsystem that exposes native functions to the JS
/// context. Implementors are registered once, on the engine thread, before
/// any script runs.
pub trait JsEngineExtension: Send + 'static {
    fn register(&self, context: &mut Context, client: JsEngineClient) -> Result<(), JsError>;
}

/// Builder for a [`JsEngine`] with a set of extensions.
#[derive(Default)]
pub struct JsEngineBuilder {
    extensions: Vec<Box<dyn JsEngineExtension>>,
}

impl JsEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl JsEngineExtension) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Spawn the engine worker thread and return its handle.
    pub fn start(self) -> JsEngine {
        JsEngine::start(self.extensions)
    }
}

/// JavaScript engine with dedicated worker thread.
pub struct JsEngine {
    client: JsEngineClient,
    _handle: JoinHandle<()>,
}

impl JsEngine {
    fn start(extensions: Vec<Box<dyn JsEngineExtension>>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let client = JsEngineClient { sender };

        let client_for_thread = client.clone();
        let handle = thread::spawn(move || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                run_js_loop(receiver, extensions, client_for_thread);
            }));

            if let Err(e) = result {
                log::error!("JS engine panicked: {:?}", e);
            }
        });

        Self {
            client,
            _handle: handle,
        }
    }

    /// Get a client handle for communicating with the engine.
    pub fn client(&self) -> JsEngineClient {
        self.client.clone()
    }
}

/// Main loop for the JS engine thread.
fn run_js_loop(
    receiver: Receiver<JsCommand>,
    extensions: Vec<Box<dyn JsEngineExtension>>,
    client: JsEngineClient,
) {
    log::info!("JS engine thread started");

    let mut context = match Context::builder().build() {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to build JS context: {:?}", e);
            return;
        }
    };

    // Register Boa runtime extensions
    if let Err(e) = boa_runtime::register(
        (
            ConsoleExtension::default(),
            TimeoutExtension {},
            MicrotaskExtension {},
        ),
        None,
        &mut context,
    ) {
        log::error!("Failed to register Boa runtime extensions: {:?}", e);
    }

    for extension in &extensions {
        if let Err(e) = extension.register(&mut context, client.clone()) {
            log::error!("Failed to register engine extension: {:?}", e);
        }
    }

    log::info!("JS runtime initialized");

    // Process commands
    loop {
        match receiver.recv() {
            Ok(JsCommand::Execute { source }) => {
                log::debug!("Executing script ({} bytes)...", source.len());

                let source = Source::from_bytes(source.as_bytes());

                if let Err(e) = context.eval(source) {
                    log::error!("Failed to execute script: {:?}", e);
                }

                flush_event_loop(&mut context);
            }
            Ok(JsCommand::FlushEventLoop) => {
                flush_event_loop(&mut context);
            }
            Ok(JsCommand::Shutdown) => {
                log::info!("JS engine shutting down");
                break;
            }
            Err(e) => {
                log::error!("JS engine channel error: {}", e);
                break;
            }
        }
    }

    log::info!("JS engine thread stopped");
}

/// Flush the event loop: run microtasks (Jobs) and pending macrotasks (timers).
fn flush_event_loop(context: &mut Context) {
    if let Err(e) = context.run_jobs() {
        if let Some(e) = e.as_opaque() {
            let msg = e.to_json(context).unwrap_or_default();
            log::error!("Error running Boa jobs: {:?}", msg);
        } else {
            log::error!("Error running Boa jobs: {:?}", e);
        }
    }
}
