//! Host Invocation Channel
//!
//! The boundary-crossing primitive used to request native-side actions.
//! Commands are fire-and-forget: the script side never awaits or inspects
//! a result, and any asynchronous native work is invisible to it.

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::time::Duration;

use serde_json::Value;

/// The invocation primitive consumed by the control-bar proxies.
///
/// Implementors receive a native command name plus a positional,
/// JSON-serializable argument list. Callback values never appear in `args`;
/// they are extracted into the registries before forwarding.
pub trait Invoker {
    fn invoke(&self, command: &str, args: Vec<Value>);
}

/// A single native-invocation request.
#[derive(Clone, Debug, PartialEq)]
pub struct HostCommand {
    /// Native operation name, e.g. `UIControls.createTabBarItem`.
    pub command: String,
    /// Positional arguments. Plain JSON data only.
    pub args: Vec<Value>,
}

/// Thread-safe client for sending UI commands to the native host.
#[derive(Clone, Debug)]
pub struct HostClient {
    tx: SyncSender<HostCommand>,
}

/// Receiver wrapper for the native side of the channel.
pub struct HostCommandReceiver {
    rx: Mutex<Receiver<HostCommand>>,
}

impl HostClient {
    /// Create a new client and its corresponding receiver.
    pub fn channel() -> (HostClient, HostCommandReceiver) {
        // Bounded for backpressure
        let (tx, rx) = mpsc::sync_channel(256);

        (HostClient { tx }, HostCommandReceiver { rx: Mutex::new(rx) })
    }
}

impl Invoker for HostClient {
    fn invoke(&self, command: &str, args: Vec<Value>) {
        log::debug!("HostClient::invoke {} ({} args)", command, args.len());
        let request = HostCommand {
            command: command.to_string(),
            args,
        };
        if let Err(e) = self.tx.send(request) {
            log::warn!("Host channel closed, dropping {}: {}", command, e);
        }
    }
}

impl HostCommandReceiver {
    /// Try to receive the next command without blocking.
    pub fn try_recv(&self) -> Option<HostCommand> {
        self.rx.lock().ok()?.try_recv().ok()
    }

    /// Wait up to `timeout` for the next command.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HostCommand> {
        self.rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}
