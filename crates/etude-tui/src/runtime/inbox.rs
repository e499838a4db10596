//! Inbox channel for handler results.
//!
//! Every spawned handler resolves to exactly one `UiEvent` and posts it
//! here; the runtime drains the receiver once per loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Sending half held by the runtime and cloned into each spawned handler.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiving half drained by the event loop.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Creates the inbox pair. Unbounded: producers are the runtime's own
/// handlers, each sending a single completion event.
pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}
