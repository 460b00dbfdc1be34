//! Host signal wiring.
//!
//! Translates process signals into monitor mailbox signals so the host (or
//! an operator) can drive the visibility and status paths from outside:
//! SIGUSR1 suspends redraws (display off), SIGUSR2 resumes them (display
//! on), SIGHUP re-publishes the current status, and Ctrl-C shuts the
//! monitor down. On non-Unix hosts only Ctrl-C is wired.

use crate::service::{Signal, SignalSender};

/// Spawn listener tasks for every supported process signal
#[cfg(unix)]
pub fn spawn_signal_listeners(handle: SignalSender) {
    use tokio::signal::unix::SignalKind;

    spawn_unix_listener(SignalKind::user_defined1(), Signal::DisplayOff, handle.clone());
    spawn_unix_listener(SignalKind::user_defined2(), Signal::DisplayOn, handle.clone());
    spawn_unix_listener(SignalKind::hangup(), Signal::StatusRequest, handle.clone());
    spawn_ctrl_c(handle);
}

#[cfg(not(unix))]
pub fn spawn_signal_listeners(handle: SignalSender) {
    spawn_ctrl_c(handle);
}

#[cfg(unix)]
fn spawn_unix_listener(
    kind: tokio::signal::unix::SignalKind,
    mapped: Signal,
    handle: SignalSender,
) {
    let mut stream = match tokio::signal::unix::signal(kind) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("Could not install signal handler: {}", e);
            return;
        }
    };

    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            tracing::debug!("Process signal mapped to {:?}", mapped);
            if !handle.send(mapped.clone()).await {
                return;
            }
        }
    });
}

fn spawn_ctrl_c(handle: SignalSender) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.send(Signal::Shutdown).await;
        }
    });
}
