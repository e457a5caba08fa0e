use std::sync::Mutex;

use tauri::{menu::MenuItem, AppHandle, Manager};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{LifecycleCoordinator, TauriHost};

pub(crate) type ShellCoordinator = LifecycleCoordinator<TauriHost>;

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) toggle_item: MenuItem<tauri::Wry>,
}

/// Keeps the non-blocking log writer flushing for the life of the app.
pub(crate) struct LogGuard(#[allow(dead_code)] pub(crate) WorkerGuard);

pub(crate) struct ShellState {
    coordinator: Mutex<ShellCoordinator>,
}

impl ShellState {
    pub(crate) fn new(coordinator: ShellCoordinator) -> Self {
        Self {
            coordinator: Mutex::new(coordinator),
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut ShellCoordinator) -> R) -> R {
        let mut guard = match self.coordinator.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("shell coordinator lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        f(&mut guard)
    }
}

/// Runs `f` against the coordinator; `None` before setup has installed it.
pub(crate) fn with_coordinator<R>(
    app_handle: &AppHandle,
    f: impl FnOnce(&mut ShellCoordinator) -> R,
) -> Option<R> {
    let state = app_handle.try_state::<ShellState>()?;
    Some(state.with(f))
}

/// Queues `f` against the coordinator on the event-loop thread. Window getters block on
/// that thread, so background tasks never take the coordinator lock themselves.
pub(crate) fn with_coordinator_on_main<F, R>(app_handle: &AppHandle, f: F)
where
    F: FnOnce(&mut ShellCoordinator) -> R + Send + 'static,
{
    let handle = app_handle.clone();
    if let Err(error) = app_handle.run_on_main_thread(move || {
        with_coordinator(&handle, f);
    }) {
        tracing::warn!("failed to dispatch to the event loop: {error}");
    }
}
