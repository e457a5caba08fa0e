use std::time::Duration;

use crate::{
    fade_animation::{self, FadeProgress, FADE_TICK_INTERVAL},
    origin_policy::{LoginHeuristic, NavigationGuard},
    ShellConfig, ShellError, ShellHost, ShellResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    SplashVisible,
    Transitioning,
    MainVisible,
    OfflineFallback,
    QuittingConfirmed,
    Terminated,
}

impl LifecycleState {
    fn is_quitting(self) -> bool {
        matches!(self, Self::QuittingConfirmed | Self::Terminated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTrigger {
    LoadFinished,
    FallbackTimer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Started,
    AlreadyTransitioned,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    Continue(f64),
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    HideToTray,
    AllowClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    Proceed,
    AwaitConfirmation,
    AlreadyPending,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitChoice {
    Cancel,
    Exit,
}

#[derive(Debug, Default)]
struct QuitIntent {
    forced: bool,
    awaiting_confirmation: bool,
}

fn log_failure(action: &str, result: ShellResult<()>) {
    if let Err(error) = result {
        tracing::warn!("{action} failed: {error}");
    }
}

/// Owns the splash/main/tray surfaces for one process run and sequences them:
/// splash, fade-in of the main surface, offline fallback, hide-to-tray and the
/// confirm-on-quit gate.
pub struct LifecycleCoordinator<H: ShellHost> {
    host: H,
    config: ShellConfig,
    navigation: NavigationGuard,
    login: LoginHeuristic,
    state: LifecycleState,
    transitioned: bool,
    fade: Option<FadeProgress>,
    splash_alive: bool,
    main_alive: bool,
    tray_alive: bool,
    quit: QuitIntent,
}

impl<H: ShellHost> LifecycleCoordinator<H> {
    pub fn new(host: H, config: ShellConfig) -> ShellResult<Self> {
        let login = LoginHeuristic::from_config(&config)?;
        Ok(Self {
            host,
            navigation: NavigationGuard::new(config.allow_prefix.clone()),
            login,
            config,
            state: LifecycleState::Starting,
            transitioned: false,
            fade: None,
            splash_alive: false,
            main_alive: false,
            tray_alive: false,
            quit: QuitIntent::default(),
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.forced || self.state.is_quitting()
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub(crate) fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn start(&mut self) -> ShellResult<()> {
        if self.state != LifecycleState::Starting {
            return Err(ShellError::Lifecycle(format!(
                "start requested in state {:?}",
                self.state
            )));
        }

        self.host.create_splash()?;
        self.splash_alive = true;

        self.host
            .create_main(&self.config.start_url, self.navigation.clone())?;
        self.main_alive = true;
        log_failure("reset main opacity", self.host.set_main_opacity(0.0));

        match self.host.create_tray() {
            Ok(()) => self.tray_alive = true,
            Err(error) => tracing::error!("failed to initialize tray: {error}"),
        }

        self.host.schedule_fallback_transition(Duration::from_millis(
            self.config.fallback_transition_ms,
        ));
        self.probe_start_url();
        self.state = LifecycleState::SplashVisible;
        tracing::info!(start_url = %self.config.start_url, "shell surfaces created");
        Ok(())
    }

    pub fn on_splash_ready(&mut self) {
        if self.splash_alive && self.state == LifecycleState::SplashVisible {
            log_failure("show splash", self.host.show_splash());
        }
    }

    /// Hands a URL rejected by the navigation guard to the system browser.
    pub fn open_external(&mut self, url: &str) {
        if self.state.is_quitting() {
            return;
        }
        tracing::info!(url, "navigation outside allow prefix sent to external browser");
        self.host.open_external(url);
    }

    pub fn on_main_load_finished(&mut self) -> TransitionOutcome {
        self.transition_to_main(TransitionTrigger::LoadFinished)
    }

    pub fn on_fallback_timer_elapsed(&mut self) -> TransitionOutcome {
        self.transition_to_main(TransitionTrigger::FallbackTimer)
    }

    /// Runs at most once per process; later triggers are no-ops.
    pub fn transition_to_main(&mut self, trigger: TransitionTrigger) -> TransitionOutcome {
        if self.transitioned {
            tracing::debug!(?trigger, "transition already consumed");
            return TransitionOutcome::AlreadyTransitioned;
        }
        if !self.main_alive || !self.host.main_exists() || self.state.is_quitting() {
            return TransitionOutcome::Unavailable;
        }

        self.transitioned = true;
        tracing::info!(?trigger, "transitioning from splash to main window");
        // The document loaded since start() and dropped the earlier opacity.
        log_failure("reset main opacity", self.host.set_main_opacity(0.0));
        log_failure("show main window", self.host.show_main());
        self.fade = Some(FadeProgress::default());
        self.state = LifecycleState::Transitioning;
        self.host.start_fade_timer(FADE_TICK_INTERVAL);
        TransitionOutcome::Started
    }

    /// A new document in the main surface starts fully opaque; during the fade it is
    /// put back to the current step.
    pub fn on_main_document_started(&mut self) {
        if self.state != LifecycleState::Transitioning {
            return;
        }
        if let Some(opacity) = self.fade.as_ref().map(FadeProgress::opacity) {
            log_failure("restore main opacity", self.host.set_main_opacity(opacity));
        }
    }

    /// One animation tick. The splash is destroyed on the tick that reaches full opacity.
    pub fn advance_fade(&mut self) -> FadeStep {
        if self.state != LifecycleState::Transitioning
            || !self.main_alive
            || !self.host.main_exists()
        {
            self.fade = None;
            return FadeStep::Cancelled;
        }
        let Some(progress) = self.fade.as_mut() else {
            return FadeStep::Cancelled;
        };
        let Some(opacity) = progress.next() else {
            self.fade = None;
            return FadeStep::Cancelled;
        };

        log_failure("set main opacity", self.host.set_main_opacity(opacity));
        if !fade_animation::is_opaque(opacity) {
            return FadeStep::Continue(opacity);
        }

        self.fade = None;
        self.close_splash();
        self.state = LifecycleState::MainVisible;
        FadeStep::Finished
    }

    /// Handles a failed load. Only main-frame failures switch to the offline page.
    pub fn on_main_load_failed(&mut self, is_main_frame: bool) -> bool {
        if !is_main_frame || !self.main_alive || self.state.is_quitting() {
            return false;
        }

        tracing::warn!("main frame failed to load, showing offline fallback");
        self.close_splash();
        self.fade = None;
        self.transitioned = true;

        if let Err(error) = self.host.load_offline_page() {
            tracing::warn!("offline page unavailable ({error}), showing dialog instead");
            self.host.show_offline_dialog();
        }
        log_failure("set main opacity", self.host.set_main_opacity(1.0));
        log_failure("show main window", self.host.show_main());
        self.state = LifecycleState::OfflineFallback;
        true
    }

    pub fn on_main_close_requested(&mut self) -> CloseDecision {
        if self.is_quitting() {
            return CloseDecision::AllowClose;
        }

        self.send_to_background();
        CloseDecision::HideToTray
    }

    pub fn on_main_minimized(&mut self) {
        if self.is_quitting() || !self.tray_alive {
            return;
        }
        log_failure("hide main window", self.host.hide_main());
    }

    fn send_to_background(&mut self) {
        if self.tray_alive {
            log_failure("hide main window", self.host.hide_main());
        } else {
            log_failure("minimize main window", self.host.minimize_main());
        }
    }

    pub fn show_main(&mut self) {
        if !self.main_alive || self.state.is_quitting() {
            return;
        }
        log_failure("show main window", self.host.show_main());
    }

    pub fn toggle_main(&mut self) {
        if !self.main_alive || self.state.is_quitting() {
            return;
        }
        match self.host.is_main_visible() {
            Ok(true) => self.send_to_background(),
            Ok(false) => log_failure("show main window", self.host.show_main()),
            Err(error) => {
                tracing::warn!("failed to read main window visibility in toggle_main: {error}")
            }
        }
    }

    pub fn reload_main(&mut self) {
        if !self.main_alive || self.state.is_quitting() {
            return;
        }
        let start_url = self.config.start_url.clone();
        log_failure("reload main window", self.host.load_main_url(&start_url));
        if self.state == LifecycleState::OfflineFallback {
            self.state = LifecycleState::MainVisible;
        }
        self.probe_start_url();
    }

    /// An unreachable start URL comes back as `on_main_load_failed(true)`.
    fn probe_start_url(&mut self) {
        let timeout = Duration::from_millis(self.config.probe_timeout_ms);
        let start_url = self.config.start_url.clone();
        self.host.schedule_reachability_probe(&start_url, timeout);
    }

    fn likely_logged_in(&self) -> bool {
        if !self.main_alive || !self.host.main_exists() {
            return false;
        }
        self.host
            .main_url()
            .is_some_and(|url| self.login.is_likely_logged_in(&url))
    }

    /// Checks once per quit attempt whether the user must confirm.
    pub fn request_quit(&mut self) -> QuitDecision {
        if self.quit.forced {
            return QuitDecision::Proceed;
        }
        if self.quit.awaiting_confirmation {
            return QuitDecision::AlreadyPending;
        }

        if self.likely_logged_in() {
            tracing::info!("quit requested while logged in, asking for confirmation");
            self.quit.awaiting_confirmation = true;
            self.host.present_exit_confirmation();
            return QuitDecision::AwaitConfirmation;
        }

        self.confirm_quit();
        QuitDecision::Proceed
    }

    pub fn resolve_exit_confirmation(&mut self, choice: ExitChoice) -> QuitDecision {
        if !self.quit.awaiting_confirmation {
            return if self.quit.forced {
                QuitDecision::Proceed
            } else {
                QuitDecision::Cancelled
            };
        }

        self.quit.awaiting_confirmation = false;
        match choice {
            ExitChoice::Cancel => {
                tracing::info!("exit cancelled by user");
                QuitDecision::Cancelled
            }
            ExitChoice::Exit => {
                self.confirm_quit();
                QuitDecision::Proceed
            }
        }
    }

    /// Skips the confirmation gate, e.g. before installing an update.
    pub fn force_quit(&mut self) {
        self.confirm_quit();
    }

    fn confirm_quit(&mut self) {
        self.quit.forced = true;
        self.fade = None;
        if self.state != LifecycleState::Terminated {
            self.state = LifecycleState::QuittingConfirmed;
        }
    }

    fn close_splash(&mut self) {
        if !self.splash_alive {
            return;
        }
        self.splash_alive = false;
        log_failure("destroy splash window", self.host.destroy_splash());
    }

    /// Tears every surface down. Returns `false` when teardown already happened.
    pub fn shutdown(&mut self) -> bool {
        if self.state == LifecycleState::Terminated {
            return false;
        }

        self.quit.forced = true;
        self.fade = None;
        self.close_splash();
        if self.tray_alive {
            self.tray_alive = false;
            self.host.destroy_tray();
        }
        if self.main_alive {
            self.main_alive = false;
            log_failure("destroy main window", self.host.destroy_main());
        }
        self.state = LifecycleState::Terminated;
        tracing::info!("shell surfaces torn down");
        true
    }
}
