use crate::models::geometry::{BorderInsets, Rect};
use crate::models::hotkey_binding::{Key, ModifierKey, ShortcutCombination};
use crate::models::tile_action::{SliceScheme, TileAction};
use crate::platform::status::StatusSink;
use crate::platform::window_system::{PlatformError, WindowCommand, WindowHandle, WindowSystem};
use crate::services::action_table::ActionTable;
use crate::services::geometry_calculator::{GeometryCalculator, GeometryError};
use crate::services::tile_resolver::TileResolver;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// Reasons a tiling operation was abandoned
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    #[error("No active window to move")]
    NoActiveWindow,

    #[error("Slice scheme '{0}' is not supported")]
    UnsupportedScheme(SliceScheme),

    #[error("Window command '{command}' failed: {reason}")]
    OsCommandFailed {
        command: WindowCommand,
        reason: String,
    },
}

impl From<PlatformError> for TileError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::CommandFailed { command, reason } => {
                TileError::OsCommandFailed { command, reason }
            }
        }
    }
}

impl From<GeometryError> for TileError {
    fn from(error: GeometryError) -> Self {
        match error {
            GeometryError::UnsupportedScheme(scheme) => TileError::UnsupportedScheme(scheme),
        }
    }
}

/// Where the controller is in handling the current event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Resolving,
    Applying,
    Reporting,
}

/// Geometry of a completed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileReport {
    pub window: WindowHandle,
    pub work_area: Rect,
    /// Target before border compensation
    pub target: Rect,
    pub insets: BorderInsets,
    /// Frame handed to the window system
    pub frame: Rect,
}

/// Result of handling one hotkey event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOutcome {
    /// No binding for the shortcut; nothing was done
    Unmapped,
    Maximized { window: WindowHandle },
    Tiled(TileReport),
}

/// Counters for controller activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TilingControllerMetrics {
    pub events_handled: u64,
    pub unmapped_events: u64,
    pub maximized: u64,
    pub tiled: u64,
    pub failures: u64,
}

/// Dispatches hotkey events to tiling actions and applies them to the
/// focused window. Events are handled one at a time to completion.
pub struct TilingController {
    actions: ActionTable,
    windows: Arc<dyn WindowSystem>,
    status: Arc<dyn StatusSink>,
    state: ControllerState,
    metrics: TilingControllerMetrics,
}

impl TilingController {
    pub fn new(
        actions: ActionTable,
        windows: Arc<dyn WindowSystem>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            actions,
            windows,
            status,
            state: ControllerState::Idle,
            metrics: TilingControllerMetrics::default(),
        }
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn metrics(&self) -> &TilingControllerMetrics {
        &self.metrics
    }

    /// Handle an already-decoded hotkey
    pub fn handle_hotkey(
        &mut self,
        modifiers: &[ModifierKey],
        key: Key,
    ) -> Result<TileOutcome, TileError> {
        self.handle_shortcut(&ShortcutCombination::new(modifiers.to_vec(), key))
    }

    /// Look up the shortcut and, when bound, apply its action to the active window
    #[instrument(skip(self), fields(shortcut = %shortcut))]
    pub fn handle_shortcut(
        &mut self,
        shortcut: &ShortcutCombination,
    ) -> Result<TileOutcome, TileError> {
        self.metrics.events_handled += 1;
        self.transition(ControllerState::Resolving);

        let Some(action) = self.actions.lookup(shortcut).copied() else {
            debug!("No action bound to shortcut");
            self.metrics.unmapped_events += 1;
            self.transition(ControllerState::Idle);
            return Ok(TileOutcome::Unmapped);
        };

        self.run(action, Some(shortcut))
    }

    /// Apply an action directly, bypassing the binding table
    pub fn apply(&mut self, action: &TileAction) -> Result<TileOutcome, TileError> {
        self.metrics.events_handled += 1;
        self.transition(ControllerState::Resolving);
        self.run(*action, None)
    }

    fn run(
        &mut self,
        action: TileAction,
        shortcut: Option<&ShortcutCombination>,
    ) -> Result<TileOutcome, TileError> {
        let result = self.execute(&action, shortcut);

        self.transition(ControllerState::Reporting);
        match &result {
            Ok(TileOutcome::Tiled(report)) => {
                self.metrics.tiled += 1;
                info!(
                    window = %report.window,
                    frame = %report.frame,
                    "Tiled window"
                );
                self.status.report(&describe_report(report));
            }
            Ok(TileOutcome::Maximized { window }) => {
                self.metrics.maximized += 1;
                info!(window = %window, "Maximized window");
                self.status.report("Window maximized");
            }
            Ok(TileOutcome::Unmapped) => {}
            Err(error) => {
                self.metrics.failures += 1;
                warn!(error = %error, action = %action.describe(), "Tiling failed");
                self.status.report(&format!("Failed to tile window: {}", error));
            }
        }

        self.transition(ControllerState::Idle);
        result
    }

    fn execute(
        &mut self,
        action: &TileAction,
        shortcut: Option<&ShortcutCombination>,
    ) -> Result<TileOutcome, TileError> {
        let window = self.windows.active_window().ok_or(TileError::NoActiveWindow)?;

        if let Some(shortcut) = shortcut {
            let title = self.windows.window_title(window).unwrap_or_default();
            self.status.report(&format!(
                "Pressed key: {}\nMoving window: {}",
                shortcut, title
            ));
        }

        self.transition(ControllerState::Applying);

        if action.is_maximize() {
            self.windows.maximize(window)?;
            return Ok(TileOutcome::Maximized { window });
        }

        let work_area = self.windows.monitor_work_area(window)?;
        let target = TileResolver::resolve(work_area, action)?;

        let visible = self.windows.visible_rect(window)?;
        let legacy = self.windows.legacy_rect(window)?;
        let insets = GeometryCalculator::border_insets(visible, legacy);
        let frame = target.expand(insets);
        debug!(
            work_area = %work_area,
            target = %target,
            insets = %insets,
            "Resolved tile target"
        );

        // a maximized window ignores or mangles a direct move
        self.windows.restore(window)?;
        self.windows.move_resize(window, frame)?;

        Ok(TileOutcome::Tiled(TileReport {
            window,
            work_area,
            target,
            insets,
            frame,
        }))
    }

    fn transition(&mut self, next: ControllerState) {
        trace!(from = ?self.state, to = ?next, "Controller state change");
        self.state = next;
    }
}

fn describe_report(report: &TileReport) -> String {
    format!(
        "Monitor res: {}x{}\nMonitor top-left: {}, {}\nApp final dims: {}x{}px\nApp moved to: {}, {}",
        report.work_area.width(),
        report.work_area.height(),
        report.work_area.left,
        report.work_area.top,
        report.frame.width(),
        report.frame.height(),
        report.frame.left,
        report.frame.top,
    )
}
