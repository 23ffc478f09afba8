use crate::models::geometry::{BorderInsets, Rect};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Opaque platform window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// Wrap a raw handle; the platform's null handle (0) yields `None`
    pub fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Calls the tiling controller makes against the window system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowCommand {
    ActiveWindow,
    MonitorWorkArea,
    VisibleRect,
    LegacyRect,
    Restore,
    Maximize,
    MoveResize,
}

impl fmt::Display for WindowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowCommand::ActiveWindow => "get active window",
            WindowCommand::MonitorWorkArea => "get monitor work area",
            WindowCommand::VisibleRect => "get visible rect",
            WindowCommand::LegacyRect => "get window rect",
            WindowCommand::Restore => "restore",
            WindowCommand::Maximize => "maximize",
            WindowCommand::MoveResize => "move/resize",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("{command} failed: {reason}")]
    CommandFailed {
        command: WindowCommand,
        reason: String,
    },
}

impl PlatformError {
    pub fn command_failed(command: WindowCommand, reason: impl Into<String>) -> Self {
        PlatformError::CommandFailed {
            command,
            reason: reason.into(),
        }
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Query and command the focused window.
///
/// Every call is synchronous and expected to return quickly. Rectangles are
/// in the same virtual-desktop coordinate space as [`WindowSystem::move_resize`].
pub trait WindowSystem: Send + Sync {
    /// Currently focused top-level window, if any
    fn active_window(&self) -> Option<WindowHandle>;

    /// Usable area of the monitor containing the window, excluding taskbars
    fn monitor_work_area(&self, window: WindowHandle) -> PlatformResult<Rect>;

    /// Frame as the user sees it. Hosts without a compositor-reported frame
    /// return the same rectangle as [`WindowSystem::legacy_rect`].
    fn visible_rect(&self, window: WindowHandle) -> PlatformResult<Rect>;

    /// Raw frame including invisible resize borders
    fn legacy_rect(&self, window: WindowHandle) -> PlatformResult<Rect>;

    /// Return a maximized or minimized window to its normal state
    fn restore(&self, window: WindowHandle) -> PlatformResult<()>;

    fn maximize(&self, window: WindowHandle) -> PlatformResult<()>;

    /// Move and resize using raw (legacy) frame coordinates
    fn move_resize(&self, window: WindowHandle, frame: Rect) -> PlatformResult<()>;

    /// Window title for status messages
    fn window_title(&self, _window: WindowHandle) -> Option<String> {
        None
    }
}

/// Show state of a simulated window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Normal,
    Maximized,
    Minimized,
}

/// Window tracked by [`SimulatedWindowSystem`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedWindow {
    pub title: String,
    /// Raw frame, invisible borders included
    pub frame: Rect,
    /// Invisible border thickness around the visible frame
    pub insets: BorderInsets,
    pub state: ShowState,
    /// Frame to return to when restored from maximized/minimized
    pub normal_frame: Rect,
}

impl SimulatedWindow {
    pub fn new(title: impl Into<String>, frame: Rect, insets: BorderInsets) -> Self {
        Self {
            title: title.into(),
            frame,
            insets,
            state: ShowState::Normal,
            normal_frame: frame,
        }
    }

    pub fn visible_frame(&self) -> Rect {
        Rect::new(
            self.frame.left + self.insets.left,
            self.frame.top + self.insets.top,
            self.frame.right - self.insets.right,
            self.frame.bottom - self.insets.bottom,
        )
    }
}

#[derive(Debug, Default)]
struct Desktop {
    work_areas: Vec<Rect>,
    windows: HashMap<WindowHandle, SimulatedWindow>,
    active: Option<WindowHandle>,
    next_handle: u64,
    failing: HashSet<WindowCommand>,
    log: Vec<WindowCommand>,
}

/// In-memory desktop with the same quirks as a real one: windows carry
/// invisible borders and a maximized window refuses to be moved until it is
/// restored. Used by the `simulate` command and by tests.
#[derive(Debug, Default)]
pub struct SimulatedWindowSystem {
    desktop: Mutex<Desktop>,
}

impl SimulatedWindowSystem {
    pub fn new(work_areas: Vec<Rect>) -> Self {
        Self {
            desktop: Mutex::new(Desktop {
                work_areas,
                next_handle: 0x10,
                ..Desktop::default()
            }),
        }
    }

    /// Add a window and focus it
    pub fn open_window(&self, window: SimulatedWindow) -> WindowHandle {
        let mut desktop = self.lock();
        desktop.next_handle += 1;
        let handle = WindowHandle(desktop.next_handle);
        desktop.windows.insert(handle, window);
        desktop.active = Some(handle);
        handle
    }

    pub fn focus(&self, window: Option<WindowHandle>) {
        self.lock().active = window;
    }

    /// Minimize a window the way the user would, outside the command log
    pub fn minimize(&self, window: WindowHandle) {
        if let Some(entry) = self.lock().windows.get_mut(&window) {
            if entry.state == ShowState::Normal {
                entry.normal_frame = entry.frame;
            }
            entry.state = ShowState::Minimized;
        }
    }

    pub fn window(&self, window: WindowHandle) -> Option<SimulatedWindow> {
        self.lock().windows.get(&window).cloned()
    }

    /// Make every subsequent call of `command` fail
    pub fn fail_command(&self, command: WindowCommand) {
        self.lock().failing.insert(command);
    }

    pub fn clear_failures(&self) {
        self.lock().failing.clear();
    }

    /// Commands received so far, in order
    pub fn command_log(&self) -> Vec<WindowCommand> {
        self.lock().log.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Desktop> {
        self.desktop.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, then hand the desktop and the target window to `op`
    fn with_window<T>(
        &self,
        command: WindowCommand,
        window: WindowHandle,
        op: impl FnOnce(&[Rect], &mut SimulatedWindow) -> PlatformResult<T>,
    ) -> PlatformResult<T> {
        let mut desktop = self.lock();
        desktop.log.push(command);

        if desktop.failing.contains(&command) {
            return Err(PlatformError::command_failed(command, "injected failure"));
        }

        let Desktop {
            work_areas,
            windows,
            ..
        } = &mut *desktop;
        let entry = windows.get_mut(&window).ok_or_else(|| {
            PlatformError::command_failed(command, format!("invalid window handle {}", window))
        })?;
        op(work_areas.as_slice(), entry)
    }
}

/// Work area holding the centre of `frame`, falling back to the first monitor
fn containing_work_area(work_areas: &[Rect], frame: Rect) -> Option<Rect> {
    let cx = frame.left + frame.width() / 2;
    let cy = frame.top + frame.height() / 2;
    work_areas
        .iter()
        .find(|area| cx >= area.left && cx < area.right && cy >= area.top && cy < area.bottom)
        .or_else(|| work_areas.first())
        .copied()
}

impl WindowSystem for SimulatedWindowSystem {
    fn active_window(&self) -> Option<WindowHandle> {
        let mut desktop = self.lock();
        desktop.log.push(WindowCommand::ActiveWindow);
        if desktop.failing.contains(&WindowCommand::ActiveWindow) {
            return None;
        }
        desktop.active
    }

    fn monitor_work_area(&self, window: WindowHandle) -> PlatformResult<Rect> {
        self.with_window(WindowCommand::MonitorWorkArea, window, |areas, entry| {
            containing_work_area(areas, entry.visible_frame()).ok_or_else(|| {
                PlatformError::command_failed(WindowCommand::MonitorWorkArea, "no monitors attached")
            })
        })
    }

    fn visible_rect(&self, window: WindowHandle) -> PlatformResult<Rect> {
        self.with_window(WindowCommand::VisibleRect, window, |_, entry| {
            Ok(entry.visible_frame())
        })
    }

    fn legacy_rect(&self, window: WindowHandle) -> PlatformResult<Rect> {
        self.with_window(WindowCommand::LegacyRect, window, |_, entry| Ok(entry.frame))
    }

    fn restore(&self, window: WindowHandle) -> PlatformResult<()> {
        self.with_window(WindowCommand::Restore, window, |_, entry| {
            if entry.state != ShowState::Normal {
                entry.frame = entry.normal_frame;
                entry.state = ShowState::Normal;
            }
            Ok(())
        })
    }

    fn maximize(&self, window: WindowHandle) -> PlatformResult<()> {
        self.with_window(WindowCommand::Maximize, window, |areas, entry| {
            let area = containing_work_area(areas, entry.visible_frame()).ok_or_else(|| {
                PlatformError::command_failed(WindowCommand::Maximize, "no monitors attached")
            })?;
            if entry.state == ShowState::Normal {
                entry.normal_frame = entry.frame;
            }
            entry.frame = area.expand(entry.insets);
            entry.state = ShowState::Maximized;
            Ok(())
        })
    }

    fn move_resize(&self, window: WindowHandle, frame: Rect) -> PlatformResult<()> {
        self.with_window(WindowCommand::MoveResize, window, |_, entry| {
            if entry.state != ShowState::Normal {
                return Err(PlatformError::command_failed(
                    WindowCommand::MoveResize,
                    "window is not in the normal show state",
                ));
            }
            entry.frame = frame;
            entry.normal_frame = frame;
            Ok(())
        })
    }

    fn window_title(&self, window: WindowHandle) -> Option<String> {
        self.lock().windows.get(&window).map(|entry| entry.title.clone())
    }
}
