//! Focus handles for rendered input controls.
//!
//! The validation summary moves focus to an erroring field through the
//! [`FocusHandle`] registered for it. Hosting layers implement the trait for
//! their own controls; [`InputHandle`] is a ready-made handle that records
//! requests against a shared [`FocusScope`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// How a scroll-into-view is animated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Where the control ends up within the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

/// Options passed to [`FocusHandle::scroll_into_view`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// A reference to a rendered input control.
pub trait FocusHandle: Send + Sync {
    /// Move keyboard focus to the control.
    fn focus(&self);

    /// Scroll the control into view.
    fn scroll_into_view(&self, options: ScrollOptions);
}

/// Name of one control, usually the field path or a grouped child like
/// `dob.dd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(pub String);

impl FocusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FocusId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FocusId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Which control of a form holds focus.
///
/// At most one control is current. Every move, including clearing, raises a
/// pending flag the renderer consumes with [`FocusState::take_focus_changed`].
#[derive(Debug, Default)]
pub struct FocusState {
    current: Option<FocusId>,
    focus_changed: bool,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&FocusId> {
        self.current.as_ref()
    }

    /// Whether the control named `id` is current.
    pub fn is_focused(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|current| current.0 == id)
    }

    /// Make `id` the current control.
    pub fn set_focus(&mut self, id: impl Into<FocusId>) {
        self.current = Some(id.into());
        self.focus_changed = true;
    }

    /// Leave the form with no current control.
    pub fn clear_focus(&mut self) {
        self.current = None;
        self.focus_changed = true;
    }

    /// Consume the pending move flag.
    pub fn take_focus_changed(&mut self) -> bool {
        let changed = self.focus_changed;
        self.focus_changed = false;
        changed
    }
}

/// The focus state shared by every [`InputHandle`] of one form.
///
/// Clones point at the same state, so a summary link that focuses a handle
/// is visible to the renderer holding the scope.
#[derive(Debug, Clone, Default)]
pub struct FocusScope {
    inner: Arc<RwLock<FocusState>>,
}

impl FocusScope {
    /// Create a scope with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<FocusId> {
        self.inner
            .read()
            .map(|guard| guard.current().cloned())
            .unwrap_or_else(|poisoned| poisoned.into_inner().current().cloned())
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_focused(id))
            .unwrap_or(false)
    }

    pub fn set_focus(&self, id: impl Into<FocusId>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.set_focus(id);
        }
    }

    pub fn clear_focus(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.clear_focus();
        }
    }

    /// Consume the pending move flag. The renderer redraws focus rings when
    /// this returns true.
    pub fn take_focus_changed(&self) -> bool {
        self.inner
            .write()
            .map(|mut guard| guard.take_focus_changed())
            .unwrap_or(false)
    }
}

/// A focus handle for one control inside a [`FocusScope`].
///
/// Focusing makes the control current in its scope and raises a focus request
/// for the renderer; scrolling records the requested options.
#[derive(Debug, Clone)]
pub struct InputHandle {
    id: FocusId,
    scope: FocusScope,
    focus_requested: Arc<AtomicBool>,
    scroll_count: Arc<AtomicUsize>,
    last_scroll: Arc<RwLock<Option<ScrollOptions>>>,
}

impl InputHandle {
    /// Create a handle for the control `id` in `scope`.
    pub fn new(id: impl Into<FocusId>, scope: &FocusScope) -> Self {
        Self {
            id: id.into(),
            scope: scope.clone(),
            focus_requested: Arc::new(AtomicBool::new(false)),
            scroll_count: Arc::new(AtomicUsize::new(0)),
            last_scroll: Arc::new(RwLock::new(None)),
        }
    }

    /// Wrap the handle for registration.
    pub fn shared(&self) -> Arc<dyn FocusHandle> {
        Arc::new(self.clone())
    }

    pub fn id(&self) -> &FocusId {
        &self.id
    }

    /// Check if this control is focused in its scope.
    pub fn is_focused(&self) -> bool {
        self.scope.is_focused(self.id.as_str())
    }

    /// Consume a pending focus request raised by [`FocusHandle::focus`].
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }

    /// Number of scroll-into-view requests so far.
    pub fn scroll_count(&self) -> usize {
        self.scroll_count.load(Ordering::SeqCst)
    }

    /// Options of the last scroll-into-view request.
    pub fn last_scroll(&self) -> Option<ScrollOptions> {
        self.last_scroll.read().map(|guard| *guard).unwrap_or(None)
    }
}

impl FocusHandle for InputHandle {
    fn focus(&self) {
        self.scope.set_focus(self.id.clone());
        self.focus_requested.store(true, Ordering::SeqCst);
    }

    fn scroll_into_view(&self, options: ScrollOptions) {
        self.scroll_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_scroll.write() {
            *guard = Some(options);
        }
    }
}
