//! Infinite-scroll trigger
//!
//! A sentinel sits at the end of the gallery content. When it comes
//! within `threshold` pixels of the visible area the trigger asks the
//! list loader for another page, unless a load is already running or the
//! list is exhausted.

use tracing::debug;

use super::gallery::PhotoListLoader;

/// Scroll geometry reported by the view, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollViewport {
    /// Distance scrolled from the top of the content
    pub offset_y: f32,
    /// Height of the visible area
    pub viewport_height: f32,
    /// Total height of the scrollable content
    pub content_height: f32,
}

/// Marker placed at the very end of the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    pub height: f32,
}

impl Sentinel {
    pub fn at_end(height: f32) -> Self {
        Self { height }
    }
}

/// Something that can tell whether an observed sentinel is in view
///
/// Swappable so the detection mechanism (scroll geometry here, a
/// platform visibility API elsewhere) doesn't leak into the trigger.
pub trait VisibilityObserver {
    /// Start watching `sentinel`, treating it as visible once it is
    /// within `threshold` pixels of the viewport
    fn observe(&mut self, sentinel: Sentinel, threshold: f32);

    /// Stop watching
    fn unobserve(&mut self);

    fn is_observing(&self) -> bool;

    /// Whether the sentinel is in view; None when nothing is observed
    fn intersects(&self, viewport: &ScrollViewport) -> Option<bool>;
}

/// Visibility by scroll position
#[derive(Debug, Default, Clone)]
pub struct ViewportObserver {
    target: Option<(Sentinel, f32)>,
}

impl VisibilityObserver for ViewportObserver {
    fn observe(&mut self, sentinel: Sentinel, threshold: f32) {
        self.target = Some((sentinel, threshold.max(0.0)));
    }

    fn unobserve(&mut self) {
        self.target = None;
    }

    fn is_observing(&self) -> bool {
        self.target.is_some()
    }

    fn intersects(&self, viewport: &ScrollViewport) -> Option<bool> {
        let (sentinel, threshold) = self.target?;
        let sentinel_top = viewport.content_height - sentinel.height;
        let visible_bottom = viewport.offset_y + viewport.viewport_height;
        Some(visible_bottom + threshold >= sentinel_top)
    }
}

/// Loader state the trigger is gated on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGate {
    pub is_loading: bool,
    pub has_more: bool,
}

impl LoadGate {
    pub fn allows(&self) -> bool {
        !self.is_loading && self.has_more
    }
}

impl From<&PhotoListLoader> for LoadGate {
    fn from(loader: &PhotoListLoader) -> Self {
        Self {
            is_loading: loader.is_loading(),
            has_more: loader.has_more(),
        }
    }
}

/// Fires a callback when the sentinel scrolls into view
#[derive(Debug, Clone)]
pub struct ScrollTrigger<O: VisibilityObserver = ViewportObserver> {
    observer: O,
    sentinel: Option<Sentinel>,
    threshold: f32,
    last_intersecting: bool,
    /// Content height at the last evaluation; growth moves the sentinel
    last_content_height: Option<f32>,
}

impl Default for ScrollTrigger<ViewportObserver> {
    fn default() -> Self {
        Self::new(ViewportObserver::default())
    }
}

impl<O: VisibilityObserver> ScrollTrigger<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            sentinel: None,
            threshold: 0.0,
            last_intersecting: false,
            last_content_height: None,
        }
    }

    /// Begin observing `sentinel`
    ///
    /// An unattached sentinel (None) is a no-op; call again once the
    /// view has rendered it. Repeating the call with the same sentinel
    /// and threshold keeps the existing observation.
    pub fn observe(&mut self, sentinel: Option<Sentinel>, threshold: f32) {
        let Some(sentinel) = sentinel else {
            return;
        };
        if self.observer.is_observing()
            && self.sentinel == Some(sentinel)
            && self.threshold == threshold
        {
            return;
        }

        debug!(threshold, "observing scroll sentinel");
        self.observer.observe(sentinel, threshold);
        self.sentinel = Some(sentinel);
        self.threshold = threshold;
        self.last_intersecting = false;
        self.last_content_height = None;
    }

    /// Stop observing; no callbacks fire until `observe` is called again
    pub fn unobserve(&mut self) {
        self.observer.unobserve();
        self.sentinel = None;
        self.last_intersecting = false;
        self.last_content_height = None;
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_observing()
    }

    /// Evaluate a new viewport
    ///
    /// Calls `on_load_more` at most once per transition of the sentinel
    /// into view, and only when `gate` allows it. Returns whether the
    /// callback ran.
    pub fn on_viewport<F: FnOnce()>(
        &mut self,
        viewport: &ScrollViewport,
        gate: LoadGate,
        on_load_more: F,
    ) -> bool {
        let Some(intersecting) = self.observer.intersects(viewport) else {
            return false;
        };

        // Appended content moved the sentinel: a fresh observation
        if self.last_content_height != Some(viewport.content_height) {
            self.last_content_height = Some(viewport.content_height);
            self.last_intersecting = false;
        }

        let entered = intersecting && !self.last_intersecting;
        self.last_intersecting = intersecting;

        if !entered {
            return false;
        }
        if !gate.allows() {
            debug!(?gate, "sentinel in view, load suppressed");
            return false;
        }

        on_load_more();
        true
    }
}
