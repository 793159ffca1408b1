//! Renderer abstraction for presenting views.

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for presenting views.
///
/// Implement this trait to plug your presentation layer into the runtime
/// (a virtual DOM patcher, a terminal UI, a headless snapshot, ...).
///
/// [`render`](Self::render) is called once at startup and then after every
/// batch that changed the state, after the effects have run, with a fresh
/// view derived via [`Component::view`](crate::Component::view).
///
/// # Example
///
/// ```rust
/// use pyramid_mvu::Renderer;
///
/// struct ConsoleRenderer;
///
/// impl Renderer<String> for ConsoleRenderer {
///     fn render(&mut self, view: String) {
///         println!("{}", view);
///     }
/// }
/// ```
pub trait Renderer<View> {
    /// Present the given view.
    ///
    /// Views may contain callbacks (via [`Dispatch`](crate::Dispatch)) that
    /// submit new actions.
    fn render(&mut self, view: View);
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures every rendered view for assertions.
///
/// Only available with the `testing` feature. Clones share the same capture
/// storage, so keep one clone and hand the other to the runtime.
///
/// # Example
///
/// ```rust
/// use pyramid_mvu::{Renderer, TestRenderer};
///
/// let renderer = TestRenderer::new();
/// let mut handle = renderer.clone();
/// handle.render(String::from("hello"));
///
/// assert_eq!(renderer.count(), 1);
/// renderer.with_renders(|renders| assert_eq!(renders[0], "hello"));
/// ```
pub struct TestRenderer<View> {
    renders: Arc<Mutex<Vec<View>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<View> Clone for TestRenderer<View> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<View> Renderer<View> for TestRenderer<View> {
    fn render(&mut self, view: View) {
        self.renders.lock().push(view);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<View> Default for TestRenderer<View> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<View> TestRenderer<View> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of renders that have occurred.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured views with a closure.
    ///
    /// This allows assertions on rendered views or invoking their callbacks
    /// to simulate user interaction.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<View>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}
