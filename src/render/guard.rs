use std::ops::{Deref, DerefMut};

use crate::render::Canvas;

/// Scoped graphics-state acquisition.
///
/// Saves the canvas state on construction and restores it when dropped, so
/// every exit path of a pass (including early returns) leaves the surface as it
/// found it. Guards nest by borrowing through an outer guard.
pub struct CanvasStateGuard<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> CanvasStateGuard<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.save_state();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for CanvasStateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for CanvasStateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for CanvasStateGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore_state();
    }
}
