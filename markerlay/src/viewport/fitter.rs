//! The idempotent fit operation.

use std::sync::Arc;

use tracing::trace;

use crate::engine::{Placement, RenderSurface, SurfaceKind};
use crate::telemetry::SessionMetrics;

/// Forces the engine's render surfaces to cover the viewport.
///
/// `fit` may be called arbitrarily often; it reads the current viewport and
/// re-applies the same full-cover placement every time. The mirror transform
/// goes on the canvas and every camera feed, never on the offscreen overlay
/// source — that element is not displayed directly and textures the overlay
/// plane, which already follows the marker's pose.
#[derive(Clone)]
pub struct ViewportFitter {
    mirror: bool,
    metrics: Arc<SessionMetrics>,
}

impl ViewportFitter {
    /// Create a fitter with the given mirror orientation.
    pub fn new(mirror: bool, metrics: Arc<SessionMetrics>) -> Self {
        Self { mirror, metrics }
    }

    /// The mirror orientation this fitter applies.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Apply full-viewport placement to every displayed element and resize
    /// the engine's internal render target.
    pub fn fit(&self, surface: &dyn RenderSurface) {
        let viewport = surface.viewport();
        let placement = Placement::cover(viewport, self.mirror);

        for element in surface.elements() {
            match element.kind {
                // Not displayed; must stay untransformed.
                SurfaceKind::OverlaySource => continue,
                SurfaceKind::Canvas | SurfaceKind::CameraFeed => {
                    surface.place(&element, &placement);
                }
            }
        }

        surface.resize_renderer(viewport);
        self.metrics.fit_applied();
        trace!(
            width = viewport.width,
            height = viewport.height,
            mirrored = self.mirror,
            "viewport fit applied"
        );
    }
}
