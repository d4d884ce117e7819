//! Stand-in for the map widget's animated camera.
//!
//! Flies between bounding boxes with a smoothstep ease over the requested
//! duration, stepped by the fixed frame timestep.

use catalog::FitOptions;
use foundation::BoundingBox;
use navigation::FitId;

/// Viewport the padding in [`FitOptions`] is measured against.
pub const VIEWPORT_PX: [f64; 2] = [1024.0, 768.0];

#[derive(Debug, Clone, Copy)]
struct Flight {
    fit: FitId,
    from: BoundingBox,
    to: BoundingBox,
    duration_s: f64,
    elapsed_s: f64,
}

#[derive(Debug, Default)]
pub struct FlyToCamera {
    extent: Option<BoundingBox>,
    flight: Option<Flight>,
}

impl FlyToCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Box currently framed, padded.
    pub fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }

    pub fn is_moving(&self) -> bool {
        self.flight.is_some()
    }

    /// Starts a flight to `bbox`; an unfinished flight is abandoned where it
    /// is and never reports settling.
    pub fn fly_to(&mut self, fit: FitId, bbox: BoundingBox, options: FitOptions) {
        let to = padded(bbox, options.padding_px);
        let from = self.extent.unwrap_or(to);
        self.flight = Some(Flight {
            fit,
            from,
            to,
            duration_s: options.duration_s.max(0.0),
            elapsed_s: 0.0,
        });
    }

    /// Advances by `dt_s`; returns the fit that settled this step, if any.
    pub fn update(&mut self, dt_s: f64) -> Option<FitId> {
        let mut flight = self.flight?;
        flight.elapsed_s += dt_s;
        let t = if flight.duration_s <= 0.0 {
            1.0
        } else {
            (flight.elapsed_s / flight.duration_s).min(1.0)
        };
        self.extent = Some(lerp_box(flight.from, flight.to, smoothstep(t)));
        if t >= 1.0 {
            self.flight = None;
            return Some(flight.fit);
        }
        self.flight = Some(flight);
        None
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp_box(a: BoundingBox, b: BoundingBox, t: f64) -> BoundingBox {
    let l = |x: f64, y: f64| x + (y - x) * t;
    BoundingBox::new(
        l(a.min_lon, b.min_lon),
        l(a.min_lat, b.min_lat),
        l(a.max_lon, b.max_lon),
        l(a.max_lat, b.max_lat),
    )
}

/// Grows `bbox` so `padding_px` of viewport stays free on every side.
fn padded(bbox: BoundingBox, padding_px: u32) -> BoundingBox {
    let pad = f64::from(padding_px);
    let [w_px, h_px] = VIEWPORT_PX;
    let inner_w = (w_px - 2.0 * pad).max(1.0);
    let inner_h = (h_px - 2.0 * pad).max(1.0);
    let dx = bbox.width() * pad / inner_w;
    let dy = bbox.height() * pad / inner_h;
    BoundingBox::new(
        bbox.min_lon - dx,
        bbox.min_lat - dy,
        bbox.max_lon + dx,
        bbox.max_lat + dy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_padding(duration_s: f64) -> FitOptions {
        FitOptions {
            padding_px: 0,
            duration_s,
        }
    }

    #[test]
    fn settles_after_duration() {
        let mut cam = FlyToCamera::new();
        let target = BoundingBox::new(95.0, -11.0, 141.0, 6.0);
        cam.fly_to(FitId(1), target, no_padding(0.5));
        assert!(cam.is_moving());
        assert_eq!(cam.update(0.25), None);
        assert_eq!(cam.update(0.25), Some(FitId(1)));
        assert!(!cam.is_moving());
        assert!(cam.extent().unwrap().approx_eq(&target, 1e-12));
        assert_eq!(cam.update(0.25), None);
    }

    #[test]
    fn eases_between_boxes() {
        let mut cam = FlyToCamera::new();
        cam.fly_to(FitId(1), BoundingBox::new(0.0, 0.0, 10.0, 10.0), no_padding(0.0));
        cam.update(0.1);
        cam.fly_to(FitId(2), BoundingBox::new(10.0, 0.0, 20.0, 10.0), no_padding(1.0));
        cam.update(0.5);
        let mid = cam.extent().unwrap();
        assert!((mid.min_lon - 5.0).abs() < 1e-9);
    }

    #[test]
    fn new_flight_replaces_old_one() {
        let mut cam = FlyToCamera::new();
        cam.fly_to(FitId(1), BoundingBox::new(0.0, 0.0, 1.0, 1.0), no_padding(1.0));
        cam.update(0.5);
        cam.fly_to(FitId(2), BoundingBox::new(5.0, 5.0, 6.0, 6.0), no_padding(1.0));
        assert_eq!(cam.update(1.0), Some(FitId(2)));
    }

    #[test]
    fn padding_grows_the_frame() {
        let b = padded(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 24);
        assert!(b.min_lon < 0.0 && b.max_lon > 10.0);
        assert!(b.min_lat < 0.0 && b.max_lat > 10.0);
        let unpadded = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(padded(unpadded, 0), unpadded);
    }
}
