use foundation::BoundingBox;
use tracing::debug;

/// Tolerance, in degrees, under which a requested box counts as the
/// current extent.
pub const EXTENT_EPSILON_DEG: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FitId(pub u64);

impl std::fmt::Display for FitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fit#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome<T> {
    /// No camera move was needed; the continuation is handed straight back.
    Immediate(T),
    /// A move started; the continuation comes back from [`ViewSync::settle`].
    Animating(FitId),
}

#[derive(Debug, Clone)]
struct PendingFit<T> {
    id: FitId,
    target: BoundingBox,
    on_settled: T,
}

/// Couples camera fits with the work that must wait for them.
///
/// At most one fit is pending. A new request supersedes the pending one and
/// its continuation is dropped: last request wins, and a late settle for a
/// superseded fit yields nothing.
#[derive(Debug)]
pub struct ViewSync<T> {
    next_id: u64,
    pending: Option<PendingFit<T>>,
    extent: Option<BoundingBox>,
}

impl<T> Default for ViewSync<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            pending: None,
            extent: None,
        }
    }
}

impl<T> ViewSync<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_fit(&mut self, bbox: Option<BoundingBox>, on_settled: T) -> FitOutcome<T> {
        let superseded = self.pending.take();
        if let Some(old) = &superseded {
            debug!(fit = %old.id, "camera fit superseded");
        }

        let Some(target) = bbox else {
            return FitOutcome::Immediate(on_settled);
        };
        if superseded.is_none()
            && let Some(extent) = &self.extent
            && extent.approx_eq(&target, EXTENT_EPSILON_DEG)
        {
            return FitOutcome::Immediate(on_settled);
        }

        let id = FitId(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingFit {
            id,
            target,
            on_settled,
        });
        FitOutcome::Animating(id)
    }

    /// Hands back the continuation of `id` if it is still the pending fit.
    pub fn settle(&mut self, id: FitId) -> Option<T> {
        match self.pending.take() {
            Some(p) if p.id == id => {
                self.extent = Some(p.target);
                Some(p.on_settled)
            }
            other => {
                self.pending = other;
                debug!(fit = %id, "settle for a fit that is no longer pending");
                None
            }
        }
    }

    pub fn pending_fit(&self) -> Option<FitId> {
        self.pending.as_ref().map(|p| p.id)
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Box the camera last settled on.
    pub fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }
}
