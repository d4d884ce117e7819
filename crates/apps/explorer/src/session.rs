//! Scripted host loop: plays the map widget, the camera and the transport
//! around an [`Explorer`].

use compute::SyntheticPoint;
use foundation::{normalize_name, BoundingBox};
use layers::{Controls, RegionLayerSnapshot};
use navigation::{Command, Explorer, ExplorerEvent};
use runtime::{EventBus, Frame};
use streaming::{fetch_logged, Fetcher, Request};
use tracing::{debug, info};

use crate::camera::FlyToCamera;

/// One scripted user action, applied once the previous one has fully
/// settled (camera still, no fetch in flight).
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Click a region by key, or by name in any administrative spelling.
    Click(String),
    /// Point at a region the same way; the widget restyles, nothing navigates.
    Hover(String),
    Back,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    NoSuchRegion { input: String, level: String },
    Stalled { frames: u64 },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoSuchRegion { input, level } => {
                write!(f, "no {level} named {input:?} is displayed")
            }
            SessionError::Stalled { frames } => {
                write!(f, "navigation did not settle within {frames} frames")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// What the render collaborator currently shows.
#[derive(Debug, Clone, Default)]
pub struct Display {
    pub regions: Option<RegionLayerSnapshot>,
    pub points: Vec<SyntheticPoint>,
    pub controls: Option<Controls>,
    pub camera: Option<BoundingBox>,
}

pub struct Session<'a> {
    explorer: Explorer,
    fetcher: &'a dyn Fetcher,
    camera: FlyToCamera,
    bus: EventBus<ExplorerEvent>,
    frame: Frame,
    queued_fetches: Vec<(Request, String)>,
    display: Display,
    max_frames: u64,
}

impl<'a> Session<'a> {
    pub fn new(explorer: Explorer, fetcher: &'a dyn Fetcher, fps: f64, max_frames: u64) -> Self {
        Self {
            explorer,
            fetcher,
            camera: FlyToCamera::new(),
            bus: EventBus::new(),
            frame: Frame::new(0, 1.0 / fps.max(1.0)),
            queued_fetches: Vec::new(),
            display: Display::default(),
            max_frames,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn frames(&self) -> u64 {
        self.frame.index
    }

    /// Starts the explorer and plays `script` to completion.
    pub async fn run(&mut self, script: Vec<Step>) -> Result<(), SessionError> {
        self.start();
        self.play(script).await
    }

    pub fn start(&mut self) {
        let cmds = self.explorer.start();
        self.execute(cmds);
    }

    /// Steps frames until every step of `script` has been applied and the
    /// view has settled again.
    pub async fn play(&mut self, script: Vec<Step>) -> Result<(), SessionError> {
        let mut script = script.into_iter();
        while self.frame.index < self.max_frames {
            self.flush_fetches().await;
            while let Some(stamped) = self.bus.pop() {
                let cmds = self.explorer.handle(stamped.event);
                self.execute(cmds);
            }

            if self.is_idle() {
                let Some(step) = script.next() else {
                    return Ok(());
                };
                let event = self.event_for(step)?;
                debug!(frame = self.frame.index, ?event, "scripted step");
                self.bus.emit(self.frame, event);
                continue;
            }

            if let Some(fit) = self.camera.update(self.frame.dt_s) {
                self.bus.emit(self.frame, ExplorerEvent::CameraSettled(fit));
            }
            self.display.camera = self.camera.extent();
            self.frame = self.frame.next();
        }
        Err(SessionError::Stalled {
            frames: self.max_frames,
        })
    }

    fn is_idle(&self) -> bool {
        !self.explorer.is_animating()
            && !self.camera.is_moving()
            && self.explorer.fetches_in_flight() == 0
            && self.queued_fetches.is_empty()
            && self.bus.is_empty()
    }

    fn execute(&mut self, cmds: Vec<Command>) {
        for cmd in cmds {
            match cmd {
                Command::FitCamera { fit, bbox, options } => {
                    debug!(%fit, ?bbox, "camera fit");
                    self.camera.fly_to(fit, bbox, options);
                }
                Command::Fetch { ticket, url } => self.queued_fetches.push((ticket, url)),
                Command::ShowRegions(snapshot) => {
                    info!(
                        level = %snapshot.level,
                        regions = snapshot.regions.len(),
                        "regions shown"
                    );
                    self.display.regions = Some(snapshot);
                }
                Command::RestyleRegions(restyle) => {
                    let applied = self
                        .display
                        .regions
                        .as_mut()
                        .is_some_and(|shown| shown.apply(&restyle));
                    if !applied {
                        debug!(level = %restyle.level, "restyle for a layer not on screen");
                    }
                }
                Command::ShowPoints(points) => self.display.points = points,
                Command::ShowControls(controls) => self.display.controls = Some(controls),
            }
        }
    }

    async fn flush_fetches(&mut self) {
        for (ticket, url) in std::mem::take(&mut self.queued_fetches) {
            let result = fetch_logged(self.fetcher, &url).await;
            self.bus
                .emit(self.frame, ExplorerEvent::FetchCompleted { ticket, result });
        }
    }

    fn event_for(&self, step: Step) -> Result<ExplorerEvent, SessionError> {
        match step {
            Step::Back => Ok(ExplorerEvent::Back),
            Step::Reset => Ok(ExplorerEvent::Reset),
            Step::Click(input) => Ok(ExplorerEvent::RegionClicked {
                key: self.displayed_key(&input)?,
            }),
            Step::Hover(input) => Ok(ExplorerEvent::RegionHovered {
                key: Some(self.displayed_key(&input)?),
            }),
        }
    }

    fn displayed_key(&self, input: &str) -> Result<String, SessionError> {
        self.resolve_key(input)
            .ok_or_else(|| SessionError::NoSuchRegion {
                level: self.explorer.layer().level().to_string(),
                input: input.to_string(),
            })
    }

    fn resolve_key(&self, input: &str) -> Option<String> {
        let layer = self.explorer.layer();
        let input = input.trim();
        if let Some(unit) = layer.unit(input) {
            return Some(unit.key.clone());
        }
        let wanted = normalize_name(input);
        layer
            .units()
            .find(|u| u.join_key() == wanted)
            .map(|u| u.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::DatasetCatalog;
    use navigation::NavState;
    use streaming::{FetchError, MemoryFetcher};

    const PROVINCES: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"prov_id": "31", "prov_name": "DKI Jakarta"},
         "geometry": {"type": "Polygon", "coordinates": [[
             [106, -6.5], [107, -6.5], [107, -6], [106, -6], [106, -6.5]
         ]]}}
    ]}"#;

    const REGENCIES: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Kota Jakarta Selatan", "prov_id": "31"},
         "geometry": {"type": "Polygon", "coordinates": [[
             [106.7, -6.4], [106.9, -6.4], [106.9, -6.2], [106.7, -6.2], [106.7, -6.4]
         ]]}}
    ]}"#;

    const DISTRICTS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature",
         "properties": {"district": "Cilandak", "regency": "Kota Administrasi Jakarta Selatan"},
         "geometry": {"type": "Polygon", "coordinates": [[
             [106.75, -6.4], [106.85, -6.4], [106.85, -6.3], [106.75, -6.3], [106.75, -6.4]
         ]]}}
    ]}"#;

    fn fetcher(catalog: &DatasetCatalog) -> MemoryFetcher {
        MemoryFetcher::new()
            .with_body(catalog.province_url(), PROVINCES)
            .with_body(catalog.regency_url(), REGENCIES)
            .with_body(catalog.district_url("31").unwrap(), DISTRICTS)
    }

    #[test]
    fn scripted_drill_down_reaches_district() {
        let catalog = DatasetCatalog::indonesia();
        let f = fetcher(&catalog);
        let mut s = Session::new(Explorer::new(catalog.clone()), &f, 60.0, 10_000);
        let script = vec![
            Step::Click("31".into()),
            Step::Click("jakarta selatan".into()),
            Step::Click("Cilandak".into()),
        ];
        pollster::block_on(s.run(script)).unwrap();

        assert_eq!(s.explorer().state(), NavState::DistrictSelected);
        let regions = s.display().regions.as_ref().unwrap();
        assert_eq!(regions.regions.len(), 1);
        assert!((5..=10).contains(&s.display().points.len()));
        assert_eq!(s.display().controls.as_ref().unwrap().actions.len(), 3);
        assert!(s.frames() > 0);
        assert_eq!(
            f.requested(),
            vec![
                catalog.province_url(),
                catalog.regency_url(),
                catalog.district_url("31").unwrap(),
                catalog.district_url("31").unwrap(),
            ]
        );
    }

    #[test]
    fn back_and_reset_steps() {
        let catalog = DatasetCatalog::indonesia();
        let f = fetcher(&catalog);
        let mut s = Session::new(Explorer::new(catalog), &f, 30.0, 10_000);
        let script = vec![
            Step::Click("31".into()),
            Step::Click("Kota Jakarta Selatan".into()),
            Step::Back,
        ];
        pollster::block_on(s.run(script)).unwrap();
        assert_eq!(s.explorer().state(), NavState::ProvinceSelected);

        pollster::block_on(s.play(vec![Step::Reset])).unwrap();
        assert_eq!(s.explorer().state(), NavState::Root);
    }

    #[test]
    fn hover_restyles_the_shown_layer_in_place() {
        let catalog = DatasetCatalog::indonesia();
        let f = fetcher(&catalog);
        let mut s = Session::new(Explorer::new(catalog), &f, 60.0, 10_000);
        pollster::block_on(s.run(vec![Step::Hover("DKI Jakarta".into())])).unwrap();

        assert_eq!(s.explorer().state(), NavState::Root);
        assert_eq!(s.explorer().layer().hovered(), Some("31"));
        let shown = s.display().regions.as_ref().unwrap();
        assert_eq!(
            shown.region("31").unwrap().style.stroke_weight,
            layers::HOVER_STROKE_WEIGHT
        );
        assert_eq!(shown, &s.explorer().layer().snapshot());
    }

    #[test]
    fn unknown_region_is_an_error() {
        let catalog = DatasetCatalog::indonesia();
        let f = fetcher(&catalog);
        let mut s = Session::new(Explorer::new(catalog), &f, 60.0, 10_000);
        let err = pollster::block_on(s.run(vec![Step::Click("Atlantis".into())])).unwrap_err();
        assert_eq!(
            err,
            SessionError::NoSuchRegion {
                input: "Atlantis".into(),
                level: "province".into()
            }
        );
    }

    #[test]
    fn failed_fetch_still_settles() {
        let catalog = DatasetCatalog::indonesia();
        let f = MemoryFetcher::new().with_error(catalog.province_url(), FetchError::Status(500));
        let mut s = Session::new(Explorer::new(catalog), &f, 60.0, 10_000);
        pollster::block_on(s.run(Vec::new())).unwrap();
        let regions = s.display().regions.as_ref().unwrap();
        assert!(regions.regions.is_empty());
    }

    #[test]
    fn gives_up_after_max_frames() {
        let catalog = DatasetCatalog::indonesia();
        let f = fetcher(&catalog);
        let mut s = Session::new(Explorer::new(catalog), &f, 60.0, 3);
        assert_eq!(
            pollster::block_on(s.run(Vec::new())),
            Err(SessionError::Stalled { frames: 3 })
        );
    }
}
