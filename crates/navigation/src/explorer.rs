//! Drill-down coordinator.
//!
//! [`Explorer`] performs no IO. The host feeds it [`ExplorerEvent`]s (clicks,
//! camera settles, fetch completions) and carries out the [`Command`]s it
//! returns: animate the camera, fetch a boundary file, redraw a layer.
//! Selection only advances once the camera has settled on the new region,
//! and a fetch result is only applied while the path it was issued for is
//! still current.

use catalog::{DatasetCatalog, FitOptions};
use compute::{DEFAULT_POINT_COUNT, SyntheticPoint, generate_points_inside};
use formats::feature::FeatureCollection;
use formats::{districts_of, provinces, regencies_of};
use foundation::{AdminLevel, AdministrativeUnit, BoundingBox};
use layers::{Controls, RegionLayer, RegionLayerSnapshot, RegionRestyle};
use streaming::{FetchError, FetchTracker, Request, Resolution};
use tracing::{debug, info, warn};

use crate::machine::{NavError, Transition};
use crate::selection::{NavState, PathKey, SelectionPath};
use crate::view_sync::{FitId, FitOutcome, ViewSync};

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    RegionClicked { key: String },
    /// `None` when the pointer left every region.
    RegionHovered { key: Option<String> },
    Back,
    Reset,
    CameraSettled(FitId),
    FetchCompleted {
        ticket: Request,
        result: Result<FeatureCollection, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FitCamera {
        fit: FitId,
        bbox: BoundingBox,
        options: FitOptions,
    },
    Fetch {
        ticket: Request,
        url: String,
    },
    ShowRegions(RegionLayerSnapshot),
    /// Style-only update for the layer already shown.
    RestyleRegions(RegionRestyle),
    ShowPoints(Vec<SyntheticPoint>),
    ShowControls(Controls),
}

#[derive(Debug)]
pub struct Explorer {
    catalog: DatasetCatalog,
    path: SelectionPath,
    layer: RegionLayer,
    view: ViewSync<SelectionPath>,
    fetches: FetchTracker<PathKey>,
}

impl Explorer {
    pub fn new(catalog: DatasetCatalog) -> Self {
        Self {
            catalog,
            path: SelectionPath::root(),
            layer: RegionLayer::loading(AdminLevel::Province),
            view: ViewSync::new(),
            fetches: FetchTracker::new(),
        }
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn state(&self) -> NavState {
        self.path.state()
    }

    pub fn layer(&self) -> &RegionLayer {
        &self.layer
    }

    pub fn is_animating(&self) -> bool {
        self.view.is_animating()
    }

    pub fn fetches_in_flight(&self) -> usize {
        self.fetches.in_flight()
    }

    /// Frames the whole country, then loads the provinces.
    pub fn start(&mut self) -> Vec<Command> {
        let country = self.catalog.country_box();
        self.move_to(SelectionPath::root(), Some(country))
    }

    pub fn handle(&mut self, event: ExplorerEvent) -> Vec<Command> {
        match event {
            ExplorerEvent::RegionClicked { key } => self.on_click(&key),
            ExplorerEvent::RegionHovered { key } => self
                .layer
                .set_hovered(key.as_deref())
                .map(Command::RestyleRegions)
                .into_iter()
                .collect(),
            ExplorerEvent::Back => self.navigate(Transition::Back),
            ExplorerEvent::Reset => self.navigate(Transition::Reset),
            ExplorerEvent::CameraSettled(fit) => match self.view.settle(fit) {
                Some(next) => self.enter(next),
                None => Vec::new(),
            },
            ExplorerEvent::FetchCompleted { ticket, result } => self.on_fetched(ticket, result),
        }
    }

    fn on_click(&mut self, key: &str) -> Vec<Command> {
        let Some(unit) = self.layer.unit(key).cloned() else {
            debug!(key, "click on a region that is not displayed");
            return Vec::new();
        };
        if !unit.is_drillable() {
            debug!(key, "province has no code to drill into");
            return Vec::new();
        }
        let next = match self.path.state() {
            NavState::Root => self.path.apply(Transition::SelectProvince(unit)),
            NavState::ProvinceSelected => self.path.apply(Transition::SelectRegency(unit)),
            NavState::RegencySelected => self.path.apply(Transition::SelectDistrict(unit)),
            NavState::DistrictSelected => {
                if self.path.district().is_some_and(|d| d.key == unit.key) {
                    debug!(key, "district already focused");
                    return Vec::new();
                }
                self.path
                    .apply(Transition::Back)
                    .and_then(|p| p.apply(Transition::SelectDistrict(unit)))
            }
        };
        self.after_transition(next)
    }

    fn navigate(&mut self, transition: Transition) -> Vec<Command> {
        let next = self.path.apply(transition);
        self.after_transition(next)
    }

    fn after_transition(&mut self, next: Result<SelectionPath, NavError>) -> Vec<Command> {
        match next {
            Ok(next) => {
                let target = self.fit_target(&next);
                self.move_to(next, target)
            }
            Err(err) => {
                warn!(%err, state = %self.path.state(), "transition ignored");
                Vec::new()
            }
        }
    }

    fn fit_target(&self, path: &SelectionPath) -> Option<BoundingBox> {
        if path.state() == NavState::Root {
            return Some(self.catalog.country_box());
        }
        path.focus_bounds()
    }

    fn move_to(&mut self, next: SelectionPath, target: Option<BoundingBox>) -> Vec<Command> {
        match self.view.request_fit(target, next) {
            FitOutcome::Immediate(next) => self.enter(next),
            FitOutcome::Animating(fit) => match target {
                Some(bbox) => vec![Command::FitCamera {
                    fit,
                    bbox,
                    options: self.catalog.fit,
                }],
                None => Vec::new(),
            },
        }
    }

    /// Commits `next` once the camera is in place and asks for its data.
    fn enter(&mut self, next: SelectionPath) -> Vec<Command> {
        info!(path = %next.key(), state = %next.state(), "selection changed");
        self.path = next;

        let level = self.path.displayed_level();
        self.layer = RegionLayer::loading(level);
        let mut out = vec![
            Command::ShowRegions(self.layer.snapshot()),
            Command::ShowControls(Controls::for_depth(self.path.depth())),
            Command::ShowPoints(self.points()),
        ];

        let province_code = self.path.province().and_then(|p| p.id.as_deref());
        match self.catalog.url_for(level, province_code) {
            Ok(url) => {
                let ticket = self.fetches.issue(self.path.key(), url.clone());
                debug!(%ticket, %url, "fetch issued");
                out.push(Command::Fetch { ticket, url });
            }
            Err(err) => {
                warn!(%err, "no boundary file for this selection");
                self.layer = RegionLayer::loaded(level, Vec::new());
                out.push(Command::ShowRegions(self.layer.snapshot()));
            }
        }
        out
    }

    fn points(&self) -> Vec<SyntheticPoint> {
        match self.path.district() {
            Some(d) => generate_points_inside(
                &d.geometry,
                &self.path.key().to_string(),
                DEFAULT_POINT_COUNT,
            ),
            None => Vec::new(),
        }
    }

    fn on_fetched(
        &mut self,
        ticket: Request,
        result: Result<FeatureCollection, FetchError>,
    ) -> Vec<Command> {
        match self.fetches.resolve(ticket, &self.path.key()) {
            Resolution::Apply { url } => {
                let level = self.path.displayed_level();
                self.layer = match result {
                    Ok(collection) => {
                        let units = self.units_for(&collection);
                        info!(%url, level = %level, units = units.len(), "layer loaded");
                        RegionLayer::loaded(level, units)
                    }
                    Err(err) => {
                        warn!(%url, %err, "layer left empty");
                        RegionLayer::failed(level, err.to_string())
                    }
                };
                let focused = self.path.district().map(|d| d.key.clone());
                self.layer.set_focused(focused.as_deref());
                vec![Command::ShowRegions(self.layer.snapshot())]
            }
            Resolution::Stale { url } => {
                debug!(%ticket, %url, "stale fetch discarded");
                Vec::new()
            }
            Resolution::Unknown => {
                debug!(%ticket, "completion for an unknown fetch");
                Vec::new()
            }
        }
    }

    fn units_for(&self, collection: &FeatureCollection) -> Vec<AdministrativeUnit> {
        match (self.path.province(), self.path.regency()) {
            (None, _) => provinces(collection),
            (Some(province), None) => regencies_of(collection, province),
            (Some(_), Some(regency)) => districts_of(collection, regency),
        }
    }
}
