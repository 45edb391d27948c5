use crate::geo::LatLng;
use tracing::debug;

/// New York City
pub const DEFAULT_CENTER: LatLng = LatLng::new(40.7128, -74.0060);
pub const DEFAULT_ZOOM: u8 = 13;

/// City level
pub const SEARCH_ZOOM: u8 = 13;
pub const GEOLOCATION_ZOOM: u8 = 13;
/// Street level, used when jumping to a todo
pub const TODO_ZOOM: u8 = 15;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

/// Fraction of the visible longitude span moved per pan step.
const PAN_STEP: f64 = 0.25;

/// A terminal cell is roughly twice as tall as it is wide.
const CELL_ASPECT: f64 = 2.0;

/// Geographic bounds of the visible map area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Viewport {
    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Coordinate at a relative position inside the viewport, `fx` growing
    /// east from 0.0 and `fy` growing south from 0.0.
    pub fn coordinate_at(&self, fx: f64, fy: f64) -> LatLng {
        LatLng::new(
            self.north - fy.clamp(0.0, 1.0) * self.lat_span(),
            self.west + fx.clamp(0.0, 1.0) * self.lng_span(),
        )
        .normalized()
    }

    /// Longitude of `lng` on this viewport's x axis. Near the antimeridian the
    /// bounds run past ±180, so the value may be shifted by a full turn.
    pub fn wrap_lng(&self, lng: f64) -> Option<f64> {
        [lng, lng + 360.0, lng - 360.0]
            .into_iter()
            .find(|x| (self.west..=self.east).contains(x))
    }

    /// Canvas `(x, y)` of a position, or `None` when it is off screen.
    pub fn place(&self, position: LatLng) -> Option<(f64, f64)> {
        if !(self.south..=self.north).contains(&position.lat) {
            return None;
        }
        self.wrap_lng(position.lng).map(|x| (x, position.lat))
    }

    pub fn contains(&self, position: LatLng) -> bool {
        self.place(position).is_some()
    }
}

/// Camera state of the map surface.
///
/// Recentering before the surface is attached (first frame not drawn yet) is
/// ignored rather than queued.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
    attached: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center: center.normalized(),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Returns `false` when the surface is not attached yet.
    pub fn recenter_and_zoom(&mut self, position: LatLng, zoom: u8) -> bool {
        if !self.attached {
            debug!(%position, zoom, "map not attached, ignoring recenter");
            return false;
        }
        self.center = position.normalized();
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        debug!(center = %self.center, zoom = self.zoom, "map recentered");
        true
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Move the camera by whole pan steps, `dx` east and `dy` north.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let step = self.lng_span() * PAN_STEP;
        self.center = LatLng::new(
            self.center.lat + f64::from(dy) * step,
            self.center.lng + f64::from(dx) * step,
        )
        .normalized();
    }

    /// Degrees of longitude visible at the current zoom (whole world at zoom 1).
    pub fn lng_span(&self) -> f64 {
        360.0 / f64::from(1u32 << (self.zoom - 1))
    }

    /// Bounds for a map area of `cols` x `rows` terminal cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        let lng_span = self.lng_span();
        let lat_span = if cols == 0 {
            lng_span
        } else {
            (lng_span * f64::from(rows) * CELL_ASPECT / f64::from(cols)).min(180.0)
        };

        Viewport {
            west: self.center.lng - lng_span / 2.0,
            east: self.center.lng + lng_span / 2.0,
            south: self.center.lat - lat_span / 2.0,
            north: self.center.lat + lat_span / 2.0,
        }
    }
}
