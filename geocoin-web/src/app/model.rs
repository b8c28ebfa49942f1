use std::collections::BTreeMap;
use std::rc::Rc;

use geocoin_game::{
    Action, CacheRenderer, CacheView, GeoPoint, GeocacheSession, GridCell, Presenter,
    SnapshotSlot, WorldConfig,
};
use yew::Reducible;

/// Entries kept in the on-screen activity log.
pub const LOG_LIMIT: usize = 6;
/// Most recent trail positions shown in the status panel.
pub const TRAIL_LIMIT: usize = 5;

/// Messages accepted by the game reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Play(Action),
    Tracking(bool),
    LocationFailed(String),
    Dismiss,
}

/// Board-side presenter: the markers currently on screen, plus the points
/// total and the pending notice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerLayer {
    markers: BTreeMap<GridCell, CacheView>,
    points: u64,
    notice: Option<String>,
}

impl MarkerLayer {
    /// Markers in ascending cell order.
    #[must_use]
    pub fn markers(&self) -> Vec<CacheView> {
        self.markers.values().cloned().collect()
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }
}

impl Presenter for MarkerLayer {
    type Handle = GridCell;

    fn render_cache(&mut self, view: &CacheView) -> GridCell {
        self.markers.insert(view.cell, view.clone());
        view.cell
    }

    fn remove_cache(&mut self, handle: GridCell) {
        self.markers.remove(&handle);
    }

    fn show_points(&mut self, points: u64) {
        self.points = points;
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

/// Everything the page renders. All mutations arrive as [`Msg`]s through the
/// reducer, one at a time.
#[derive(Clone)]
pub struct GameModel<S: SnapshotSlot> {
    session: Option<GeocacheSession<S>>,
    renderer: CacheRenderer<MarkerLayer>,
    layer: MarkerLayer,
    log: Vec<String>,
    tracking: bool,
}

impl<S: SnapshotSlot> GameModel<S> {
    /// Start a session on `slot` and draw the opening neighbourhood.
    pub fn boot(config: WorldConfig, slot: S) -> Self {
        let mut model = Self {
            session: None,
            renderer: CacheRenderer::new(),
            layer: MarkerLayer::default(),
            log: Vec::new(),
            tracking: false,
        };
        match GeocacheSession::start(config, slot) {
            Ok(session) => {
                model.renderer.sync(&session, &mut model.layer);
                model.session = Some(session);
            }
            Err(err) => {
                log::error!("could not start session: {err}");
                model.layer.notify(&err.notice());
            }
        }
        model
    }

    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::Play(action) => self.play(action),
            Msg::Tracking(on) => {
                self.tracking = on;
                let line = if on {
                    "Tracking your location"
                } else {
                    "Location tracking stopped"
                };
                push_log(&mut self.log, line.to_string());
            }
            Msg::LocationFailed(message) => {
                self.tracking = false;
                self.layer.notify(&message);
            }
            Msg::Dismiss => self.layer.clear_notice(),
        }
    }

    fn play(&mut self, action: Action) {
        let Some(session) = self.session.as_mut() else {
            self.layer.notify("The game is not running.");
            return;
        };
        match session.dispatch(action) {
            Ok(outcome) => {
                self.layer.clear_notice();
                push_log(&mut self.log, outcome.summary());
            }
            Err(err) => {
                log::warn!("{action:?} failed: {err}");
                self.layer.notify(&err.notice());
            }
        }
        self.renderer.sync(session, &mut self.layer);
    }

    #[must_use]
    pub const fn session(&self) -> Option<&GeocacheSession<S>> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn layer(&self) -> &MarkerLayer {
        &self.layer
    }

    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    #[must_use]
    pub const fn tracking(&self) -> bool {
        self.tracking
    }

    #[must_use]
    pub fn player(&self) -> GeoPoint {
        self.session
            .as_ref()
            .map_or(GeoPoint::NULL_ISLAND, GeocacheSession::player)
    }

    /// Every position visited this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GeoPoint] {
        match &self.session {
            Some(session) => session.history(),
            None => &[],
        }
    }

    #[must_use]
    pub fn player_cell(&self) -> GridCell {
        self.session
            .as_ref()
            .map_or_else(GridCell::default, GeocacheSession::player_cell)
    }

    #[must_use]
    pub fn deposit_quote(&self, cell: GridCell) -> Option<u32> {
        self.session.as_ref()?.deposit_quote(cell)
    }
}

impl<S: SnapshotSlot + Clone> Reducible for GameModel<S> {
    type Action = Msg;

    fn reduce(self: Rc<Self>, msg: Msg) -> Rc<Self> {
        // The reducer handle keeps the old Rc alive, so this copies the model
        // once per message.
        let mut next = Rc::unwrap_or_clone(self);
        next.apply(msg);
        Rc::new(next)
    }
}

fn push_log(log: &mut Vec<String>, line: String) {
    log.push(line);
    if log.len() > LOG_LIMIT {
        let excess = log.len() - LOG_LIMIT;
        log.drain(..excess);
    }
}
