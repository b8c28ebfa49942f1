#[cfg(target_arch = "wasm32")]
use crate::geolocation::PositionWatch;
#[cfg(target_arch = "wasm32")]
use crate::storage::LocalStorageSlot;
use crate::components::cache_board::{BoardEntry, CacheBoard};
use crate::components::controls::Controls;
use crate::components::status_panel::StatusPanel;
use geocoin_game::{Action, GeoPoint, GridCell, SnapshotSlot};
use yew::prelude::*;

pub mod model;

pub use model::{GameModel, MarkerLayer, Msg, TRAIL_LIMIT};

pub const RESET_PROMPT: &str = "Are you sure you want to reset the game state?";

/// Board rows for the markers currently on screen.
#[must_use]
pub fn board_entries<S: SnapshotSlot>(model: &GameModel<S>) -> Vec<BoardEntry> {
    model
        .layer()
        .markers()
        .into_iter()
        .map(|view| BoardEntry {
            deposit_cost: model.deposit_quote(view.cell).unwrap_or_default(),
            view,
        })
        .collect()
}

#[derive(Properties, Clone, PartialEq)]
pub struct ScreenProps {
    pub points: u64,
    pub player: GeoPoint,
    pub cell: GridCell,
    pub tracking: bool,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    #[prop_or_default]
    pub log: Vec<AttrValue>,
    #[prop_or_default]
    pub steps: usize,
    #[prop_or_default]
    pub trail: Vec<GeoPoint>,
    pub entries: Vec<BoardEntry>,
    pub on_action: Callback<Action>,
    pub on_toggle_tracking: Callback<()>,
    pub on_dismiss: Callback<()>,
}

impl ScreenProps {
    /// Snapshot the model into props, wiring the given callbacks.
    pub fn from_model<S: SnapshotSlot>(
        model: &GameModel<S>,
        on_action: Callback<Action>,
        on_toggle_tracking: Callback<()>,
        on_dismiss: Callback<()>,
    ) -> Self {
        let history = model.history();
        Self {
            points: model.layer().points(),
            player: model.player(),
            cell: model.player_cell(),
            tracking: model.tracking(),
            notice: model.layer().notice().map(|n| AttrValue::from(n.to_string())),
            log: model
                .log()
                .iter()
                .map(|line| AttrValue::from(line.clone()))
                .collect(),
            steps: history.len().saturating_sub(1),
            trail: history[history.len().saturating_sub(TRAIL_LIMIT)..].to_vec(),
            entries: board_entries(model),
            on_action,
            on_toggle_tracking,
            on_dismiss,
        }
    }
}

#[function_component(GameScreen)]
pub fn game_screen(p: &ScreenProps) -> Html {
    html! {
        <main class="geocoin">
            <StatusPanel
                points={p.points}
                player={p.player}
                cell={p.cell}
                tracking={p.tracking}
                notice={p.notice.clone()}
                log={p.log.clone()}
                steps={p.steps}
                trail={p.trail.clone()}
                on_dismiss={p.on_dismiss.clone()}
            />
            <Controls
                tracking={p.tracking}
                on_action={p.on_action.clone()}
                on_toggle_tracking={p.on_toggle_tracking.clone()}
            />
            <CacheBoard
                entries={p.entries.clone()}
                points={p.points}
                on_action={p.on_action.clone()}
            />
        </main>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let model = use_reducer(|| {
        GameModel::boot(crate::world::embedded_config(), LocalStorageSlot::default())
    });

    {
        let dispatcher = model.dispatcher();
        use_effect_with(model.tracking(), move |tracking| {
            let watch = if *tracking {
                let on_fix = {
                    let d = dispatcher.clone();
                    move |point| d.dispatch(Msg::Play(Action::MoveTo(point)))
                };
                let on_error = {
                    let d = dispatcher.clone();
                    move |message| d.dispatch(Msg::LocationFailed(message))
                };
                match PositionWatch::start(on_fix, on_error) {
                    Ok(watch) => Some(watch),
                    Err(err) => {
                        dispatcher.dispatch(Msg::LocationFailed(err.to_string()));
                        None
                    }
                }
            } else {
                None
            };
            move || drop(watch)
        });
    }

    let on_action = {
        let d = model.dispatcher();
        Callback::from(move |action: Action| {
            if matches!(action, Action::Reset) && !crate::dom::confirm(RESET_PROMPT) {
                return;
            }
            d.dispatch(Msg::Play(action));
        })
    };
    let on_toggle_tracking = {
        let d = model.dispatcher();
        let tracking = model.tracking();
        Callback::from(move |()| d.dispatch(Msg::Tracking(!tracking)))
    };
    let on_dismiss = {
        let d = model.dispatcher();
        Callback::from(move |()| d.dispatch(Msg::Dismiss))
    };

    let props = ScreenProps::from_model(&*model, on_action, on_toggle_tracking, on_dismiss);
    html! { <GameScreen ..props /> }
}
