use geocoin_game::{Action, Direction};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub tracking: bool,
    pub on_action: Callback<Action>,
    #[prop_or_default]
    pub on_toggle_tracking: Callback<()>,
}

const fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "⬆️",
        Direction::South => "⬇️",
        Direction::East => "➡️",
        Direction::West => "⬅️",
    }
}

fn emit(on_action: &Callback<Action>, action: Action) -> Callback<MouseEvent> {
    let on_action = on_action.clone();
    Callback::from(move |_| on_action.emit(action))
}

#[function_component(Controls)]
pub fn controls(p: &Props) -> Html {
    let on_sensor = {
        let cb = p.on_toggle_tracking.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <nav class="panel controls" aria-label="Game controls">
            <div class="move-pad">
                { for Direction::ALL.iter().map(|&direction| html! {
                    <button id={direction.label()} title={format!("Move {}", direction.label())}
                        onclick={emit(&p.on_action, Action::Move(direction))}>
                        { arrow(direction) }
                    </button>
                }) }
            </div>
            <button id="sensor" aria-pressed={p.tracking.to_string()} onclick={on_sensor}>
                { if p.tracking { "🌐 Stop tracking" } else { "🌐 Track me" } }
            </button>
            <button id="saveGame" onclick={emit(&p.on_action, Action::Save)}>{ "💾 Save" }</button>
            <button id="restoreGame" onclick={emit(&p.on_action, Action::Restore)}>{ "⟲ Restore" }</button>
            <button id="resetGame" onclick={emit(&p.on_action, Action::Reset)}>{ "🚮 Reset" }</button>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn controls_render_every_direction_and_command() {
        let props = Props {
            tracking: false,
            on_action: Callback::noop(),
            on_toggle_tracking: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Controls>::with_props(props).render());
        for id in ["north", "south", "east", "west", "sensor", "saveGame", "restoreGame", "resetGame"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}: {html}");
        }
        assert!(html.contains("Track me"), "{html}");
    }

    #[test]
    fn tracking_flips_sensor_label() {
        let props = Props {
            tracking: true,
            on_action: Callback::noop(),
            on_toggle_tracking: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Controls>::with_props(props).render());
        assert!(html.contains("Stop tracking"), "{html}");
        assert!(html.contains("aria-pressed=\"true\""), "{html}");
    }
}
