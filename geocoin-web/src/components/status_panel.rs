use geocoin_game::{GeoPoint, GridCell};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub points: u64,
    pub player: GeoPoint,
    pub cell: GridCell,
    #[prop_or_default]
    pub tracking: bool,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    #[prop_or_default]
    pub log: Vec<AttrValue>,
    /// Moves made this session.
    #[prop_or_default]
    pub steps: usize,
    /// Latest positions on the movement trail, oldest first.
    #[prop_or_default]
    pub trail: Vec<GeoPoint>,
    #[prop_or_default]
    pub on_dismiss: Callback<()>,
}

#[must_use]
pub fn points_text(points: u64) -> String {
    if points == 0 {
        "No points yet...".to_string()
    } else {
        format!("{points} points accumulated")
    }
}

#[must_use]
pub fn steps_text(steps: usize) -> String {
    match steps {
        0 => "No steps taken yet".to_string(),
        1 => "1 step walked".to_string(),
        n => format!("{n} steps walked"),
    }
}

#[function_component(StatusPanel)]
pub fn status_panel(p: &Props) -> Html {
    let tracking_label = if p.tracking {
        "Location: live"
    } else {
        "Location: manual"
    };
    let notice = p.notice.clone().map_or_else(Html::default, |message| {
        let on_dismiss = p.on_dismiss.clone();
        html! {
            <div class="notice" role="alert">
                <span class="notice-text">{ message }</span>
                <button class="notice-dismiss" aria-label="Dismiss" onclick={Callback::from(move |_| on_dismiss.emit(()))}>{ "×" }</button>
            </div>
        }
    });

    html! {
        <section id="statusPanel" class="panel status-panel" aria-live="polite">
            <p class="points">{ points_text(p.points) }</p>
            <p class="muted position">{ format!("You are at {} (cell {})", p.player, p.cell) }</p>
            <p class={classes!("tracking", p.tracking.then_some("tracking-live"))}>{ tracking_label }</p>
            <div class="trail">
                <p class="trail-steps">{ steps_text(p.steps) }</p>
                if p.steps > 0 {
                    <ol class="trail-points">
                        { for p.trail.iter().map(|point| html! { <li>{ point.to_string() }</li> }) }
                    </ol>
                }
            </div>
            { notice }
            if !p.log.is_empty() {
                <ul class="activity-log">
                    { for p.log.iter().map(|line| html! { <li>{ line.clone() }</li> }) }
                </ul>
            }
        </section>
    }
}
