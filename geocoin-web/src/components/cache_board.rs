//! Neighbourhood board: one card per visible cache with its actions.

use geocoin_game::{Action, CacheView};
use yew::prelude::*;

/// A visible cache together with what depositing into it would cost.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub view: CacheView,
    pub deposit_cost: u32,
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub entries: Vec<BoardEntry>,
    pub points: u64,
    pub on_action: Callback<Action>,
}

fn cache_card(entry: &BoardEntry, points: u64, on_action: &Callback<Action>) -> Html {
    let view = &entry.view;
    let cell = view.cell;
    let on_collect = {
        let cb = on_action.clone();
        Callback::from(move |_| cb.emit(Action::Collect(cell)))
    };
    let on_deposit = {
        let cb = on_action.clone();
        Callback::from(move |_| cb.emit(Action::Deposit(cell)))
    };
    let affordable = u64::from(entry.deposit_cost) <= points;
    html! {
        <li class="cache-card" data-cell={cell.to_string()}>
            <div class="cache-summary">
                { format!(
                    "This is a cache at \"{}\". It has {} coins available.",
                    view.position, view.coins_to_collect
                ) }
            </div>
            <div class="cache-identity">{ format!("Coin Identity: {}", view.coin_identity) }</div>
            <div class="cache-actions">
                <button class="collect" onclick={on_collect}>{ "Collect Coins" }</button>
                <button class={classes!("deposit", (!affordable).then_some("unaffordable"))} onclick={on_deposit}>
                    { format!("Deposit Coins ({})", entry.deposit_cost) }
                </button>
            </div>
        </li>
    }
}

#[function_component(CacheBoard)]
pub fn cache_board(p: &Props) -> Html {
    if p.entries.is_empty() {
        return html! {
            <section class="panel cache-board empty">
                <p class="muted">{ "No caches in sight. Keep walking!" }</p>
            </section>
        };
    }
    html! {
        <section class="panel cache-board" aria-label="Nearby caches">
            <ul class="cache-list">
                { for p.entries.iter().map(|entry| cache_card(entry, p.points, &p.on_action)) }
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use geocoin_game::{GeoPoint, GridCell};
    use yew::LocalServerRenderer;

    fn entry(i: i32, j: i32, coins: u32, serial: u32, cost: u32) -> BoardEntry {
        let cell = GridCell::new(i, j);
        BoardEntry {
            view: CacheView {
                cell,
                position: GeoPoint::new(f64::from(i) * 1e-4, f64::from(j) * 1e-4),
                coins_to_collect: coins,
                coin_serial: serial,
                coin_identity: format!("{cell}#{serial}"),
            },
            deposit_cost: cost,
        }
    }

    #[test]
    fn board_lists_each_cache_with_identity() {
        let props = Props {
            entries: vec![entry(3, -2, 5, 1, 4), entry(-1, 0, 0, 0, 7)],
            points: 5,
            on_action: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<CacheBoard>::with_props(props).render());
        assert!(html.contains("It has 5 coins available."), "{html}");
        assert!(html.contains("Coin Identity: 3:-2#1"), "{html}");
        assert!(html.contains("Coin Identity: -1:0#0"), "{html}");
        assert!(html.contains("Deposit Coins (7)"), "{html}");
        assert_eq!(html.matches("unaffordable").count(), 1, "{html}");
    }

    #[test]
    fn empty_board_prompts_to_walk() {
        let props = Props {
            entries: Vec::new(),
            points: 0,
            on_action: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<CacheBoard>::with_props(props).render());
        assert!(html.contains("Keep walking"), "{html}");
    }
}
