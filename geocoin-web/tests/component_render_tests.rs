use futures::executor::block_on;
use geocoin_game::{Action, Direction, MemorySlot, WorldConfig};
use geocoin_web::app::{GameModel, GameScreen, Msg, ScreenProps};
use geocoin_web::components::status_panel::{points_text, steps_text};
use yew::{Callback, LocalServerRenderer};

fn render(model: &GameModel<MemorySlot>) -> String {
    let props = ScreenProps::from_model(model, Callback::noop(), Callback::noop(), Callback::noop());
    block_on(LocalServerRenderer::<GameScreen>::with_props(props).render())
}

#[test]
fn points_text_matches_status_copy() {
    assert_eq!(points_text(0), "No points yet...");
    assert_eq!(points_text(1), "1 points accumulated");
    assert_eq!(points_text(42), "42 points accumulated");
}

#[test]
fn screen_tracks_a_short_walk() {
    let mut model = GameModel::boot(WorldConfig::default(), MemorySlot::default());
    let opening = render(&model);
    assert!(opening.contains("No points yet..."), "{opening}");

    for direction in [Direction::North, Direction::North, Direction::East] {
        model.apply(Msg::Play(Action::Move(direction)));
    }
    let cell = model.layer().markers()[0].cell;
    model.apply(Msg::Play(Action::Collect(cell)));
    let points = model.session().unwrap().points();

    let html = render(&model);
    assert!(html.contains(&points_text(points)), "{html}");
    assert!(html.contains("cell 2:1"), "{html}");
    assert!(html.contains("Collected"), "{html}");
}

#[test]
fn reset_restarts_from_an_empty_slot() {
    let slot = MemorySlot::default();
    let mut model = GameModel::boot(WorldConfig::default(), slot.clone());
    let cell = model.layer().markers()[0].cell;
    model.apply(Msg::Play(Action::Collect(cell)));
    assert!(slot.contents().is_some());

    model.apply(Msg::Play(Action::Reset));
    assert!(slot.contents().is_none());
    let html = render(&model);
    assert!(html.contains("No points yet..."), "{html}");
    assert!(html.contains("Game reset"), "{html}");
}

#[test]
fn trail_shows_recent_steps_until_reset() {
    let mut model = GameModel::boot(WorldConfig::default(), MemorySlot::default());
    for _ in 0..7 {
        model.apply(Msg::Play(Action::Move(Direction::South)));
    }
    let props = ScreenProps::from_model(&model, Callback::noop(), Callback::noop(), Callback::noop());
    assert_eq!(props.steps, 7);
    assert_eq!(props.trail.len(), geocoin_web::app::TRAIL_LIMIT);
    assert_eq!(props.trail.last().copied(), Some(model.player()));

    let html = render(&model);
    assert!(html.contains(&steps_text(7)), "{html}");
    assert!(html.contains("trail-points"), "{html}");

    model.apply(Msg::Play(Action::Reset));
    let html = render(&model);
    assert!(html.contains("No steps taken yet"), "{html}");
    assert!(!html.contains("trail-points"), "{html}");
}
