//! Scripted play: drive a session from a list of commands and narrate what a
//! player would see.

use anyhow::{Context, Result, bail};
use colored::Colorize;

use geocoin_game::{
    Action, ActionQueue, CacheRenderer, CacheView, Direction, GeoPoint, GeocacheSession, GridCell,
    Presenter, SnapshotSlot,
};

/// One scripted player input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Step(Direction),
    Goto(GeoPoint),
    /// Collect at a cell, or at the nearest non-empty cache when `None`.
    Collect(Option<GridCell>),
    /// Deposit at a cell, or at the nearest affordable cache when `None`.
    Deposit(Option<GridCell>),
    Save,
    Restore,
    Reset,
}

impl Command {
    /// Parse `n|s|e|w`, `collect[:i:j]`, `deposit[:i:j]`, `save`, `restore`,
    /// `reset` or `goto:lat:lng`.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if let Some(direction) = Direction::parse(token) {
            return Ok(Self::Step(direction));
        }
        let mut parts = token.split(':');
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();
        let command = match (verb.as_str(), args.as_slice()) {
            ("collect", []) => Self::Collect(None),
            ("collect", [i, j]) => Self::Collect(Some(parse_cell(i, j)?)),
            ("deposit", []) => Self::Deposit(None),
            ("deposit", [i, j]) => Self::Deposit(Some(parse_cell(i, j)?)),
            ("goto", [lat, lng]) => Self::Goto(GeoPoint::new(
                lat.parse().with_context(|| format!("invalid latitude {lat:?}"))?,
                lng.parse().with_context(|| format!("invalid longitude {lng:?}"))?,
            )),
            ("save", []) => Self::Save,
            ("restore", []) => Self::Restore,
            ("reset", []) => Self::Reset,
            _ => bail!("unknown command {token:?}"),
        };
        Ok(command)
    }

    /// Turn the command into a concrete action for the session's current
    /// position. `None` means there is nothing in sight to act on.
    pub fn resolve<S: SnapshotSlot>(self, session: &GeocacheSession<S>) -> Option<Action> {
        let action = match self {
            Self::Step(direction) => Action::Move(direction),
            Self::Goto(point) => Action::MoveTo(point),
            Self::Collect(Some(cell)) => Action::Collect(cell),
            Self::Collect(None) => Action::Collect(nearest(session, |view| {
                view.coins_to_collect > 0
            })?),
            Self::Deposit(Some(cell)) => Action::Deposit(cell),
            Self::Deposit(None) => {
                let affordable = nearest(session, |view| {
                    session
                        .deposit_quote(view.cell)
                        .is_some_and(|cost| u64::from(cost) <= session.points())
                });
                Action::Deposit(affordable.or_else(|| nearest(session, |_| true))?)
            }
            Self::Save => Action::Save,
            Self::Restore => Action::Restore,
            Self::Reset => Action::Reset,
        };
        Some(action)
    }
}

fn parse_cell(i: &str, j: &str) -> Result<GridCell> {
    Ok(GridCell::new(
        i.parse().with_context(|| format!("invalid cell row {i:?}"))?,
        j.parse().with_context(|| format!("invalid cell column {j:?}"))?,
    ))
}

fn nearest<S: SnapshotSlot>(
    session: &GeocacheSession<S>,
    accept: impl Fn(&CacheView) -> bool,
) -> Option<GridCell> {
    let player = session.player();
    session
        .visible_caches()
        .into_iter()
        .filter(|view| accept(view))
        .min_by(|a, b| {
            player
                .distance_meters(a.position)
                .total_cmp(&player.distance_meters(b.position))
        })
        .map(|view| view.cell)
}

/// Parse a comma-separated script.
pub fn parse_script(script: &str) -> Result<Vec<Command>> {
    crate::util::split_csv(script)
        .iter()
        .map(|token| Command::parse(token))
        .collect()
}

/// Presenter that narrates into a line transcript.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    lines: Vec<String>,
    points: Option<u64>,
}

impl ConsolePresenter {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn say(&mut self, line: String) {
        log::debug!("{line}");
        self.lines.push(line);
    }
}

impl Presenter for ConsolePresenter {
    type Handle = GridCell;

    fn render_cache(&mut self, view: &CacheView) -> GridCell {
        self.say(format!(
            "{} cache {} with {} coins ({})",
            "+".green(),
            view.cell,
            view.coins_to_collect,
            view.coin_identity
        ));
        view.cell
    }

    fn remove_cache(&mut self, handle: GridCell) {
        self.say(format!("{} cache {handle}", "-".red()));
    }

    fn show_points(&mut self, points: u64) {
        if self.points != Some(points) {
            self.points = Some(points);
            self.say(format!("{} {points}", "points:".bright_yellow()));
        }
    }

    fn notify(&mut self, message: &str) {
        self.say(format!("{} {message}", "»".cyan()));
    }
}

/// Run the script against the session, syncing the presenter after every
/// command. Game errors become notices; they do not stop the script.
pub fn run_script<S: SnapshotSlot>(
    session: &mut GeocacheSession<S>,
    commands: &[Command],
    presenter: &mut ConsolePresenter,
) {
    let mut renderer = CacheRenderer::new();
    let mut queue = ActionQueue::new();
    renderer.sync(session, presenter);

    for command in commands {
        let Some(action) = command.resolve(session) else {
            presenter.notify("Nothing in sight to do that with.");
            continue;
        };
        queue.push(action);
        for (_, result) in queue.drain(session) {
            match result {
                Ok(outcome) => presenter.notify(&outcome.summary()),
                Err(err) => presenter.notify(&err.notice()),
            }
        }
        renderer.sync(session, presenter);
    }
}
