//! Presentation contract: presenters draw what the session already holds.

use std::collections::BTreeMap;

use crate::cache::CacheView;
use crate::geo::GridCell;
use crate::persistence::SnapshotSlot;
use crate::session::GeocacheSession;

/// Something that can show caches and the points total to the player.
pub trait Presenter {
    /// Opaque token for a rendered cache, handed back on removal.
    type Handle;

    fn render_cache(&mut self, view: &CacheView) -> Self::Handle;

    fn remove_cache(&mut self, handle: Self::Handle);

    fn show_points(&mut self, points: u64);

    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub rendered: usize,
    pub refreshed: usize,
    pub removed: usize,
}

/// Keeps a presenter's markers in step with the visible cache set.
pub struct CacheRenderer<P: Presenter> {
    shown: BTreeMap<GridCell, (P::Handle, CacheView)>,
}

impl<P: Presenter> Clone for CacheRenderer<P>
where
    P::Handle: Clone,
{
    fn clone(&self) -> Self {
        Self {
            shown: self.shown.clone(),
        }
    }
}

impl<P: Presenter> Default for CacheRenderer<P> {
    fn default() -> Self {
        Self {
            shown: BTreeMap::new(),
        }
    }
}

impl<P: Presenter> CacheRenderer<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells currently drawn by the presenter.
    pub fn shown_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.shown.keys().copied()
    }

    /// Render newly visible caches, redraw changed ones, drop the rest, and
    /// push the points total.
    pub fn sync<S: SnapshotSlot>(
        &mut self,
        session: &GeocacheSession<S>,
        presenter: &mut P,
    ) -> SyncReport {
        let mut report = SyncReport::default();
        let mut visible: BTreeMap<GridCell, CacheView> = session
            .visible_caches()
            .into_iter()
            .map(|view| (view.cell, view))
            .collect();

        let stale: Vec<GridCell> = self
            .shown
            .iter()
            .filter(|(cell, (_, shown))| visible.get(*cell) != Some(shown))
            .map(|(cell, _)| *cell)
            .collect();
        for cell in stale {
            if let Some((handle, _)) = self.shown.remove(&cell) {
                presenter.remove_cache(handle);
                if visible.contains_key(&cell) {
                    report.refreshed += 1;
                } else {
                    report.removed += 1;
                }
            }
        }

        let fresh: Vec<GridCell> = visible
            .keys()
            .filter(|cell| !self.shown.contains_key(*cell))
            .copied()
            .collect();
        for cell in fresh {
            if let Some(view) = visible.remove(&cell) {
                let handle = presenter.render_cache(&view);
                self.shown.insert(cell, (handle, view));
                report.rendered += 1;
            }
        }
        report.rendered -= report.refreshed;

        presenter.show_points(session.points());
        report
    }

    /// Remove every marker, e.g. before tearing the presenter down.
    pub fn clear(&mut self, presenter: &mut P) {
        for (_, (handle, _)) in std::mem::take(&mut self.shown) {
            presenter.remove_cache(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::geo::Direction;
    use crate::persistence::MemorySlot;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct RecordingPresenter {
        next: u32,
        live: BTreeMap<u32, GridCell>,
        points: Vec<u64>,
        notices: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        type Handle = u32;

        fn render_cache(&mut self, view: &CacheView) -> u32 {
            self.next += 1;
            self.live.insert(self.next, view.cell);
            self.next
        }

        fn remove_cache(&mut self, handle: u32) {
            assert!(self.live.remove(&handle).is_some(), "double remove");
        }

        fn show_points(&mut self, points: u64) {
            self.points.push(points);
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn live_cells(p: &RecordingPresenter) -> BTreeSet<GridCell> {
        p.live.values().copied().collect()
    }

    fn visible_cells(s: &GeocacheSession<MemorySlot>) -> BTreeSet<GridCell> {
        s.visible_caches().iter().map(|v| v.cell).collect()
    }

    #[test]
    fn sync_mirrors_visible_set_through_moves() {
        let mut s = GeocacheSession::start(WorldConfig::default(), MemorySlot::default()).unwrap();
        let mut presenter = RecordingPresenter::default();
        let mut renderer = CacheRenderer::new();

        let first = renderer.sync(&s, &mut presenter);
        assert_eq!(first.rendered, visible_cells(&s).len());
        assert_eq!(live_cells(&presenter), visible_cells(&s));

        for _ in 0..12 {
            s.move_player(Direction::East);
            renderer.sync(&s, &mut presenter);
            assert_eq!(live_cells(&presenter), visible_cells(&s));
        }
        assert_eq!(renderer.shown_cells().collect::<BTreeSet<_>>(), visible_cells(&s));
    }

    #[test]
    fn collected_cache_is_removed_and_points_pushed() {
        let mut s = GeocacheSession::start(WorldConfig::default(), MemorySlot::default()).unwrap();
        let mut presenter = RecordingPresenter::default();
        let mut renderer = CacheRenderer::new();
        renderer.sync(&s, &mut presenter);

        let cell = s.visible_caches()[0].cell;
        s.collect(cell).unwrap();
        let report = renderer.sync(&s, &mut presenter);
        assert_eq!(report.removed, 1);
        assert_eq!(report.rendered, 0);
        assert!(!live_cells(&presenter).contains(&cell));
        assert_eq!(presenter.points.last().copied(), Some(s.points()));
    }

    #[test]
    fn changed_cache_is_refreshed() {
        let mut s = GeocacheSession::start(WorldConfig::default(), MemorySlot::default()).unwrap();
        let mut presenter = RecordingPresenter::default();
        let mut renderer = CacheRenderer::new();

        let cells: Vec<GridCell> = s.visible_caches().iter().map(|v| v.cell).collect();
        let (spent, rest) = cells.split_at(cells.len() / 2);
        for cell in spent {
            s.collect(*cell).unwrap();
        }
        renderer.sync(&s, &mut presenter);

        let Some(target) = rest
            .iter()
            .copied()
            .find(|cell| s.deposit_quote(*cell).is_some_and(|q| u64::from(q) <= s.points()))
        else {
            return;
        };
        s.deposit(target).unwrap();
        let report = renderer.sync(&s, &mut presenter);
        assert_eq!(report.refreshed, 1);
        assert_eq!(report.rendered, 0);
        assert_eq!(report.removed, 0);

        renderer.clear(&mut presenter);
        assert!(presenter.live.is_empty());
        presenter.notify("bye");
        assert_eq!(presenter.notices, vec!["bye".to_string()]);
    }
}
