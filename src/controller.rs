//! Selection state machine.
//!
//! One controller lives per session. It owns the session context — the
//! read-only aggregate and geometry tables plus the single mutable
//! `FilterState` — and funnels all three widget change events through one
//! transition function. Every accepted event replaces exactly one filter
//! field and then runs the full recompute-and-publish cycle; there is no
//! partial update path.
//!
//! Transitions run synchronously to completion (single-threaded,
//! run-to-completion), so no event ever observes a half-applied selection.

use log::{debug, warn};

use crate::assemble::assemble;
use crate::ingest::geometry::CountyGeometryStore;
use crate::model::{month_number, CountyAggregate, FilterState, StatKind, YEAR_MAX, YEAR_MIN};
use crate::plot::{style_for, RenderSurface};

/// A change notification from the widget surface, exactly as emitted:
/// months by three-letter abbreviation, statistics by display label.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    YearChanged(i32),
    MonthChanged(String),
    StatisticChanged(String),
}

/// Owns the live `FilterState` and drives the rendering surface.
pub struct SelectionController<S: RenderSurface> {
    aggregates: Vec<CountyAggregate>,
    geometry: CountyGeometryStore,
    filter: FilterState,
    surface: S,
}

impl<S: RenderSurface> SelectionController<S> {
    /// Creates the session controller at the initial selection
    /// (2020, January, maximum temperature). Call `publish_current` once
    /// to push the first dataset to the surface.
    pub fn new(
        aggregates: Vec<CountyAggregate>,
        geometry: CountyGeometryStore,
        surface: S,
    ) -> SelectionController<S> {
        SelectionController {
            aggregates,
            geometry,
            filter: FilterState::initial(),
            surface,
        }
    }

    /// Current selection.
    pub fn filter(&self) -> FilterState {
        self.filter
    }

    /// The rendering surface (for inspection by the session loop/tests).
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Applies one widget event.
    ///
    /// An accepted event replaces exactly one field of the filter and
    /// republishes. An event carrying a value the widget surface should
    /// never produce — unknown month abbreviation, unknown statistic
    /// label, out-of-window year — is rejected with a warning: no state
    /// change, no republish.
    pub fn handle_event(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::YearChanged(year) => {
                if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
                    warn!("ignoring year outside {YEAR_MIN}-{YEAR_MAX}: {year}");
                    return;
                }
                self.filter.year = year;
            }
            SelectionEvent::MonthChanged(abbr) => {
                let Some(month) = month_number(&abbr) else {
                    warn!("ignoring unknown month abbreviation '{abbr}'");
                    return;
                };
                self.filter.month = month;
            }
            SelectionEvent::StatisticChanged(label) => {
                let Some(stat) = StatKind::from_display_label(&label) else {
                    warn!("ignoring unknown statistic label '{label}'");
                    return;
                };
                self.filter.stat = stat;
            }
        }
        self.publish_current();
    }

    /// Recomputes the assembled dataset for the current filter and pushes
    /// it, together with the matching style, to the surface as one atomic
    /// update. The dataset is always a full rebuild from the geometry and
    /// aggregate tables, never an incremental patch.
    pub fn publish_current(&mut self) {
        debug!(
            "publishing selection year={} month={} stat={}",
            self.filter.year,
            self.filter.month,
            self.filter.stat.field_name()
        );
        let dataset = assemble(&self.filter, &self.aggregates, &self.geometry);
        let style = style_for(self.filter.stat);
        self.surface.publish(dataset, style);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
