pub mod debounce;

pub use debounce::Debouncer;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::engine::{get_counts, get_filtered_data, get_sorted_data};
use crate::fetcher::{FetchError, Fetcher};
use crate::output::{list_items, select_options, View};
use crate::records::{FilterSelection, Record, RecordField, SortField, SortOrder, SortSelection};
use crate::utils::parse_key_value;

/// Current value of every form control on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// Empty means "All".
    pub country: String,
    /// Empty means "All".
    pub industry: String,
    pub sort: SortField,
    pub order: SortOrder,
}

impl ControlState {
    pub fn filter_selection(&self) -> FilterSelection {
        FilterSelection {
            country: Some(self.country.clone()).filter(|v| !v.is_empty()),
            industry: Some(self.industry.clone()).filter(|v| !v.is_empty()),
        }
    }

    pub fn sort_selection(&self) -> SortSelection {
        SortSelection {
            field: self.sort,
            order: self.order,
        }
    }
}

/// A single user edit of one control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlChange {
    Country(String),
    Industry(String),
    Sort(SortField),
    Order(SortOrder),
    Reset,
}

impl ControlChange {
    /// Parses `country=..`, `industry=..`, `sort=name|employees`,
    /// `order=asc|desc` or `reset`.
    pub fn parse(line: &str) -> Result<Self, String> {
        if line.trim().eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }
        let (key, value) = parse_key_value(line)?;
        match key.as_str() {
            "country" => Ok(Self::Country(value)),
            "industry" => Ok(Self::Industry(value)),
            "sort" => SortField::parse(&value)
                .map(Self::Sort)
                .ok_or_else(|| format!("invalid sort '{value}', expected name or employees")),
            "order" => SortOrder::parse(&value)
                .map(Self::Order)
                .ok_or_else(|| format!("invalid order '{value}', expected asc or desc")),
            other => Err(format!("unknown control '{other}'")),
        }
    }

    pub fn apply_to(self, controls: &mut ControlState) {
        match self {
            Self::Country(v) => controls.country = v,
            Self::Industry(v) => controls.industry = v,
            Self::Sort(v) => controls.sort = v,
            Self::Order(v) => controls.order = v,
            Self::Reset => *controls = ControlState::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Owns the fetched records and the page state.
///
/// Starts in [`Phase::Loading`]; a successful load moves it to
/// [`Phase::Ready`], after which every refresh re-runs filter, sort and
/// render against the current controls. A failed load leaves it loading.
#[derive(Clone, Debug)]
pub struct Controller {
    phase: Phase,
    records: Vec<Record>,
    controls: ControlState,
    view: View,
}

impl Controller {
    pub fn new(controls: ControlState) -> Self {
        let view = View {
            loading: true,
            controls: controls.clone(),
            ..View::default()
        };
        Self {
            phase: Phase::Loading,
            records: Vec::new(),
            controls,
            view,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub async fn initialize(&mut self, fetcher: &Fetcher, url: &str) -> Result<&View, FetchError> {
        match fetcher.fetch_records(url).await {
            Ok(records) => Ok(self.load(records)),
            Err(e) => {
                error!(url, error = %e, "failed to load records");
                Err(e)
            }
        }
    }

    /// Stores the record set, populates the filter options and renders.
    /// The record set is written once; later calls are ignored.
    pub fn load(&mut self, records: Vec<Record>) -> &View {
        if self.phase == Phase::Ready {
            warn!("records already loaded, ignoring reload");
            return &self.view;
        }
        self.records = records;
        self.view.country_options = select_options(&get_counts(&self.records, RecordField::Country));
        self.view.industry_options =
            select_options(&get_counts(&self.records, RecordField::Industry));
        self.view.loading = false;
        self.phase = Phase::Ready;
        self.render();
        &self.view
    }

    pub fn apply_change(&mut self, change: ControlChange) {
        debug!(?change, "control changed");
        change.apply_to(&mut self.controls);
    }

    /// Re-runs the pipeline with the controls as they are now.
    pub fn refresh(&mut self) -> Option<&View> {
        match self.phase {
            Phase::Loading => None,
            Phase::Ready => {
                self.render();
                Some(&self.view)
            }
        }
    }

    fn render(&mut self) {
        let filtered = get_filtered_data(&self.records, &self.controls.filter_selection());
        let sorted = get_sorted_data(&filtered, self.controls.sort_selection());
        self.view.controls = self.controls.clone();
        self.view.results = list_items(&sorted);
        debug!(
            total = self.records.len(),
            shown = self.view.results.len(),
            "rendered results"
        );
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControlState::default())
    }
}
