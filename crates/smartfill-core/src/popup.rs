//! The popup controller: record set, bindings and transient UI state.
//!
//! Two visible states. `Hidden` becomes `Shown` when an observed input gains
//! focus; `Shown` returns to `Hidden` on Escape, on a pointer press outside
//! the rendered popup, or after a commit. Arrow keys and typing keep the
//! popup shown while moving the highlight or changing the filter.

use tokio_util::sync::CancellationToken;

use crate::binding::{BindingDiff, FieldBindings, InputId, ObserverSet};
use crate::filter::filter_indices;
use crate::host::InputHost;
use crate::path::FieldPath;
use crate::record::{RecordSet, display_text, fill_text};
use crate::source::SourceSpec;
use crate::LoadError;

/// Placeholder shown when no record matches.
pub const NO_MATCHES: &str = "No matches found.";

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// An axis-aligned rectangle in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x.saturating_add(self.width)
            && point.y >= self.y
            && point.y < self.bottom()
    }
}

/// Where the popup is anchored: directly below the focused input, same width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl Anchor {
    pub fn below(input: Bounds) -> Self {
        Self {
            x: input.x,
            y: input.bottom(),
            width: input.width,
        }
    }
}

/// Navigation keys the popup reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

/// One value written into a host input by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub input: InputId,
    pub path: FieldPath,
    pub value: String,
}

/// Writes performed by a commit, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub record_index: usize,
    pub writes: Vec<FieldWrite>,
}

/// Result of routing a key to the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Popup hidden or key not handled; the host keeps its default behavior.
    Ignored,
    Moved { highlighted: usize },
    Committed(CommitReport),
    /// Enter with nothing to select.
    NoSelection,
    Dismissed,
}

impl KeyOutcome {
    /// Whether the host must suppress its own handling of the key.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Progress of the current record-set load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(usize),
    Failed(String),
}

/// A load the host must run, tagged with the generation it belongs to.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub generation: u64,
    pub spec: SourceSpec,
    pub cancel: CancellationToken,
}

/// Global pointer-down observer, alive from mount to unmount. Holds the
/// area the host last drew the popup in, so presses can be classified.
#[derive(Debug)]
struct PointerSubscription {
    popup_area: Option<Bounds>,
}

impl PointerSubscription {
    fn subscribe() -> Self {
        tracing::debug!("pointer observer attached");
        Self { popup_area: None }
    }

    /// Whether a press at `point` landed outside the drawn popup.
    fn is_outside(&self, point: Point) -> bool {
        !self.popup_area.is_some_and(|b| b.contains(point))
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        tracing::debug!("pointer observer released");
    }
}

/// Resources owned while the popup is mounted.
#[derive(Debug)]
struct MountScope {
    cancel: CancellationToken,
    pointer: PointerSubscription,
}

impl Drop for MountScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Field label and text shown in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub record_index: usize,
    pub highlighted: bool,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupRows {
    /// Nothing matches; render the [`NO_MATCHES`] placeholder.
    Empty,
    Rows(Vec<RowView>),
}

/// Everything needed to draw the shown popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub anchor: Anchor,
    pub rows: PopupRows,
}

/// The lookup popup attached to a set of host inputs.
#[derive(Debug, Default)]
pub struct PopupController {
    source: Option<SourceSpec>,
    generation: u64,
    records: RecordSet,
    load_state: LoadState,

    bindings: FieldBindings,
    display_fields: Vec<FieldPath>,
    observers: ObserverSet,
    mount: Option<MountScope>,

    visible: bool,
    highlight: usize,
    anchor: Anchor,
    active_field: FieldPath,
    filter_text: String,
}

impl PopupController {
    pub fn new(bindings: FieldBindings, display_fields: Vec<FieldPath>) -> Self {
        Self {
            bindings,
            display_fields,
            ..Self::default()
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Mount the popup: subscribe to pointer presses and observe bound
    /// inputs present in `host`.
    ///
    /// Returns a ticket when a source is configured but no load has been
    /// issued for it yet (configured before mounting, or interrupted by an
    /// earlier unmount).
    pub fn mount(&mut self, host: &impl InputHost) -> Option<LoadTicket> {
        if self.mount.is_none() {
            self.mount = Some(MountScope {
                cancel: CancellationToken::new(),
                pointer: PointerSubscription::subscribe(),
            });
        }
        let diff = self.observers.sync(&self.bindings, host);
        tracing::debug!(attached = ?diff.attached, "popup mounted");
        if self.load_state == LoadState::Idle {
            self.reload()
        } else {
            None
        }
    }

    /// Tear down: cancel in-flight loads, release the pointer subscription,
    /// stop observing inputs and hide.
    pub fn unmount(&mut self) -> Vec<InputId> {
        self.mount = None;
        self.visible = false;
        if self.load_state == LoadState::Loading {
            self.load_state = LoadState::Idle;
        }
        self.observers.clear()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    // ── Loading ────────────────────────────────────────────────────

    /// Point the popup at a `(source, key)` pair.
    ///
    /// The record set is cleared until the new load lands. Returns a ticket
    /// when the pair changed and the popup is mounted; an unmounted popup
    /// issues the load from [`mount`](Self::mount) instead.
    pub fn configure_source(&mut self, spec: SourceSpec) -> Option<LoadTicket> {
        if self.source.as_ref() == Some(&spec) {
            return None;
        }
        self.source = Some(spec);
        self.records = RecordSet::default();
        self.load_state = LoadState::Idle;
        self.reload()
    }

    /// Issue a fresh load for the current pair. Earlier loads become stale.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        let spec = self.source.clone()?;
        let cancel = self.mount.as_ref()?.cancel.child_token();
        self.generation += 1;
        self.load_state = LoadState::Loading;
        tracing::debug!(generation = self.generation, source = %spec.source, key = %spec.key, "load requested");
        Some(LoadTicket {
            generation: self.generation,
            spec,
            cancel,
        })
    }

    /// Apply a finished load. Stale generations and loads landing after
    /// unmount are dropped; returns whether the result was applied.
    pub fn apply_load(&mut self, generation: u64, result: Result<RecordSet, LoadError>) -> bool {
        if !self.is_mounted() || generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale load");
            return false;
        }
        match result {
            Ok(records) => {
                tracing::info!(generation, count = records.len(), "records loaded");
                self.load_state = LoadState::Loaded(records.len());
                self.records = records;
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "record load failed");
                self.load_state = LoadState::Failed(e.to_string());
                self.records = RecordSet::default();
            }
        }
        true
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn source(&self) -> Option<&SourceSpec> {
        self.source.as_ref()
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    // ── Bindings ───────────────────────────────────────────────────

    /// Replace the binding map and re-sync observers against `host`.
    pub fn set_bindings(&mut self, bindings: FieldBindings, host: &impl InputHost) -> BindingDiff {
        self.bindings = bindings;
        if !self.is_mounted() {
            return BindingDiff::default();
        }
        let diff = self.observers.sync(&self.bindings, host);
        if !diff.is_empty() {
            tracing::debug!(attached = ?diff.attached, detached = ?diff.detached, "observers re-synced");
        }
        diff
    }

    pub fn bindings(&self) -> &FieldBindings {
        &self.bindings
    }

    pub fn set_display_fields(&mut self, fields: Vec<FieldPath>) {
        self.display_fields = fields;
    }

    pub fn is_observed(&self, id: &InputId) -> bool {
        self.observers.contains(id)
    }

    pub fn observed_count(&self) -> usize {
        self.observers.len()
    }

    // ── Host events ────────────────────────────────────────────────

    /// An input gained focus. Ignored unless the input is observed.
    pub fn focus(&mut self, id: &InputId, input_bounds: Bounds, value: &str) -> bool {
        if !self.observers.contains(id) {
            return false;
        }
        let Some(path) = self.bindings.path_for(id) else {
            return false;
        };
        self.anchor = Anchor::below(input_bounds);
        self.active_field = path.clone();
        self.filter_text = value.to_string();
        self.highlight = 0;
        self.visible = true;
        tracing::debug!(input = %id, field = %self.active_field, "popup shown");
        true
    }

    /// An observed input's text changed; its live value becomes the filter.
    pub fn input(&mut self, id: &InputId, value: &str) {
        if self.observers.contains(id) {
            self.filter_text = value.to_string();
        }
    }

    /// A key pressed in an observed input.
    pub fn key(&mut self, key: Key, host: &mut impl InputHost) -> KeyOutcome {
        if !self.visible {
            return KeyOutcome::Ignored;
        }
        let count = self.filtered().len();
        match key {
            Key::Down | Key::Up if count == 0 => KeyOutcome::Moved { highlighted: 0 },
            Key::Down => {
                self.highlight = (self.highlight % count + 1) % count;
                KeyOutcome::Moved {
                    highlighted: self.highlight,
                }
            }
            Key::Up => {
                self.highlight = (self.highlight % count + count - 1) % count;
                KeyOutcome::Moved {
                    highlighted: self.highlight,
                }
            }
            Key::Enter => match self.highlighted_record() {
                Some(index) => self
                    .commit(index, host)
                    .map_or(KeyOutcome::NoSelection, KeyOutcome::Committed),
                None => KeyOutcome::NoSelection,
            },
            Key::Escape => {
                self.hide();
                KeyOutcome::Dismissed
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    /// A pointer press anywhere. Hides the popup when it lands outside the
    /// rendered popup; returns whether it did.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some(scope) = &self.mount else {
            return false;
        };
        if !self.visible || !scope.pointer.is_outside(point) {
            return false;
        }
        tracing::debug!(x = point.x, y = point.y, "outside press, hiding popup");
        self.hide();
        true
    }

    /// Record where the host drew the popup, for outside-press detection.
    pub fn set_rendered_bounds(&mut self, bounds: Option<Bounds>) {
        if let Some(scope) = &mut self.mount {
            scope.pointer.popup_area = bounds;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.set_rendered_bounds(None);
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Copy every bound field of record `record_index` into the host and hide.
    ///
    /// An input is written only when it exists in the host and the record has
    /// a defined value at the binding's path. Returns `None` for an unknown
    /// record.
    pub fn commit(&mut self, record_index: usize, host: &mut impl InputHost) -> Option<CommitReport> {
        let record = self.records.get(record_index)?;
        let mut writes = Vec::new();
        for binding in &self.bindings {
            if !host.has_input(&binding.input) {
                continue;
            }
            let Some(value) = binding.path.resolve(record) else {
                continue;
            };
            let text = fill_text(value);
            host.set_value(&binding.input, text.clone());
            host.dispatch_changed(&binding.input);
            writes.push(FieldWrite {
                input: binding.input.clone(),
                path: binding.path.clone(),
                value: text,
            });
        }
        tracing::info!(record_index, writes = writes.len(), "record committed");
        self.hide();
        Some(CommitReport {
            record_index,
            writes,
        })
    }

    // ── Derived state ──────────────────────────────────────────────

    /// Record indices matching the filter text on the active field.
    pub fn filtered(&self) -> Vec<usize> {
        filter_indices(&self.records, &self.active_field, &self.filter_text)
    }

    /// Highlighted position within the filtered rows, taken modulo their
    /// count. `None` when nothing matches.
    pub fn highlighted(&self) -> Option<usize> {
        let count = self.filtered().len();
        (count > 0).then(|| self.highlight % count)
    }

    fn highlighted_record(&self) -> Option<usize> {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return None;
        }
        filtered.get(self.highlight % filtered.len()).copied()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn active_field(&self) -> &FieldPath {
        &self.active_field
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Render model; `None` while hidden.
    pub fn view(&self) -> Option<PopupView> {
        if !self.visible {
            return None;
        }
        let filtered = self.filtered();
        if filtered.is_empty() {
            return Some(PopupView {
                anchor: self.anchor,
                rows: PopupRows::Empty,
            });
        }
        let highlighted = self.highlight % filtered.len();
        let rows = filtered
            .iter()
            .enumerate()
            .filter_map(|(pos, &record_index)| {
                let record = self.records.get(record_index)?;
                Some(RowView {
                    record_index,
                    highlighted: pos == highlighted,
                    fields: self
                        .display_fields
                        .iter()
                        .map(|path| FieldView {
                            label: path.leaf().to_string(),
                            value: display_text(path.resolve(record)),
                        })
                        .collect(),
                })
            })
            .collect();
        Some(PopupView {
            anchor: self.anchor,
            rows: PopupRows::Rows(rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use crate::host::MemoryHost;
    use serde_json::json;

    fn users() -> RecordSet {
        RecordSet::new(vec![
            json!({"name": "Ann", "address": {"city": "Rome"}}),
            json!({"name": "Bo", "address": {"city": "Oslo"}}),
            json!({"name": "Cara", "address": {"city": "Paris"}}),
        ])
    }

    fn setup() -> (PopupController, MemoryHost) {
        let host = MemoryHost::with_inputs(["nameInput", "cityInput"]);
        let mut popup = PopupController::new(
            FieldBindings::new(vec![
                Binding::new("name", "nameInput"),
                Binding::new("address.city", "cityInput"),
            ]),
            vec!["name".into(), "address.city".into()],
        );
        popup.mount(&host);
        let ticket = popup
            .configure_source(SourceSpec::new("mem://users", "users"))
            .expect("first configure issues a load");
        assert!(popup.apply_load(ticket.generation, Ok(users())));
        (popup, host)
    }

    fn focus_name(popup: &mut PopupController, value: &str) {
        assert!(popup.focus(&"nameInput".into(), Bounds::new(2, 3, 20, 1), value));
    }

    #[test]
    fn focus_shows_popup_below_input() {
        let (mut popup, _host) = setup();
        focus_name(&mut popup, "");
        assert!(popup.is_visible());
        assert_eq!(popup.anchor(), Anchor { x: 2, y: 4, width: 20 });
        assert_eq!(popup.active_field().as_str(), "name");
    }

    #[test]
    fn focus_on_unobserved_input_is_ignored() {
        let (mut popup, _host) = setup();
        assert!(!popup.focus(&"other".into(), Bounds::default(), ""));
        assert!(!popup.is_visible());
    }

    #[test]
    fn arrow_down_wraps_over_filtered_count() {
        let (mut popup, mut host) = setup();
        focus_name(&mut popup, "");
        for n in 1..=7 {
            popup.key(Key::Down, &mut host);
            assert_eq!(popup.highlighted(), Some(n % 3));
        }
    }

    #[test]
    fn arrow_up_from_first_row_wraps_to_last() {
        let (mut popup, mut host) = setup();
        focus_name(&mut popup, "");
        assert_eq!(popup.key(Key::Up, &mut host), KeyOutcome::Moved { highlighted: 2 });
    }

    #[test]
    fn stale_highlight_is_taken_modulo_new_count() {
        let (mut popup, mut host) = setup();
        focus_name(&mut popup, "");
        popup.key(Key::Down, &mut host);
        popup.key(Key::Down, &mut host);
        popup.input(&"nameInput".into(), "a");
        // Ann and Cara match; stored index 2 maps to row 0.
        assert_eq!(popup.highlighted(), Some(0));
        let outcome = popup.key(Key::Enter, &mut host);
        assert!(matches!(outcome, KeyOutcome::Committed(ref r) if r.record_index == 0));
    }

    #[test]
    fn keys_are_ignored_while_hidden() {
        let (mut popup, mut host) = setup();
        assert_eq!(popup.key(Key::Down, &mut host), KeyOutcome::Ignored);
        assert!(!popup.key(Key::Enter, &mut host).is_consumed());
    }

    #[test]
    fn enter_without_rows_is_consumed_but_writes_nothing() {
        let (mut popup, mut host) = setup();
        focus_name(&mut popup, "zzz");
        assert_eq!(popup.key(Key::Down, &mut host), KeyOutcome::Moved { highlighted: 0 });
        assert_eq!(popup.highlighted(), None);
        assert_eq!(popup.key(Key::Enter, &mut host), KeyOutcome::NoSelection);
        assert!(popup.is_visible());
        assert!(host.changed().is_empty());
    }

    #[test]
    fn escape_hides_without_writing() {
        let (mut popup, mut host) = setup();
        host.type_into("nameInput", "b");
        focus_name(&mut popup, "b");
        assert_eq!(popup.key(Key::Escape, &mut host), KeyOutcome::Dismissed);
        assert!(!popup.is_visible());
        assert_eq!(host.get("nameInput"), Some("b"));
        assert_eq!(host.get("cityInput"), Some(""));
    }

    #[test]
    fn outside_press_hides_inside_press_does_not() {
        let (mut popup, _host) = setup();
        focus_name(&mut popup, "");
        popup.set_rendered_bounds(Some(Bounds::new(2, 4, 20, 6)));
        assert!(!popup.pointer_down(Point { x: 5, y: 6 }));
        assert!(popup.is_visible());
        assert!(popup.pointer_down(Point { x: 40, y: 1 }));
        assert!(!popup.is_visible());
    }

    #[test]
    fn commit_fills_every_bound_field() {
        let (mut popup, mut host) = setup();
        focus_name(&mut popup, "a");
        let outcome = popup.key(Key::Enter, &mut host);
        let KeyOutcome::Committed(report) = outcome else {
            panic!("expected commit, got {outcome:?}");
        };
        assert_eq!(report.writes.len(), 2);
        assert_eq!(host.get("nameInput"), Some("Ann"));
        assert_eq!(host.get("cityInput"), Some("Rome"));
        assert_eq!(
            host.changed(),
            &[InputId::from("nameInput"), InputId::from("cityInput")]
        );
        assert!(!popup.is_visible());
    }

    #[test]
    fn commit_skips_undefined_values() {
        let mut host = MemoryHost::with_inputs(["nameInput", "cityInput"]);
        let mut popup = PopupController::new(
            FieldBindings::new(vec![
                Binding::new("name", "nameInput"),
                Binding::new("address.city", "cityInput"),
            ]),
            vec![],
        );
        popup.mount(&host);
        let ticket = popup.configure_source(SourceSpec::new("mem://x", "rows")).unwrap();
        popup.apply_load(ticket.generation, Ok(RecordSet::new(vec![json!({"name": "Dee"})])));
        host.type_into("cityInput", "keep");

        let report = popup.commit(0, &mut host).unwrap();
        assert_eq!(report.writes.len(), 1);
        assert_eq!(host.get("cityInput"), Some("keep"));
        assert_eq!(host.changed(), &[InputId::from("nameInput")]);
    }

    #[test]
    fn view_lists_display_fields_by_leaf() {
        let (mut popup, _host) = setup();
        focus_name(&mut popup, "bo");
        let view = popup.view().unwrap();
        let PopupRows::Rows(rows) = view.rows else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        assert!(rows[0].highlighted);
        assert_eq!(rows[0].fields[1].label, "city");
        assert_eq!(rows[0].fields[1].value, "Oslo");
    }

    #[test]
    fn hidden_popup_renders_nothing() {
        let (popup, _host) = setup();
        assert!(popup.view().is_none());
    }

    #[test]
    fn stale_generation_is_dropped() {
        let (mut popup, _host) = setup();
        let first = popup.reload().unwrap();
        let second = popup.reload().unwrap();
        assert!(!popup.apply_load(first.generation, Ok(RecordSet::default())));
        assert_eq!(popup.records().len(), 3);
        assert!(popup.apply_load(second.generation, Ok(RecordSet::default())));
        assert!(popup.records().is_empty());
    }

    #[test]
    fn unmount_cancels_loads_and_drops_late_results() {
        let (mut popup, _host) = setup();
        let ticket = popup.reload().unwrap();
        let detached = popup.unmount();
        assert_eq!(detached.len(), 2);
        assert!(ticket.cancel.is_cancelled());
        assert!(!popup.apply_load(ticket.generation, Ok(RecordSet::default())));
        assert_eq!(popup.records().len(), 3);
    }

    #[test]
    fn same_source_pair_does_not_reload() {
        let (mut popup, _host) = setup();
        assert!(popup.configure_source(SourceSpec::new("mem://users", "users")).is_none());
        assert!(popup.configure_source(SourceSpec::new("mem://users", "people")).is_some());
        assert!(popup.records().is_empty());
    }

    #[test]
    fn source_configured_before_mount_loads_on_mount() {
        let host = MemoryHost::with_inputs(["nameInput"]);
        let mut popup =
            PopupController::new(FieldBindings::new(vec![Binding::new("name", "nameInput")]), vec![]);
        let spec = SourceSpec::new("users.json", "users");
        assert!(popup.configure_source(spec.clone()).is_none());
        assert_eq!(popup.load_state(), &LoadState::Idle);

        let ticket = popup.mount(&host).expect("mount issues the pending load");
        assert_eq!(ticket.spec, spec);
        assert_eq!(popup.load_state(), &LoadState::Loading);
        // Same pair again: the load is already in flight.
        assert!(popup.configure_source(spec).is_none());
        assert!(popup.apply_load(ticket.generation, Ok(users())));
        assert_eq!(popup.records().len(), 3);
    }

    #[test]
    fn remount_reloads_only_an_interrupted_load() {
        let (mut popup, host) = setup();
        assert!(popup.mount(&host).is_none());

        popup.reload().unwrap();
        popup.unmount();
        assert_eq!(popup.load_state(), &LoadState::Idle);
        assert!(popup.mount(&host).is_some());
    }

    #[test]
    fn rebinding_moves_observers_and_commit_targets() {
        let mut host = MemoryHost::with_inputs(["nameInput", "cityInput", "townInput"]);
        let mut popup = PopupController::new(
            FieldBindings::new(vec![
                Binding::new("name", "nameInput"),
                Binding::new("address.city", "cityInput"),
            ]),
            vec![],
        );
        popup.mount(&host);
        let ticket = popup.configure_source(SourceSpec::new("mem://users", "users")).unwrap();
        popup.apply_load(ticket.generation, Ok(users()));

        let diff = popup.set_bindings(
            FieldBindings::new(vec![
                Binding::new("name", "nameInput"),
                Binding::new("address.city", "townInput"),
            ]),
            &host,
        );
        assert_eq!(diff.attached, vec![InputId::from("townInput")]);
        assert_eq!(diff.detached, vec![InputId::from("cityInput")]);

        assert!(!popup.focus(&"cityInput".into(), Bounds::default(), ""));
        assert!(!popup.is_visible());
        assert!(popup.focus(&"townInput".into(), Bounds::default(), "os"));
        assert_eq!(popup.active_field().as_str(), "address.city");

        let outcome = popup.key(Key::Enter, &mut host);
        assert!(matches!(outcome, KeyOutcome::Committed(ref r) if r.record_index == 1));
        assert_eq!(host.get("nameInput"), Some("Bo"));
        assert_eq!(host.get("townInput"), Some("Oslo"));
        assert_eq!(host.get("cityInput"), Some(""));
        assert_eq!(
            host.changed(),
            &[InputId::from("nameInput"), InputId::from("townInput")]
        );
    }

    #[test]
    fn pointer_presses_are_ignored_once_unmounted() {
        let (mut popup, _host) = setup();
        focus_name(&mut popup, "");
        popup.unmount();
        popup.set_rendered_bounds(Some(Bounds::new(0, 0, 10, 10)));
        assert!(!popup.pointer_down(Point { x: 50, y: 50 }));
    }
}
