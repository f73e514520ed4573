mod update;


use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use smartfill_core::{Bounds, CommitReport, InputHost, LoadTicket, PopupController};

use crate::model::activity::{ActivityKind, ActivityLog};
use crate::model::form::{Form, FormField};
use crate::model::settings::Settings;
use crate::theme::Theme;
use crate::tui_event::{BackendCommand, BackendEvent};
use crate::view;

/// Main application state.
pub struct App {
    pub form: Form,
    pub popup: PopupController,
    pub theme: Theme,
    pub activity: ActivityLog,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    /// Cancel token of the load currently in flight.
    inflight: Option<CancellationToken>,
    settings: Settings,

    /// Input boxes from the last render, parallel to `form.fields`
    /// (for mouse hit-testing and popup anchoring).
    pub input_areas: Vec<Rect>,
    /// Visible popup rows from the last render: (area, record index).
    pub popup_rows: Vec<(Rect, usize)>,
}

impl App {
    pub fn new(settings: Settings, theme: Theme) -> Self {
        let fields = settings
            .effective_inputs()
            .into_iter()
            .map(|i| FormField::new(i.id, i.label, i.value))
            .collect();
        let popup = PopupController::new(settings.bindings.clone(), settings.display_fields.clone());
        Self {
            form: Form::new(fields),
            popup,
            theme,
            activity: ActivityLog::default(),
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            backend_cmd_tx: None,
            inflight: None,
            settings,
            input_areas: Vec::new(),
            popup_rows: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Attach the popup to the form and request the first load.
    pub fn mount(&mut self) {
        // Configured while unmounted, the pair is loaded by `mount` itself.
        let configured = self
            .settings
            .source_spec()
            .and_then(|spec| self.popup.configure_source(spec));
        let pending = self.popup.mount(&self.form);
        tracing::info!(observed = self.popup.observed_count(), "popup mounted");
        for ticket in configured.into_iter().chain(pending) {
            self.dispatch_load(ticket);
        }
    }

    /// Detach the popup; in-flight loads are cancelled and late results dropped.
    pub fn unmount(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
        let detached = self.popup.unmount();
        tracing::info!(detached = detached.len(), "popup unmounted");
    }

    pub(crate) fn dispatch_load(&mut self, ticket: LoadTicket) {
        if let Some(previous) = self.inflight.replace(ticket.cancel.clone()) {
            previous.cancel();
        }
        if let Some(ref tx) = self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Load(ticket));
        }
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Loaded { generation, result } => {
                let message = match &result {
                    Ok(records) => Ok(format!("loaded {} records", records.len())),
                    Err(e) => Err(format!("load failed: {e}")),
                };
                if !self.popup.apply_load(generation, result) {
                    return;
                }
                self.inflight = None;
                match message {
                    Ok(m) => self.activity.push(ActivityKind::Load, m),
                    Err(m) => self.activity.push(ActivityKind::Error, m),
                }
            }
        }
    }

    /// Focus the input at `index` and announce it to the popup.
    pub(crate) fn focus_field(&mut self, index: usize) {
        let Some(field) = self.form.fields.get(index) else {
            return;
        };
        self.form.focused = index;
        let bounds = self
            .input_areas
            .get(index)
            .map(|r| rect_to_bounds(*r))
            .unwrap_or_default();
        self.popup.focus(&field.id, bounds, &field.value);
    }

    /// Forward the focused input's live value to the popup.
    pub(crate) fn emit_input(&mut self) {
        if let Some(field) = self.form.fields.get(self.form.focused) {
            self.popup.input(&field.id, &field.value);
        }
    }

    /// Log a commit and deliver the changed notifications it dispatched.
    pub(crate) fn record_commit(&mut self, report: &CommitReport) {
        self.activity.push(
            ActivityKind::Fill,
            format!(
                "filled {} field(s) from record #{}",
                report.writes.len(),
                report.record_index + 1
            ),
        );
        self.drain_changes();
    }

    fn drain_changes(&mut self) {
        while let Some(id) = self.form.take_change() {
            let Some(value) = self.form.value(&id) else {
                continue;
            };
            self.activity
                .push(ActivityKind::Changed, format!("{id} \u{2190} {value:?}"));
            self.popup.input(&id, &value);
        }
    }

    pub fn view(&mut self, f: &mut Frame) {
        view::form::render(f, self);
        view::popup::render(f, self);

        if self.show_help {
            view::help::render(f, &self.theme);
        }
        if self.confirm_quit {
            view::quit_confirm::render(f, &self.theme);
        }
    }
}

pub(crate) fn rect_to_bounds(r: Rect) -> Bounds {
    Bounds::new(r.x, r.y, r.width, r.height)
}
