use smartfill_core::{LoadError, LoadTicket, RecordSet};

/// Commands sent from the TUI to the backend.
pub enum BackendCommand {
    /// Fetch the record set described by the ticket.
    Load(LoadTicket),
}

/// Events flowing from the backend to the TUI.
#[derive(Debug)]
pub enum BackendEvent {
    /// A load finished, successfully or not. `generation` identifies which
    /// request it answers.
    Loaded {
        generation: u64,
        result: Result<RecordSet, LoadError>,
    },
}
