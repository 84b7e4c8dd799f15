//! Message processing for the lazyvote application.
//!
//! Bootstrap tasks report over the app channel; the main loop drains it
//! before every frame and feeds each event through the readiness gate.

use super::{App, AppMessage, BootstrapEvent, Readiness, UiSelectionState};

impl App {
    /// Drains pending messages without blocking.
    pub fn process_messages(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            self.handle_message(message);
        }
    }

    pub(crate) fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Bootstrap { generation, event } => {
                self.on_bootstrap_event(generation, event);
            }
        }
    }

    fn on_bootstrap_event(&mut self, generation: u64, event: BootstrapEvent) {
        if !self.gate.apply(generation, event) {
            return;
        }

        match self.gate.phase() {
            Readiness::Ready { contract, .. } => {
                let mut selection = UiSelectionState::new();
                if let Err(err) = selection.account_change(i64::from(self.initial_account.get()))
                {
                    tracing::warn!(error = %err, "initial account rejected");
                }
                self.selection = Some(selection);
                self.ui
                    .show_toast(format!("[+] {} ready at {}", contract.name, contract.address), 30);
            }
            Readiness::Failed(failure) => {
                tracing::error!(stage = %failure.stage, message = %failure.message, "bootstrap failed");
                self.selection = None;
                self.ui.dismiss_popup();
            }
            Readiness::Uninitialized | Readiness::Initializing(_) => {}
        }
    }
}
