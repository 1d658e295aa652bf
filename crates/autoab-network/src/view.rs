//! Overview / Focused view state for one subject's network.

use autoab_common::BiomarkerAssociation;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{compute_layout, NetworkLayout};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "disease", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Overview,
    Focused(String),
}

/// What a back action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Focused → Overview.
    ReturnedToOverview,
    /// Already in Overview; the caller should leave the graph.
    LeaveGraph,
}

/// The caller-owned view over one subject. Layouts are recomputed from the
/// association rows on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkView {
    subject: String,
    state: ViewState,
}

impl NetworkView {
    pub fn new(subject: impl Into<String>) -> Self {
        Self { subject: subject.into(), state: ViewState::Overview }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selected_disease(&self) -> Option<&str> {
        match &self.state {
            ViewState::Focused(disease) => Some(disease),
            ViewState::Overview => None,
        }
    }

    /// Focus a disease, from Overview or directly from another focus.
    pub fn select(&mut self, disease: impl Into<String>) {
        let disease = disease.into();
        debug!(subject = %self.subject, disease = %disease, "Focusing disease");
        self.state = ViewState::Focused(disease);
    }

    /// Return to Overview.
    pub fn clear(&mut self) {
        self.state = ViewState::Overview;
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.state {
            ViewState::Focused(_) => {
                self.clear();
                BackOutcome::ReturnedToOverview
            }
            ViewState::Overview => BackOutcome::LeaveGraph,
        }
    }

    /// Switch subject. Always resets to Overview, even for the same name.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
        self.state = ViewState::Overview;
    }

    pub fn layout(&self, rows: &[BiomarkerAssociation]) -> NetworkLayout {
        compute_layout(&self.subject, rows, self.selected_disease())
    }
}
