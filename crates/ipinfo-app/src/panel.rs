//! Presentation state machine for the panel
//!
//! A [`Panel`] is built once per render cycle from a [`PipelineResult`].
//! Data rows start in [`RowPhase::Loading`] and are moved to
//! [`RowPhase::Settled`] one by one as reveal timers fire.

use ipinfo_core::prelude::*;
use ipinfo_core::{FetchError, PipelineResult};
use serde::Serialize;

use crate::i18n::Texts;
use crate::projection::{project, ProjectedField};

/// Binary connectivity shown in the status row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    /// Connected only when the feature is on and a payload arrived
    pub fn of(result: &PipelineResult) -> Self {
        if result.is_connected() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    pub fn label(&self, texts: &Texts) -> &'static str {
        match self {
            ConnectionStatus::Connected => texts.panel.connected,
            ConnectionStatus::Disconnected => texts.panel.disconnected,
        }
    }
}

/// Reveal phase of one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPhase {
    Loading,
    Settled(String),
}

/// One field row of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub key: String,
    pub label: String,
    pub phase: RowPhase,
    value: String,
}

impl DataRow {
    fn from_field(field: ProjectedField) -> Self {
        Self {
            key: field.key,
            label: field.label,
            phase: RowPhase::Loading,
            value: field.display,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RowPhase::Loading
    }

    /// Value text once settled
    pub fn settled_text(&self) -> Option<&str> {
        match &self.phase {
            RowPhase::Settled(text) => Some(text),
            RowPhase::Loading => None,
        }
    }

    fn settle(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.phase = RowPhase::Settled(self.value.clone());
        true
    }
}

/// Body of the panel below the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// No configuration record: a single blank row
    Empty,
    /// A single full-width message row
    Error { message: String },
    /// Feature switched off
    Disabled,
    /// Enabled but the reachability probe failed
    Offline,
    /// Payload present but no field selected
    NoData { message: String },
    Data(Vec<DataRow>),
}

impl PanelView {
    pub fn kind(&self) -> &'static str {
        match self {
            PanelView::Empty => "empty",
            PanelView::Error { .. } => "error",
            PanelView::Disabled => "disabled",
            PanelView::Offline => "offline",
            PanelView::NoData { .. } => "no_data",
            PanelView::Data(_) => "data",
        }
    }
}

/// The rendered panel for one render cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    generation: u64,
    status: Option<ConnectionStatus>,
    view: PanelView,
}

impl Panel {
    /// Build the panel for a pipeline result
    pub fn from_result(result: &PipelineResult, texts: &Texts, generation: u64) -> Self {
        let status = Some(ConnectionStatus::of(result));

        let view = match result {
            PipelineResult::Missing => {
                return Self {
                    generation,
                    status: None,
                    view: PanelView::Empty,
                }
            }
            PipelineResult::Disabled(_) => PanelView::Disabled,
            PipelineResult::Unreachable(_) => PanelView::Offline,
            PipelineResult::Failed { error, .. } => PanelView::Error {
                message: fetch_error_message(error, texts).to_string(),
            },
            PipelineResult::Fetched {
                configuration,
                payload,
            } => {
                let fields = project(&configuration.field_groups, payload, &texts.fields);
                if fields.is_empty() {
                    PanelView::NoData {
                        message: texts.panel.no_data.to_string(),
                    }
                } else {
                    PanelView::Data(fields.into_iter().map(DataRow::from_field).collect())
                }
            }
        };

        debug!("Built panel generation {} as {}", generation, view.kind());
        Self {
            generation,
            status,
            view,
        }
    }

    /// Panel for a configuration record that could not be loaded
    pub fn config_failure(detail: &str, texts: &Texts, generation: u64) -> Self {
        Self {
            generation,
            status: Some(ConnectionStatus::Disconnected),
            view: PanelView::Error {
                message: format!("{}: {}", texts.panel.config_error, detail),
            },
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Status row; absent only for [`PanelView::Empty`]
    pub fn status(&self) -> Option<ConnectionStatus> {
        self.status
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn rows(&self) -> &[DataRow] {
        match &self.view {
            PanelView::Data(rows) => rows,
            _ => &[],
        }
    }

    /// Number of rows still waiting for their reveal
    pub fn pending_rows(&self) -> usize {
        self.rows().iter().filter(|r| r.is_loading()).count()
    }

    pub fn is_settled(&self) -> bool {
        self.pending_rows() == 0
    }

    /// Reveal row `index`; returns the row if it changed phase
    pub fn settle(&mut self, index: usize) -> Option<&DataRow> {
        let PanelView::Data(rows) = &mut self.view else {
            return None;
        };
        let row = rows.get_mut(index)?;
        if row.settle() {
            Some(row)
        } else {
            None
        }
    }
}

fn fetch_error_message(error: &FetchError, texts: &Texts) -> &'static str {
    match error {
        FetchError::RateLimited => texts.panel.rate_limited,
        FetchError::Malformed { .. } => texts.panel.upstream_error,
    }
}
