//! String table definitions

/// Root of every localized string table
pub struct Texts {
    pub panel: PanelTexts,
    pub fields: FieldLabels,
    pub hints: HintTexts,
}

/// Panel chrome, status words and full-row messages
pub struct PanelTexts {
    pub title: &'static str,
    pub status_label: &'static str,
    pub connected: &'static str,
    pub disconnected: &'static str,
    /// Placeholder shown next to the spinner of a row that has not settled
    pub loading: &'static str,
    /// Shown while the acquisition pipeline is still running
    pub checking: &'static str,
    pub no_data: &'static str,
    pub rate_limited: &'static str,
    pub upstream_error: &'static str,
    pub config_error: &'static str,
}

/// Display labels for catalog fields
pub struct FieldLabels {
    pub ip: &'static str,
    pub isp: &'static str,
    pub organization: &'static str,
    pub country_name_official: &'static str,
    pub city: &'static str,
    pub country_name: &'static str,
    pub time_zone: &'static str,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

/// Key hints and footer text
pub struct HintTexts {
    pub reload: &'static str,
    pub quit: &'static str,
    pub last_loaded: &'static str,
}
