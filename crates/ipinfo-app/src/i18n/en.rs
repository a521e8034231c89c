//! English strings

use super::keys::{FieldLabels, HintTexts, PanelTexts, Texts};

pub const TEXTS: Texts = Texts {
    panel: PanelTexts {
        title: "IP Information",
        status_label: "Internet Status",
        connected: "Connected",
        disconnected: "Disconnected",
        loading: "Please wait...",
        checking: "Checking connection...",
        no_data: "No data available, please check the settings.",
        rate_limited: "You have exceeded the limit of 1000 requests per day. Please replace your TOKEN.",
        upstream_error: "The geolocation service returned an unreadable response.",
        config_error: "Configuration error",
    },
    fields: FieldLabels {
        ip: "Public IP",
        isp: "ISP",
        organization: "Organization",
        country_name_official: "Official country name",
        city: "City",
        country_name: "Country",
        time_zone: "Time Zone",
        latitude: "Latitude",
        longitude: "Longitude",
    },
    hints: HintTexts {
        reload: "reload",
        quit: "quit",
        last_loaded: "Updated",
    },
};
