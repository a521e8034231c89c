//! The fixed catalog of displayable fields

use crate::i18n::FieldLabels;

/// Extra text appended to a field's value when the payload carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrichment {
    None,
    /// Append the value found at this dotted path, separated by a space
    Suffix(&'static str),
}

/// One displayable field
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Canonical key as stored in the configuration record
    pub key: &'static str,
    /// Dotted path into the geolocation payload
    pub path: &'static str,
    pub enrichment: Enrichment,
    label: fn(&FieldLabels) -> &'static str,
}

impl CatalogEntry {
    /// Localized label for this field
    pub fn label(&self, labels: &FieldLabels) -> &'static str {
        (self.label)(labels)
    }
}

/// Every field the panel knows how to show
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        key: "ip",
        path: "ip",
        enrichment: Enrichment::None,
        label: |l| l.ip,
    },
    CatalogEntry {
        key: "isp",
        path: "isp",
        enrichment: Enrichment::None,
        label: |l| l.isp,
    },
    CatalogEntry {
        key: "organization",
        path: "organization",
        enrichment: Enrichment::None,
        label: |l| l.organization,
    },
    CatalogEntry {
        key: "country_name_official",
        path: "country_name_official",
        enrichment: Enrichment::None,
        label: |l| l.country_name_official,
    },
    CatalogEntry {
        key: "city",
        path: "city",
        enrichment: Enrichment::Suffix("state_prov"),
        label: |l| l.city,
    },
    CatalogEntry {
        key: "country_name",
        path: "country_name",
        enrichment: Enrichment::Suffix("country_emoji"),
        label: |l| l.country_name,
    },
    CatalogEntry {
        key: "time_zone.name",
        path: "time_zone.name",
        enrichment: Enrichment::Suffix("time_zone.current_time"),
        label: |l| l.time_zone,
    },
    CatalogEntry {
        key: "latitude",
        path: "latitude",
        enrichment: Enrichment::None,
        label: |l| l.latitude,
    },
    CatalogEntry {
        key: "longitude",
        path: "longitude",
        enrichment: Enrichment::None,
        label: |l| l.longitude,
    },
];

/// Look up a canonical key
pub fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.key == key)
}
