//! Field projection: selected field keys onto a geolocation payload

use std::collections::HashSet;

use ipinfo_core::prelude::*;
use ipinfo_core::{resolve_path, FieldSelection, GeolocationPayload};
use serde_json::Value;

use crate::catalog::{self, CatalogEntry, Enrichment};
use crate::i18n::FieldLabels;

/// Text shown for a field with no value
pub const PLACEHOLDER: &str = "-";

/// A field resolved against the payload, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField {
    pub key: String,
    pub label: String,
    /// Value at the field's path, before enrichment
    pub raw: Option<Value>,
    /// Enriched display text, or [`PLACEHOLDER`]
    pub display: String,
}

/// Project the selection onto `payload`
///
/// Groups are visited in canonical order and, within a group, selected keys
/// in catalog order. A key selected under more than one group is emitted
/// once, under its first group. Keys unknown to the catalog are skipped.
pub fn project(
    selection: &FieldSelection,
    payload: &GeolocationPayload,
    labels: &FieldLabels,
) -> Vec<ProjectedField> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut fields = Vec::new();

    for (group, keys) in selection.iter() {
        for key in keys.iter().filter(|key| catalog::lookup(key).is_none()) {
            debug!("Skipping unknown field '{}' in group {}", key, group);
        }

        let selected = catalog::CATALOG
            .iter()
            .filter(|entry| keys.iter().any(|key| key == entry.key));

        for entry in selected {
            if !seen.insert(entry.key) {
                debug!("Skipping duplicate field '{}' in group {}", entry.key, group);
                continue;
            }
            fields.push(project_entry(entry, payload, labels));
        }
    }

    fields
}

fn project_entry(
    entry: &CatalogEntry,
    payload: &GeolocationPayload,
    labels: &FieldLabels,
) -> ProjectedField {
    let raw = resolve_path(payload, entry.path).cloned();
    let display = match raw.as_ref().and_then(display_text) {
        Some(base) => enrich(base, entry.enrichment, payload),
        None => PLACEHOLDER.to_string(),
    };

    ProjectedField {
        key: entry.key.to_string(),
        label: entry.label(labels).to_string(),
        raw,
        display,
    }
}

/// Text for a JSON value; `None` for null and empty strings
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

fn enrich(base: String, rule: Enrichment, payload: &GeolocationPayload) -> String {
    let Enrichment::Suffix(path) = rule else {
        return base;
    };
    match resolve_path(payload, path).and_then(display_text) {
        Some(suffix) => format!("{} {}", base, suffix),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use ipinfo_core::FieldGroup;
    use serde_json::json;

    fn payload(value: Value) -> GeolocationPayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn labels() -> &'static FieldLabels {
        &Locale::En.texts().fields
    }

    fn displays(fields: &[ProjectedField]) -> Vec<&str> {
        fields.iter().map(|f| f.display.as_str()).collect()
    }

    #[test]
    fn test_country_gets_emoji_suffix() {
        let sel = FieldSelection::new().with_group(FieldGroup::Co, ["country_name"]);
        let p = payload(json!({"country_name": "Indonesia", "country_emoji": "🇮🇩"}));

        let fields = project(&sel, &p, labels());

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Country");
        assert_eq!(fields[0].display, "Indonesia 🇮🇩");
        assert_eq!(fields[0].raw, Some(json!("Indonesia")));
    }

    #[test]
    fn test_time_zone_gets_current_time_suffix() {
        let sel = FieldSelection::new().with_group(FieldGroup::Loc, ["time_zone.name"]);
        let p = payload(json!({
            "time_zone": {"name": "Asia/Jakarta", "current_time": "2024-05-01 10:00:00.000+0700"}
        }));

        let fields = project(&sel, &p, labels());
        assert_eq!(fields[0].display, "Asia/Jakarta 2024-05-01 10:00:00.000+0700");
    }

    #[test]
    fn test_city_gets_province_suffix() {
        let sel = FieldSelection::new().with_group(FieldGroup::Loc, ["city"]);
        let p = payload(json!({"city": "Bandung", "state_prov": "West Java"}));

        assert_eq!(project(&sel, &p, labels())[0].display, "Bandung West Java");
    }

    #[test]
    fn test_missing_enrichment_source_leaves_value() {
        let sel = FieldSelection::new()
            .with_group(FieldGroup::Loc, ["city", "time_zone.name"])
            .with_group(FieldGroup::Co, ["country_name"]);
        let p = payload(json!({
            "city": "Bandung",
            "state_prov": "",
            "time_zone": {"name": "Asia/Jakarta"},
            "country_name": "Indonesia"
        }));

        assert_eq!(
            displays(&project(&sel, &p, labels())),
            vec!["Bandung", "Asia/Jakarta", "Indonesia"]
        );
    }

    #[test]
    fn test_null_value_is_placeholder_without_suffix() {
        let sel = FieldSelection::new().with_group(FieldGroup::Co, ["country_name"]);
        let p = payload(json!({"country_name": null, "country_emoji": "🇮🇩"}));

        let fields = project(&sel, &p, labels());
        assert_eq!(fields[0].display, PLACEHOLDER);
        assert_eq!(fields[0].raw, Some(Value::Null));
    }

    #[test]
    fn test_missing_intermediate_segment_is_placeholder() {
        let sel = FieldSelection::new().with_group(FieldGroup::Loc, ["time_zone.name"]);
        let fields = project(&sel, &payload(json!({})), labels());

        assert_eq!(fields[0].raw, None);
        assert_eq!(fields[0].display, "-");
    }

    #[test]
    fn test_numbers_use_json_text() {
        let sel = FieldSelection::new().with_group(FieldGroup::Loc, ["latitude", "longitude"]);
        let p = payload(json!({"latitude": "-6.91474", "longitude": 107.60981}));

        assert_eq!(displays(&project(&sel, &p, labels())), vec!["-6.91474", "107.60981"]);
    }

    #[test]
    fn test_groups_in_canonical_order_keys_in_catalog_order() {
        let sel = FieldSelection::new()
            .with_group(FieldGroup::Co, ["country_name"])
            .with_group(FieldGroup::Isp, ["organization", "ip"]);
        let p = payload(json!({"ip": "1.2.3.4", "organization": "Telkom", "country_name": "ID"}));

        let keys: Vec<String> = project(&sel, &p, labels()).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["ip", "organization", "country_name"]);
    }

    #[test]
    fn test_duplicate_keys_render_once() {
        let sel = FieldSelection::new()
            .with_group(FieldGroup::Isp, ["ip", "isp"])
            .with_group(FieldGroup::Co, ["ip", "country_name"]);
        let p = payload(json!({"ip": "1.2.3.4", "isp": "Telkom", "country_name": "ID"}));

        let keys: Vec<String> = project(&sel, &p, labels()).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["ip", "isp", "country_name"]);
    }

    #[test]
    fn test_repeated_key_within_group_renders_once() {
        let sel = FieldSelection::new().with_group(FieldGroup::Isp, ["ip", "ip"]);
        let p = payload(json!({"ip": "1.2.3.4"}));

        assert_eq!(project(&sel, &p, labels()).len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let sel = FieldSelection::new().with_group(FieldGroup::Isp, ["asn", "ip"]);
        let p = payload(json!({"ip": "1.2.3.4", "asn": "AS7713"}));

        let fields = project(&sel, &p, labels());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "ip");
    }

    #[test]
    fn test_empty_selection_projects_nothing() {
        let p = payload(json!({"ip": "1.2.3.4"}));
        assert!(project(&FieldSelection::new(), &p, labels()).is_empty());
    }

    #[test]
    fn test_selected_group_without_keys_projects_nothing() {
        let sel = FieldSelection::new().with_group(FieldGroup::Isp, Vec::<String>::new());
        assert!(project(&sel, &payload(json!({"ip": "1.2.3.4"})), labels()).is_empty());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let sel = FieldSelection::all_defaults();
        let p = payload(json!({
            "ip": "1.2.3.4", "city": "Bandung", "country_name": "Indonesia",
            "country_emoji": "🇮🇩", "time_zone": {"name": "Asia/Jakarta"}
        }));

        assert_eq!(project(&sel, &p, labels()), project(&sel, &p, labels()));
    }

    #[test]
    fn test_labels_are_localized() {
        let sel = FieldSelection::new().with_group(FieldGroup::Isp, ["ip"]);
        let p = payload(json!({"ip": "1.2.3.4"}));

        let fields = project(&sel, &p, &Locale::Id.texts().fields);
        assert_eq!(fields[0].label, "IP Publik");
    }

    #[test]
    fn test_display_text_variants() {
        assert_eq!(display_text(&json!(null)), None);
        assert_eq!(display_text(&json!("")), None);
        assert_eq!(display_text(&json!(true)), Some("true".to_string()));
        assert_eq!(display_text(&json!([1, 2])), Some("[1,2]".to_string()));
    }
}
