//! Domain types shared by the acquisition pipeline, the panel and the frontends

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// JSON object returned by the geolocation provider
///
/// Untyped; the panel only reads the paths listed in the field catalog.
pub type GeolocationPayload = Map<String, Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Field groups
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse category of displayable fields the user can opt into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    /// Network provider: public IP, ISP, organization
    Isp,
    /// Location: city, time zone, coordinates
    Loc,
    /// Country names
    Co,
}

impl FieldGroup {
    /// All groups in canonical iteration order
    pub const ALL: [FieldGroup; 3] = [FieldGroup::Isp, FieldGroup::Loc, FieldGroup::Co];

    /// Key used in the persisted configuration record
    pub fn key(&self) -> &'static str {
        match self {
            FieldGroup::Isp => "isp",
            FieldGroup::Loc => "loc",
            FieldGroup::Co => "co",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "isp" => Some(FieldGroup::Isp),
            "loc" => Some(FieldGroup::Loc),
            "co" => Some(FieldGroup::Co),
            _ => None,
        }
    }

    /// Canonical field keys offered under this group
    pub fn default_keys(&self) -> &'static [&'static str] {
        match self {
            FieldGroup::Isp => &["ip", "isp", "organization"],
            FieldGroup::Loc => &["city", "time_zone.name", "latitude", "longitude"],
            FieldGroup::Co => &["country_name", "country_name_official"],
        }
    }
}

impl std::fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The user's field choices: for each selected group, the ordered field keys
///
/// A group that is absent is not selected. A group that is present with an
/// empty key list is selected but contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    #[serde(flatten)]
    entries: std::collections::BTreeMap<FieldGroup, Vec<String>>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every group expanded to its default keys
    pub fn all_defaults() -> Self {
        FieldGroup::ALL
            .iter()
            .fold(Self::new(), |sel, group| {
                sel.with_group(*group, group.default_keys().iter().copied())
            })
    }

    /// Builder-style variant of [`FieldSelection::set`]
    pub fn with_group<I, S>(mut self, group: FieldGroup, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(group, keys);
        self
    }

    /// Replace the key list for a group
    pub fn set<I, S>(&mut self, group: FieldGroup, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(group, keys.into_iter().map(Into::into).collect());
    }

    /// Append one key to a group, selecting the group if needed
    pub fn push(&mut self, group: FieldGroup, key: impl Into<String>) {
        self.entries.entry(group).or_default().push(key.into());
    }

    pub fn keys(&self, group: FieldGroup) -> Option<&[String]> {
        self.entries.get(&group).map(Vec::as_slice)
    }

    pub fn is_selected(&self, group: FieldGroup) -> bool {
        self.entries.contains_key(&group)
    }

    /// Selected groups in canonical order with their keys
    pub fn iter(&self) -> impl Iterator<Item = (FieldGroup, &[String])> {
        // BTreeMap ordering follows the enum declaration order
        self.entries.iter().map(|(g, keys)| (*g, keys.as_slice()))
    }

    /// True when no group is selected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration record
// ─────────────────────────────────────────────────────────────────────────────

/// The panel's configuration record, validated at the store boundary
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub enabled: bool,
    pub field_groups: FieldSelection,
    /// Geolocation API token; opaque and never serialized
    #[serde(skip_serializing)]
    pub token: String,
}

impl Configuration {
    pub fn new(enabled: bool, field_groups: FieldSelection, token: impl Into<String>) -> Self {
        Self {
            enabled,
            field_groups,
            token: token.into(),
        }
    }

    /// A record with the feature switched off
    pub fn disabled() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("enabled", &self.enabled)
            .field("field_groups", &self.field_groups)
            .field(
                "token",
                &if self.token.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline result
// ─────────────────────────────────────────────────────────────────────────────

/// Why a geolocation lookup produced no payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// The provider reported that the daily quota for the token is exhausted
    RateLimited,
    /// The provider's response could not be interpreted as a JSON object
    Malformed { detail: String },
}

impl FetchError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }

    /// Untranslated description, for logs and the serialized result
    pub fn message(&self) -> &str {
        match self {
            FetchError::RateLimited => "daily request limit exceeded",
            FetchError::Malformed { detail } => detail,
        }
    }
}

/// Outcome of one acquisition run, handed from the pipeline to the panel
///
/// Each variant corresponds to one branch of the acquisition sequence, so at
/// most one of payload and error can ever be present.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    /// No configuration record exists
    Missing,
    /// The feature is switched off; nothing was probed
    Disabled(Configuration),
    /// The reachability probe failed; geolocation was not attempted
    Unreachable(Configuration),
    /// The geolocation lookup ran but produced no usable payload
    Failed {
        configuration: Configuration,
        error: FetchError,
    },
    /// The geolocation lookup succeeded
    Fetched {
        configuration: Configuration,
        payload: GeolocationPayload,
    },
}

impl PipelineResult {
    pub fn configuration(&self) -> Option<&Configuration> {
        match self {
            PipelineResult::Missing => None,
            PipelineResult::Disabled(cfg) | PipelineResult::Unreachable(cfg) => Some(cfg),
            PipelineResult::Failed { configuration, .. }
            | PipelineResult::Fetched { configuration, .. } => Some(configuration),
        }
    }

    pub fn payload(&self) -> Option<&GeolocationPayload> {
        match self {
            PipelineResult::Fetched { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            PipelineResult::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Connected means the feature is on and a payload arrived
    pub fn is_connected(&self) -> bool {
        self.configuration().is_some_and(|cfg| cfg.enabled) && self.payload().is_some()
    }

    /// Short name of the branch taken, for logs and headless output
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineResult::Missing => "missing",
            PipelineResult::Disabled(_) => "disabled",
            PipelineResult::Unreachable(_) => "unreachable",
            PipelineResult::Failed { .. } => "failed",
            PipelineResult::Fetched { .. } => "fetched",
        }
    }
}

/// Flattened `{configuration, payload, error_message}` view
///
/// Absent parts serialize as `null`; the token never appears because
/// [`Configuration`] skips it.
impl Serialize for PipelineResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PipelineResult", 3)?;
        state.serialize_field("configuration", &self.configuration())?;
        state.serialize_field("payload", &self.payload())?;
        state.serialize_field("error_message", &self.error().map(FetchError::message))?;
        state.end()
    }
}

/// Look up a dotted path (`time_zone.name`) inside a JSON object
///
/// Any missing segment, or a segment that lands on a non-object, yields `None`.
pub fn resolve_path<'a>(payload: &'a GeolocationPayload, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = payload.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
