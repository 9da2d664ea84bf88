use quire_core::enums::{EntityKind, EventKind, SortColumn};
use serde::de::DeserializeOwned;

/// Parse an enum from its serialized name using serde-deserialization.
fn parse_enum<T>(normalized: &str, raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let json = serde_json::to_string(normalized)?;
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// `document`, `Document`, `acl`, `route-model` ... in any letter case.
pub fn parse_entity_kind(raw: &str) -> anyhow::Result<EntityKind> {
    let wanted = raw.replace(['-', '_'], "");
    EntityKind::ALL
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| {
            let known = EntityKind::ALL.map(EntityKind::as_str).join(", ");
            anyhow::anyhow!("invalid entity kind '{raw}': expected one of {known}")
        })
}

pub fn parse_event_kind(raw: &str) -> anyhow::Result<EventKind> {
    parse_enum(&raw.to_ascii_uppercase(), raw, "event")
}

pub fn parse_sort_column(raw: &str) -> anyhow::Result<SortColumn> {
    parse_enum(&raw.to_ascii_lowercase().replace('-', "_"), raw, "sort column")
}
