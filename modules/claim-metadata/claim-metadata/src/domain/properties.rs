//! Property hygiene applied to legacy claim properties at import time.

use std::collections::BTreeMap;

use claim_metadata_sdk::ClaimProperties;
use claim_metadata_sdk::constants::{DEFAULT_DISPLAY_NAME, property};

/// Structural keys that describe where a legacy entry lives, not the claim itself.
const STRUCTURAL_KEYS: [&str; 3] = [property::DIALECT, property::CLAIM_URI, property::ATTRIBUTE_ID];

/// Flags that mean `true` when declared without a value.
const PRESENCE_FLAGS: [&str; 3] = [
    property::SUPPORTED_BY_DEFAULT,
    property::READ_ONLY,
    property::REQUIRED,
];

/// Cleans a legacy property map in place.
///
/// Structural keys are removed, blank presence flags become `"true"` and a
/// missing display name becomes `"0"`. Absent flags stay absent.
pub fn clean_property_map(properties: &mut BTreeMap<String, String>) {
    for key in STRUCTURAL_KEYS {
        properties.remove(key);
    }

    for key in PRESENCE_FLAGS {
        if let Some(value) = properties.get_mut(key)
            && value.trim().is_empty()
        {
            "true".clone_into(value);
        }
    }

    properties
        .entry(property::DISPLAY_NAME.to_owned())
        .or_insert_with(|| DEFAULT_DISPLAY_NAME.to_owned());
}

/// Cleans a legacy property map and converts it to typed properties.
#[must_use]
pub fn fill_claim_properties(mut properties: BTreeMap<String, String>) -> ClaimProperties {
    clean_property_map(&mut properties);
    ClaimProperties::from_property_map(properties)
}
