//! Translation between wire keys (`camelCase`) and attribute names
//! (`snake_case`).

use convert_case::{Case, Casing};

/// Wire tokens that stay joined when converted to an attribute name.
/// Pairs of `(wire, internal)`.
const JOINED_TOKENS: &[(&str, &str)] = &[("musicBrainz", "musicbrainz")];

/// Converts a wire key such as `coverArt` into an attribute name such as
/// `cover_art`.
pub fn to_internal(camel: &str) -> String {
    let mut joined = camel.to_owned();
    for (wire, internal) in JOINED_TOKENS {
        joined = joined.replace(wire, internal);
    }
    joined.to_case(Case::Snake)
}

/// Converts an attribute name such as `musicbrainz_id` into its wire key,
/// `musicBrainzId`.
pub fn to_external(internal: &str) -> String {
    let mut camel = internal.to_case(Case::Camel);
    for (wire, internal) in JOINED_TOKENS {
        camel = camel.replace(internal, wire);
    }
    camel
}
