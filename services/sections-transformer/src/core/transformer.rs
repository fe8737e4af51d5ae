//! TME term to section transformation
//!
//! Pure, total conversion of a raw taxonomy term into a [`Section`].
//! The section id is derived from the provenance token only, so the
//! same `(taxonomy, raw id)` pair always maps to the same id.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use uuid::{Builder, Uuid};

use crate::core::types::{AlternativeIdentifiers, RawTerm, Section, SECTION_TYPE};

/// Separator between the two encoded halves of a provenance token.
/// Never produced by the standard base64 alphabet.
const TME_SEPARATOR: char = '-';

/// Transform one raw term into a section of the given taxonomy
pub fn transform(term: &RawTerm, taxonomy_name: &str) -> Section {
    let tme_identifier = build_tme_identifier(&term.raw_id, taxonomy_name);
    let id = derive_section_id(&tme_identifier);

    Section {
        id: id.clone(),
        pref_label: term.canonical_name.clone(),
        alternative_identifiers: AlternativeIdentifiers {
            tme: vec![tme_identifier],
            uuids: vec![id],
        },
        section_type: SECTION_TYPE.to_string(),
    }
}

/// Build the reversible TME provenance token
///
/// Each component is base64 encoded on its own and the halves are
/// joined with `-`, so neither component can smuggle the separator.
pub fn build_tme_identifier(raw_id: &str, taxonomy_name: &str) -> String {
    format!(
        "{}{}{}",
        STANDARD.encode(raw_id.as_bytes()),
        TME_SEPARATOR,
        STANDARD.encode(taxonomy_name.as_bytes())
    )
}

/// Split a provenance token back into `(raw id, taxonomy name)`
///
/// Returns `None` for tokens that were not built by
/// [`build_tme_identifier`].
pub fn decode_tme_identifier(token: &str) -> Option<(String, String)> {
    let (raw, taxonomy) = token.split_once(TME_SEPARATOR)?;
    let raw = String::from_utf8(STANDARD.decode(raw).ok()?).ok()?;
    let taxonomy = String::from_utf8(STANDARD.decode(taxonomy).ok()?).ok()?;
    Some((raw, taxonomy))
}

/// Name-based (MD5, version 3) UUID over the token bytes with an
/// empty namespace.
fn derive_section_id(tme_identifier: &str) -> String {
    let digest = Md5::digest(tme_identifier.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);

    let uuid: Uuid = Builder::from_md5_bytes(bytes).into_uuid();
    uuid.hyphenated().to_string()
}
