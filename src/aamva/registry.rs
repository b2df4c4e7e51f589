use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Category a field is bucketed under in the structured view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Physical,
    Address,
    Document,
}

/// Registry entry for one recognized AAMVA field code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub category: Category,
}

/// Record-separator/checksum marker present in some payloads. Recognized
/// while tokenizing, so it terminates the preceding value, but excluded
/// from every derived view.
pub const RECORD_SEPARATOR: &str = "DDD";

/// Every field code the tokenizer recognizes, with display name and category.
pub const FIELDS: &[FieldInfo] = &[
    FieldInfo { code: "DCS", name: "Last Name", category: Category::Personal },
    FieldInfo { code: "DAC", name: "First Name", category: Category::Personal },
    FieldInfo { code: "DAD", name: "Middle Name", category: Category::Personal },
    FieldInfo { code: "DBB", name: "Date of Birth", category: Category::Personal },
    FieldInfo { code: "DBC", name: "Sex", category: Category::Personal },
    FieldInfo { code: "DAY", name: "Eye Color", category: Category::Physical },
    FieldInfo { code: "DAU", name: "Height", category: Category::Physical },
    FieldInfo { code: "DAW", name: "Weight", category: Category::Physical },
    FieldInfo { code: "DAG", name: "Street Address", category: Category::Address },
    FieldInfo { code: "DAI", name: "City", category: Category::Address },
    FieldInfo { code: "DAJ", name: "State", category: Category::Address },
    FieldInfo { code: "DAK", name: "Postal Code", category: Category::Address },
    FieldInfo { code: "DAQ", name: "ID Number", category: Category::Document },
    FieldInfo { code: "DBA", name: "Expiration Date", category: Category::Document },
    FieldInfo { code: "DBD", name: "Issue Date", category: Category::Document },
    FieldInfo { code: "DCG", name: "Country", category: Category::Document },
    FieldInfo { code: "DCA", name: "Vehicle Class", category: Category::Document },
    FieldInfo { code: "DCB", name: "Restriction Codes", category: Category::Document },
    FieldInfo { code: "DCD", name: "Endorsement Codes", category: Category::Document },
    FieldInfo { code: "DCL", name: "Race/Ethnicity", category: Category::Physical },
    FieldInfo { code: "DCM", name: "Vehicle Classification", category: Category::Document },
    FieldInfo { code: "DDB", name: "Card Revision Date", category: Category::Document },
];

// Built once at startup, read-only thereafter; shared by reference across
// concurrent decodes without synchronization.
static BY_CODE: Lazy<HashMap<&'static str, &'static FieldInfo>> =
    Lazy::new(|| FIELDS.iter().map(|info| (info.code, info)).collect());

/// Look up a registry entry by its 3-character code.
pub fn lookup(code: &str) -> Option<&'static FieldInfo> {
    BY_CODE.get(code).copied()
}

/// Whether `window` is a code the tokenizer treats as a field boundary.
/// Includes [`RECORD_SEPARATOR`], which has no registry entry of its own.
pub fn is_boundary(window: &str) -> bool {
    window == RECORD_SEPARATOR || BY_CODE.contains_key(window)
}

/// Canonical static form of a recognized code.
pub fn canonical(window: &str) -> Option<&'static str> {
    if window == RECORD_SEPARATOR {
        return Some(RECORD_SEPARATOR);
    }
    lookup(window).map(|info| info.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_codes() {
        assert_eq!(FIELDS.len(), 22);
        for info in FIELDS {
            assert_eq!(lookup(info.code), Some(info));
        }
    }

    #[test]
    fn last_name_entry() {
        let info = lookup("DCS").unwrap();
        assert_eq!(info.name, "Last Name");
        assert_eq!(info.category, Category::Personal);
    }

    #[test]
    fn separator_is_boundary_but_unlisted() {
        assert!(is_boundary("DDD"));
        assert!(lookup("DDD").is_none());
        assert_eq!(canonical("DDD"), Some(RECORD_SEPARATOR));
    }

    #[test]
    fn unknown_window_is_not_boundary() {
        assert!(!is_boundary("XYZ"));
        assert_eq!(canonical("XYZ"), None);
    }
}
