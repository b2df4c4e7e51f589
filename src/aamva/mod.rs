//! AAMVA driver-license payload parsing.
//!
//! A decoded PDF417 payload is tokenized into a raw field map by scanning
//! for the fixed 3-character field codes, then projected into two derived
//! views: category buckets keyed by display name, and a normalized
//! user-facing view with formatted dates, sex, and height. Both views are
//! pure functions of the record and the static field registry.

pub mod format;
pub mod registry;
pub mod tokenizer;
pub mod views;

pub use registry::{Category, FieldInfo, RECORD_SEPARATOR};
pub use tokenizer::{AamvaRecord, tokenize};
pub use views::{ParsedAamva, StructuredView, UserView};

/// Tokenize a decoded payload and derive both views in one pass.
pub fn parse(payload: &str) -> ParsedAamva {
    let record = tokenize(payload);
    ParsedAamva {
        categories: StructuredView::from_record(&record),
        raw_fields: record.to_map(),
        user: UserView::from_record(&record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_combines_record_and_views() {
        let parsed = parse("DCSSMITHDACJOHNDBB10172002");
        assert_eq!(parsed.raw_fields.get("DCS").unwrap(), "SMITH");
        assert_eq!(parsed.categories.personal.get("First Name").unwrap(), "JOHN");
        assert_eq!(parsed.user.dob, "October 17, 2002");
    }

    #[test]
    fn parse_is_repeatable() {
        let payload = "DCSSMITHDBC1DAU067 in";
        assert_eq!(parse(payload), parse(payload));
    }

    #[test]
    fn separator_stays_in_raw_fields_only() {
        let parsed = parse("DCSSMITHDDDAB");
        assert!(parsed.raw_fields.contains_key("DDD"));
        assert!(!parsed.categories.personal.contains_key("DDD"));
        assert!(!parsed.categories.document.contains_key("DDD"));
    }
}
