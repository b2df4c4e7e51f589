use indexmap::IndexMap;

use crate::aamva::registry;

/// Raw field map produced by one scan over a decoded payload.
///
/// Keys are canonical field codes in scan order. Callers treat an absent
/// code as an empty string, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AamvaRecord {
    fields: IndexMap<&'static str, String>,
}

impl AamvaRecord {
    /// Value for `code`, or `""` when the payload did not carry it.
    pub fn get(&self, code: &str) -> &str {
        self.fields.get(code).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, code: &str) -> bool {
        self.fields.contains_key(code)
    }

    /// Fields in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(code, value)| (*code, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Scan-ordered copy of the raw field map, for the `raw_fields` output.
    pub fn to_map(&self) -> IndexMap<&'static str, String> {
        self.fields.clone()
    }
}

/// Tokenize an AAMVA payload into its raw field map.
///
/// Scans left to right. A recognized 3-character code starts a field; its
/// value runs to the next recognized code, or to the payload end when fewer
/// than 3 characters remain. Values are trimmed and then reduced to their
/// first whitespace-delimited token.
///
/// The first-token reduction is a known limitation kept for compatibility:
/// a multi-word value such as a city of "NEW YORK" comes out as "NEW".
/// It is likely a defect in the original field layout handling, preserved
/// here rather than silently fixed.
pub fn tokenize(payload: &str) -> AamvaRecord {
    let bytes = payload.as_bytes();
    let n = bytes.len();
    let mut fields: IndexMap<&'static str, String> = IndexMap::new();

    let mut i = 0;
    while i + 3 <= n {
        let Some(code) = window(bytes, i).and_then(registry::canonical) else {
            i += 1;
            continue;
        };
        i += 3;

        // Value runs until the next recognized code, or payload end when no
        // full 3-character window is left to test.
        let start = i;
        let mut end = n;
        let mut j = start;
        while j + 3 <= n {
            if window(bytes, j).is_some_and(registry::is_boundary) {
                end = j;
                break;
            }
            j += 1;
        }

        // Both `start` and `end` sit on char boundaries: they are adjacent
        // to ASCII code matches or the payload end.
        let value = payload[start..end]
            .trim()
            .split_whitespace()
            .next()
            .unwrap_or("");
        fields.insert(code, value.to_string());
        i = end;
    }

    AamvaRecord { fields }
}

fn window(bytes: &[u8], at: usize) -> Option<&str> {
    std::str::from_utf8(&bytes[at..at + 3]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_adjacent_fields() {
        let record = tokenize("DCSSMITHDACJOHNDBB10172002");
        assert_eq!(record.get("DCS"), "SMITH");
        assert_eq!(record.get("DAC"), "JOHN");
        assert_eq!(record.get("DBB"), "10172002");
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn preserves_scan_order() {
        let record = tokenize("DBB10172002DCSSMITH");
        let codes: Vec<&str> = record.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, ["DBB", "DCS"]);
    }

    #[test]
    fn multi_word_value_truncates_to_first_token() {
        // Known limitation, asserted on purpose: the second word is lost.
        let record = tokenize("DAINEW YORKDAJNY");
        assert_eq!(record.get("DAI"), "NEW");
        assert_eq!(record.get("DAJ"), "NY");
    }

    #[test]
    fn separator_terminates_value_and_is_recorded() {
        let record = tokenize("DCSSMITHDDD123");
        assert_eq!(record.get("DCS"), "SMITH");
        assert!(record.contains("DDD"));
        assert_eq!(record.get("DDD"), "123");
    }

    #[test]
    fn unrecognized_prefix_is_skipped() {
        let record = tokenize("@ANSI 636000DCSSMITH");
        assert_eq!(record.get("DCS"), "SMITH");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn absent_code_reads_as_empty() {
        let record = tokenize("DCSSMITH");
        assert_eq!(record.get("DAC"), "");
        assert!(!record.contains("DAC"));
    }

    #[test]
    fn empty_payload_yields_empty_record() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("AB").is_empty());
    }

    #[test]
    fn value_is_trimmed_before_token_split() {
        let record = tokenize("DAJ  NY  DAK12345");
        assert_eq!(record.get("DAJ"), "NY");
        assert_eq!(record.get("DAK"), "12345");
    }

    #[test]
    fn non_ascii_bytes_do_not_panic() {
        let record = tokenize("héllo DCSMÜLLER woDAJNY");
        assert_eq!(record.get("DCS"), "MÜLLER");
        assert_eq!(record.get("DAJ"), "NY");
    }
}
