use indexmap::IndexMap;
use serde::Serialize;

use crate::aamva::registry::{self, Category, RECORD_SEPARATOR};
use crate::aamva::tokenizer::AamvaRecord;
use crate::aamva::format;

/// Category buckets mapping display names to raw values.
///
/// Derived deterministically from a record and the registry; codes without
/// a registry entry (and the `DDD` marker) are omitted here while staying
/// present in the raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredView {
    pub personal: IndexMap<&'static str, String>,
    pub physical: IndexMap<&'static str, String>,
    pub address: IndexMap<&'static str, String>,
    pub document: IndexMap<&'static str, String>,
}

impl StructuredView {
    pub fn from_record(record: &AamvaRecord) -> Self {
        let mut view = Self::default();
        for (code, value) in record.iter() {
            if code == RECORD_SEPARATOR {
                continue;
            }
            let Some(info) = registry::lookup(code) else {
                continue;
            };
            view.bucket_mut(info.category).insert(info.name, value.to_string());
        }
        view
    }

    fn bucket_mut(&mut self, category: Category) -> &mut IndexMap<&'static str, String> {
        match category {
            Category::Personal => &mut self.personal,
            Category::Physical => &mut self.physical,
            Category::Address => &mut self.address,
            Category::Document => &mut self.document,
        }
    }
}

/// Fixed set of user-facing attributes, each derived from one record field.
/// Missing fields yield empty strings, never nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub last: String,
    pub first: String,
    pub dob: String,
    pub eyes: String,
    pub sex: String,
    pub height: String,
    pub weight: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal: String,
    pub country: String,
    pub id: String,
    pub issued: String,
    pub expires: String,
}

impl UserView {
    pub fn from_record(record: &AamvaRecord) -> Self {
        Self {
            last: record.get("DCS").to_string(),
            first: record.get("DAC").to_string(),
            dob: format::date_readable(record.get("DBB")),
            eyes: record.get("DAY").to_string(),
            sex: format::sex(record.get("DBC")),
            height: format::height(record.get("DAU")),
            weight: record.get("DAW").to_string(),
            street: record.get("DAG").to_string(),
            city: record.get("DAI").to_string(),
            state: record.get("DAJ").to_string(),
            postal: record.get("DAK").to_string(),
            country: record.get("DCG").to_string(),
            id: record.get("DAQ").to_string(),
            issued: format::date_readable(record.get("DBD")),
            expires: format::date_readable(record.get("DBA")),
        }
    }
}

/// Full parse result for one AAMVA payload: category buckets, the raw field
/// map in scan order, and the normalized user view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAamva {
    #[serde(flatten)]
    pub categories: StructuredView,
    pub raw_fields: IndexMap<&'static str, String>,
    pub user: UserView,
}
