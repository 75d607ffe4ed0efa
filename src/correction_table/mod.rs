// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Compensation owed to the delegators of the tombstoned COS validator.
//!
//! Each record credits 5% of the slashed delegation, plus 9 days of lost APR
//! at 23% annualized, to one `secret1...` account. The table is generated
//! off-chain from a delegations snapshot and compiled in verbatim; amounts are
//! kept exactly as authored.

mod validation;

pub use validation::*;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// The compensation table as committed, a JSON array of
/// `{"address": ..., "amount": ...}` objects.
pub const RECORDS_JSON: &str = include_str!("../../assets/cos_mints.json");

static EMBEDDED: LazyLock<CorrectionTable> = LazyLock::new(|| {
    CorrectionTable::from_json(RECORDS_JSON)
        .expect("assets/cos_mints.json is checked by build.rs")
});

/// One `address → amount` credit. The amount is a decimal string of `uscrt`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionRecord {
    pub address: String,
    pub amount: String,
}

impl CorrectionRecord {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable {
    records: Vec<CorrectionRecord>,
}

impl CorrectionTable {
    /// The compiled-in table.
    pub fn embedded() -> &'static CorrectionTable {
        &EMBEDDED
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn records(&self) -> &[CorrectionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorrectionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record crediting `address`, if any.
    pub fn get(&self, address: &str) -> Option<&CorrectionRecord> {
        self.records.iter().find(|r| r.address == address)
    }

    /// Order-independent `address → amount` view. Later duplicates win, so
    /// compare lengths first when duplicates matter.
    pub fn to_map(&self) -> BTreeMap<&str, &str> {
        self.records
            .iter()
            .map(|r| (r.address.as_str(), r.amount.as_str()))
            .collect()
    }

    /// Copy of the table ordered by address.
    pub fn sorted(&self) -> Self {
        let mut records = self.records.clone();
        records.sort_by(|a, b| a.address.cmp(&b.address));
        Self { records }
    }
}

impl From<Vec<CorrectionRecord>> for CorrectionTable {
    fn from(records: Vec<CorrectionRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a CorrectionTable {
    type Item = &'a CorrectionRecord;
    type IntoIter = std::slice::Iter<'a, CorrectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quickcheck::{Arbitrary, Gen, TestResult};
    use quickcheck_macros::quickcheck;

    use super::*;

    impl Arbitrary for CorrectionRecord {
        fn arbitrary(g: &mut Gen) -> Self {
            Self::new(String::arbitrary(g), u64::arbitrary(g).to_string())
        }
    }

    impl Arbitrary for CorrectionTable {
        fn arbitrary(g: &mut Gen) -> Self {
            Vec::<CorrectionRecord>::arbitrary(g).into()
        }
    }

    #[test]
    fn embedded_table_parses() {
        let table = CorrectionTable::embedded();
        assert!(!table.is_empty());
        assert_eq!(table, &CorrectionTable::from_json(RECORDS_JSON).unwrap());
    }

    #[test]
    fn embedded_table_contains_known_record() {
        let record = CorrectionTable::embedded()
            .get("secret1qqq8g6cjht0qfemed6nmrgjp8gajhnw3panxcf")
            .unwrap();
        assert_eq!(record.amount, "1005671");
    }

    #[test]
    fn embedded_table_round_trips() {
        let table = CorrectionTable::embedded();
        let reparsed = CorrectionTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(table.to_map(), reparsed.to_map());

        let original: serde_json::Value = serde_json::from_str(RECORDS_JSON).unwrap();
        let reserialized: serde_json::Value =
            serde_json::from_str(&table.to_json_pretty().unwrap()).unwrap();
        assert_eq!(original, reserialized);
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"[{"address": "secret1", "amount": "1", "denom": "uscrt"}]"#;
        assert!(CorrectionTable::from_json(json).is_err());
    }

    #[test]
    fn rejects_numeric_amounts() {
        let json = r#"[{"address": "secret1", "amount": 1}]"#;
        assert!(CorrectionTable::from_json(json).is_err());
    }

    #[test]
    fn get_returns_first_match() {
        let table = CorrectionTable::from(vec![
            CorrectionRecord::new("a", "1"),
            CorrectionRecord::new("b", "2"),
            CorrectionRecord::new("a", "3"),
        ]);
        assert_eq!(table.get("a").unwrap().amount, "1");
        assert!(table.get("c").is_none());
        assert_eq!(table.sorted().records()[1].address, "a");
    }

    #[quickcheck]
    fn round_trip_preserves_mapping(table: CorrectionTable) -> bool {
        let json = table.to_json().unwrap();
        let back = CorrectionTable::from_json(&json).unwrap();
        back == table && back.to_map() == table.to_map()
    }

    #[quickcheck]
    fn mapping_ignores_order(table: CorrectionTable) -> TestResult {
        if table.to_map().len() != table.len() {
            return TestResult::discard();
        }
        let mut reversed = table.records().to_vec();
        reversed.reverse();
        let reversed = CorrectionTable::from(reversed);
        TestResult::from_bool(
            reversed.to_map() == table.to_map() && reversed.sorted() == table.sorted(),
        )
    }
}
