use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Catalog metadata report in the downstream-consumer shape:
/// `{"pdc": {"results": {<entityType>: [...], "rpm-mapping": {...}}}}`
///
/// Entity buckets keep the raw catalog records; `rpm-mapping` holds one
/// raw response per correlated release id. The field set is part of the
/// compatibility contract.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub pdc: CatalogResults,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResults {
    pub results: Map<String, Value>,
}

impl CatalogReport {
    pub fn new(
        buckets: Vec<(String, Vec<Value>)>,
        rpm_mappings: BTreeMap<String, Value>,
    ) -> Self {
        let mut results = Map::new();
        for (entity_type, records) in buckets {
            results.insert(entity_type, Value::Array(records));
        }
        results.insert(
            "rpm-mapping".to_string(),
            Value::Object(rpm_mappings.into_iter().collect()),
        );
        Self {
            pdc: CatalogResults { results },
        }
    }

    /// The records collected for one entity type, if it was queried
    pub fn entity_records(&self, entity_type: &str) -> Option<&Vec<Value>> {
        self.pdc.results.get(entity_type).and_then(Value::as_array)
    }

    /// The rpm-mapping response stored for one release id
    pub fn rpm_mapping(&self, release_id: &str) -> Option<&Value> {
        self.pdc.results.get("rpm-mapping")?.get(release_id)
    }
}
