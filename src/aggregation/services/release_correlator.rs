use crate::aggregation::domain::release_id_from_compose;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct ReleaseComponentRecord {
    release: ReleaseRef,
}

#[derive(Debug, Deserialize)]
struct ReleaseRef {
    release_id: String,
}

#[derive(Debug, Deserialize)]
struct RpmRecord {
    #[serde(default)]
    linked_composes: Vec<String>,
}

/// ReleaseCorrelator cross-references two independently fetched catalog
/// datasets by a derived release-id key
///
/// Release-component records assert which releases formally track the
/// component; rpm records assert which composes the component actually
/// landed in. Only ids present on both sides are real matches, which
/// keeps stray or parent composes from introducing untracked releases.
pub struct ReleaseCorrelator;

impl ReleaseCorrelator {
    /// Returns the intersection of registered release ids and the ids
    /// derived from rpm linked composes
    ///
    /// Records missing the expected fields and compose names too short
    /// to carry a release id are skipped.
    pub fn matching_release_ids(release_components: &[Value], rpms: &[Value]) -> BTreeSet<String> {
        let registered: BTreeSet<String> = release_components
            .iter()
            .filter_map(|record| match ReleaseComponentRecord::deserialize(record) {
                Ok(parsed) => Some(parsed.release.release_id),
                Err(error) => {
                    trace!(%error, "skipping release-component record without release id");
                    None
                }
            })
            .collect();

        let mut matched = BTreeSet::new();
        for record in rpms {
            let rpm = match RpmRecord::deserialize(record) {
                Ok(rpm) => rpm,
                Err(error) => {
                    trace!(%error, "skipping rpm record without linked composes");
                    continue;
                }
            };
            for compose in &rpm.linked_composes {
                match release_id_from_compose(compose) {
                    Some(release_id) if registered.contains(&release_id) => {
                        matched.insert(release_id);
                    }
                    Some(_) => {}
                    None => trace!(compose = %compose, "compose name carries no release id"),
                }
            }
        }
        matched
    }
}
