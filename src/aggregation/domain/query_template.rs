use super::component::ComponentIdentifier;
use crate::shared::error::VerdictError;

/// Catalog entity types queried for every component, in query order.
///
/// The set is closed: the catalog correlation only understands these
/// endpoints, and `rpm-mapping` is derived from two of them afterwards.
pub const CATALOG_QUERY_TEMPLATES: [(&str, &[(&str, &str)]); 7] = [
    ("bugzilla-components", &[("name", "{}")]),
    ("global-components", &[("name", "{}")]),
    ("release-component-contacts", &[("component", "^{}$")]),
    (
        "release-component-relationships",
        &[("from_component_name", "{}")],
    ),
    ("release-components", &[("name", "{}")]),
    (
        "rpms",
        &[("name", "^{}$"), ("version", "{}"), ("release", "{}")],
    ),
    ("global-component-contacts", &[("component", "^{}$")]),
];

/// Fully-specialized catalog query parameters for one invocation
///
/// Built once per component by a pure function; the template table
/// itself is never mutated, so concurrent invocations cannot observe
/// each other's substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQueryPlan {
    queries: Vec<(String, Vec<(String, String)>)>,
}

impl CatalogQueryPlan {
    /// Specializes every entity-type template for `component`
    ///
    /// The `^{}$` patterns become exact-match regex filters on the
    /// substituted value.
    ///
    /// # Errors
    /// Returns `VerdictError::UnknownParameter` when a template carries a
    /// parameter name the classifier does not recognize; a misconfigured
    /// template must never turn into a silently skipped filter.
    pub fn for_component(component: &ComponentIdentifier) -> Result<Self, VerdictError> {
        let mut queries = Vec::with_capacity(CATALOG_QUERY_TEMPLATES.len());
        for (entity_type, patterns) in CATALOG_QUERY_TEMPLATES {
            queries.push((
                entity_type.to_string(),
                specialize(entity_type, patterns, component)?,
            ));
        }
        Ok(Self { queries })
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterates the specialized queries in template order
    pub fn queries(&self) -> impl Iterator<Item = (&str, &[(String, String)])> {
        self.queries
            .iter()
            .map(|(entity_type, params)| (entity_type.as_str(), params.as_slice()))
    }
}

fn specialize(
    entity_type: &str,
    patterns: &[(&str, &str)],
    component: &ComponentIdentifier,
) -> Result<Vec<(String, String)>, VerdictError> {
    let mut params = Vec::with_capacity(patterns.len());
    for (param, pattern) in patterns {
        let value =
            substitution_value(param, component).ok_or_else(|| VerdictError::UnknownParameter {
                name: (*param).to_string(),
                entity_type: entity_type.to_string(),
            })?;
        params.push(((*param).to_string(), pattern.replace("{}", value)));
    }
    Ok(params)
}

/// Maps a template parameter name onto the component field it filters on
fn substitution_value<'a>(param: &str, component: &'a ComponentIdentifier) -> Option<&'a str> {
    match param {
        "name" | "from_component_name" | "component" => Some(component.name()),
        "version" => Some(component.version()),
        "release" => Some(component.release()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn component() -> ComponentIdentifier {
        ComponentIdentifier::parse("component-version-release").unwrap()
    }

    #[test]
    fn test_plan_specializes_every_entity_type() {
        let plan = CatalogQueryPlan::for_component(&component()).unwrap();
        let specialized: BTreeMap<&str, Vec<(String, String)>> = plan
            .queries()
            .map(|(entity_type, params)| (entity_type, params.to_vec()))
            .collect();

        let expected: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::from([
            ("bugzilla-components", vec![("name", "component")]),
            ("global-components", vec![("name", "component")]),
            (
                "release-component-contacts",
                vec![("component", "^component$")],
            ),
            (
                "release-component-relationships",
                vec![("from_component_name", "component")],
            ),
            ("release-components", vec![("name", "component")]),
            (
                "rpms",
                vec![
                    ("name", "^component$"),
                    ("version", "version"),
                    ("release", "release"),
                ],
            ),
            (
                "global-component-contacts",
                vec![("component", "^component$")],
            ),
        ]);

        assert_eq!(specialized.len(), expected.len());
        for (entity_type, params) in expected {
            let got = &specialized[entity_type];
            let want: Vec<(String, String)> = params
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            assert_eq!(got, &want, "parameters for {}", entity_type);
        }
    }

    #[test]
    fn test_plan_preserves_template_order() {
        let plan = CatalogQueryPlan::for_component(&component()).unwrap();
        let order: Vec<&str> = plan.queries().map(|(entity_type, _)| entity_type).collect();
        assert_eq!(
            order,
            vec![
                "bugzilla-components",
                "global-components",
                "release-component-contacts",
                "release-component-relationships",
                "release-components",
                "rpms",
                "global-component-contacts",
            ]
        );
    }

    #[test]
    fn test_unknown_parameter_is_fatal() {
        let error = specialize(
            "build-image-rtt-tests",
            &[("build_nvr", "{}")],
            &component(),
        )
        .unwrap_err();
        match error {
            VerdictError::UnknownParameter { name, entity_type } => {
                assert_eq!(name, "build_nvr");
                assert_eq!(entity_type, "build-image-rtt-tests");
            }
            other => panic!("expected UnknownParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_substitution_value_classifier() {
        let component = component();
        assert_eq!(substitution_value("name", &component), Some("component"));
        assert_eq!(
            substitution_value("from_component_name", &component),
            Some("component")
        );
        assert_eq!(
            substitution_value("component", &component),
            Some("component")
        );
        assert_eq!(substitution_value("version", &component), Some("version"));
        assert_eq!(substitution_value("release", &component), Some("release"));
        assert_eq!(substitution_value("arch", &component), None);
    }
}
