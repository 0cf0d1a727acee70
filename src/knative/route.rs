//! Route documents: weighted traffic to revisions or configurations.
use serde::{Deserialize, Serialize};

use super::meta::{ObjectMeta, TypeMeta};
use super::opt::{apply_all, Opt};
use super::serving::SERVING_API_VERSION;

pub const ROUTE_KIND: &str = "Route";

pub type RouteOption = Opt<RouteSpec>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: RouteSpec,
}

/// Percentages are not checked to sum to 100; kubectl and the cluster do that.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrafficTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(flatten)]
    pub destination: Destination,
    pub percent: u32,
}

/// Where a traffic target points. Only the name is recorded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    RevisionName(String),
    ConfigurationName(String),
}

pub fn new_route(name: &str, options: &[RouteOption]) -> Route {
    let mut route = Route {
        type_meta: TypeMeta::new(SERVING_API_VERSION, ROUTE_KIND),
        metadata: ObjectMeta::named(name),
        spec: RouteSpec::default(),
    };
    apply_all(&mut route.spec, options);
    route
}

pub fn with_traffic_to_revision(name: &str, revision: &str, percent: u32) -> RouteOption {
    with_traffic(
        "traffic-to-revision",
        name,
        Destination::RevisionName(revision.to_string()),
        percent,
    )
}

/// Send traffic to whatever revision the configuration currently considers
/// latest.
pub fn with_traffic_to_configuration(name: &str, configuration: &str, percent: u32) -> RouteOption {
    with_traffic(
        "traffic-to-configuration",
        name,
        Destination::ConfigurationName(configuration.to_string()),
        percent,
    )
}

fn with_traffic(
    label: &'static str,
    name: &str,
    destination: Destination,
    percent: u32,
) -> RouteOption {
    let target = TrafficTarget {
        name: name.to_string(),
        destination,
        percent,
    };
    Opt::new(label, move |spec: &mut RouteSpec| {
        spec.traffic.push(target.clone());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_route_has_tags() {
        let route = new_route("sudo", &[]);
        assert_eq!(route.metadata.name, "sudo");
        assert_eq!(route.type_meta.kind, "Route");
        assert_eq!(route.type_meta.api_version, "serving.knative.dev/v1alpha1");
        assert!(route.spec.traffic.is_empty());
    }

    #[test]
    fn traffic_targets_keep_order() {
        let route = new_route(
            "sudo",
            &[
                with_traffic_to_revision("name", "revision1", 80),
                with_traffic_to_configuration("", "config", 20),
            ],
        );
        assert_eq!(
            route.spec.traffic,
            vec![
                TrafficTarget {
                    name: "name".to_string(),
                    destination: Destination::RevisionName("revision1".to_string()),
                    percent: 80,
                },
                TrafficTarget {
                    name: String::new(),
                    destination: Destination::ConfigurationName("config".to_string()),
                    percent: 20,
                },
            ]
        );
    }

    #[test]
    fn percentages_are_not_validated() {
        let route = new_route(
            "r",
            &[
                with_traffic_to_revision("", "a", 90),
                with_traffic_to_revision("", "b", 90),
            ],
        );
        let total: u32 = route.spec.traffic.iter().map(|t| t.percent).sum();
        assert_eq!(total, 180);
    }
}
