use ams_core::Object;

#[derive(Debug, Clone, Object)]
pub struct ReservedResource {
    count: Option<i64>,
    resource_name: Option<String>,
    resources: Option<Vec<String>>,
}

fn main() {
    let resource = ReservedResource::builder()
        .count(2)
        .resource_name("compute.node")
        .resources(["m5.xlarge"])
        .build()
        .unwrap();
    assert_eq!(resource.count(), 2);
    assert_eq!(resource.resources().len(), 1);
    assert_eq!(
        resource.to_json().unwrap(),
        r#"{"count":2,"resource_name":"compute.node","resources":["m5.xlarge"]}"#
    );
}
