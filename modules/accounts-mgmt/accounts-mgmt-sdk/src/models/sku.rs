use ams_core::Object;

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "Resource")]
pub struct Resource {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    byoc: Option<String>,
    sku: Option<String>,
    allowed: Option<i64>,
    availability_zone_type: Option<String>,
    resource_name: Option<String>,
    resource_type: Option<String>,
}

/// Stock keeping unit: a sellable bundle of resources.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "SKU")]
pub struct Sku {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    byoc: Option<String>,
    availability_zone_type: Option<String>,
    resource_name: Option<String>,
    resource_type: Option<String>,
    resources: Option<Vec<Resource>>,
}

/// Quota granted per unit of a SKU.
#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "SkuRule")]
pub struct SkuRule {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    allowed: Option<i64>,
    quota_id: Option<String>,
    sku: Option<String>,
}
