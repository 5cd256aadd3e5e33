use ams_core::Object;

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "FeatureToggle")]
pub struct FeatureToggle {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    enabled: Option<bool>,
}
