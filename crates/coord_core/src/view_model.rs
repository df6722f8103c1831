use crate::controller::ConversionState;
use crate::response::{ConvertSuccess, LinkValue};

/// Map services shown in the navigation grid, in display order.
pub const MAP_LINK_ORDER: [&str; 6] = [
    "Mapy.cz",
    "Google Maps",
    "Apple Maps",
    "Waze",
    "HERE WeGo",
    "OpenStreetMap",
];

/// Coordinate codes shown in the codes section, in display order.
pub const CODE_ORDER: [&str; 3] = ["MGRS", "Maidenhead", "UTM"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Present only when the success grid may be shown.
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub lat: f64,
    pub lng: f64,
    pub lat_lng: String,
    pub map_links: Vec<RowView>,
    pub codes: Vec<RowView>,
    pub extra_links: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub label: String,
    pub value: Option<String>,
    /// Only http(s) targets are linkable.
    pub href: Option<String>,
}

impl AppViewModel {
    pub(crate) fn build(input: &str, state: &ConversionState, dirty: bool) -> Self {
        let result = match (&state.data, state.loading, &state.error) {
            (Some(data), false, None) => Some(ResultView::from_success(data)),
            _ => None,
        };
        Self {
            input: input.to_string(),
            loading: state.loading,
            error: state.error.clone(),
            result,
            dirty,
        }
    }
}

impl ResultView {
    pub fn from_success(data: &ConvertSuccess) -> Self {
        let map_links = MAP_LINK_ORDER
            .iter()
            .filter_map(|name| data.links.get(*name).map(|link| link_row(name, link)))
            .collect();

        let codes = CODE_ORDER
            .iter()
            .map(|name| match data.links.get(*name) {
                Some(link) => link_row(name, link),
                None => RowView {
                    label: name.to_string(),
                    value: data.codes.get(*name).cloned(),
                    href: None,
                },
            })
            .collect();

        let extra_links = data
            .links
            .iter()
            .filter(|(name, _)| {
                !MAP_LINK_ORDER.contains(&name.as_str()) && !CODE_ORDER.contains(&name.as_str())
            })
            .map(|(name, link)| link_row(name, link))
            .collect();

        Self {
            lat: data.lat,
            lng: data.lng,
            lat_lng: format!("{:.14}, {:.14}", data.lat, data.lng),
            map_links,
            codes,
            extra_links,
        }
    }
}

fn link_row(label: &str, link: &LinkValue) -> RowView {
    RowView {
        label: label.to_string(),
        value: Some(link.display().to_string()),
        href: is_web_url(link.url()).then(|| link.url().to_string()),
    }
}

fn is_web_url(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
