use serde::Deserialize;

// ad
//  ├── id
//  ├── slug
//  ├── url
//  ├── title
//  ├── description
//  ├── advertiserType
//  ├── createdAt / modifiedAt
//  ├── location
//  │    ├── coordinates
//  │    │    ├── latitude
//  │    │    └── longitude
//  │    └── address
//  │         ├── street   ── name
//  │         ├── district ── name
//  │         └── city     ── name
//  ├── characteristics[]
//  │    ├── key
//  │    ├── value
//  │    ├── label
//  │    └── localizedValue
//  └── features[]

/// One entry of the search-results payload. Only the fields the
/// discovery pass needs.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: Option<i64>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Ad {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,

    pub location: Option<AdLocation>,
    pub characteristics: Option<Vec<Characteristic>>,
    pub features: Option<Vec<String>>,

    #[serde(rename = "advertiserType")]
    pub advertiser_type: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "modifiedAt")]
    pub modified_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdLocation {
    pub coordinates: Option<Coordinates>,
    pub address: Option<AdAddress>,
}

#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AdAddress {
    pub street: Option<NamedPart>,
    pub district: Option<NamedPart>,
    pub city: Option<NamedPart>,
}

#[derive(Debug, Deserialize)]
pub struct NamedPart {
    pub name: Option<String>,
}

/// Portal characteristics are stringly typed; `value` carries the raw
/// number ("3500"), `localizedValue` the display form ("3 500 zł").
#[derive(Debug, Deserialize)]
pub struct Characteristic {
    pub key: Option<String>,
    pub value: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "localizedValue")]
    pub localized_value: Option<String>,
}
