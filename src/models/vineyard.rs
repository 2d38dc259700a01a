use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Vineyard {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub sensors_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Sensor de un viñedo. El backend serializa coordenadas y batería como texto.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Sensor {
    pub id: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub power_perc: Option<String>,
    #[serde(default)]
    pub magnitudes: Vec<Magnitude>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Magnitude {
    pub id: u64,
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metrics_url: Option<String>,
}
