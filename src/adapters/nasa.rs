use crate::adapters::{ensure_success, http_client, parse_url};
use crate::config::settings::NasaConfig;
use crate::domain::gateway::{SpaceDataRequest, SpaceDataResponse};
use crate::domain::ports::SpaceDataSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub const SPACE_DATA_SOURCE: &str = "NASA Open Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NasaEndpoint {
    Apod,
    MarsPhotos,
    Exoplanets,
    EarthImagery,
}

impl NasaEndpoint {
    /// 無法辨識的端點一律退回 APOD
    pub fn parse(name: &str) -> Self {
        match name {
            "mars-photos" => NasaEndpoint::MarsPhotos,
            "exoplanets" => NasaEndpoint::Exoplanets,
            "earth-imagery" => NasaEndpoint::EarthImagery,
            _ => NasaEndpoint::Apod,
        }
    }
}

pub struct NasaClient {
    client: Client,
    config: NasaConfig,
}

impl NasaClient {
    pub fn new(config: NasaConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            config,
        })
    }

    pub fn build_url(&self, endpoint: NasaEndpoint, limit: u32) -> Result<url::Url> {
        let base = self.config.api_base.trim_end_matches('/');
        let key = self.config.api_key.as_str();
        let limit = limit.to_string();

        match endpoint {
            NasaEndpoint::Apod => parse_url(
                &format!("{}/planetary/apod", base),
                &[("api_key", key), ("count", limit.as_str())],
            ),
            NasaEndpoint::MarsPhotos => parse_url(
                &format!("{}/mars-photos/api/v1/rovers/curiosity/photos", base),
                &[("sol", "1000"), ("api_key", key), ("page", "1")],
            ),
            NasaEndpoint::Exoplanets => {
                let query = format!(
                    "select pl_name,pl_bmasse,pl_rade,st_dist from ps where pl_bmasse is not null and rownum<={}",
                    limit
                );
                parse_url(
                    &self.config.exoplanet_url,
                    &[("query", query.as_str()), ("format", "json")],
                )
            }
            NasaEndpoint::EarthImagery => parse_url(
                &format!("{}/planetary/earth/imagery", base),
                &[
                    ("lon", "-95.33"),
                    ("lat", "29.78"),
                    ("dim", "0.15"),
                    ("api_key", key),
                ],
            ),
        }
    }
}

/// 缺值、null、0、空字串都顯示為 "Unknown"
fn or_unknown(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => json!("Unknown"),
        Some(Value::String(s)) if s.is_empty() => json!("Unknown"),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => json!("Unknown"),
        Some(other) => other.clone(),
    }
}

pub fn normalize_payload(endpoint: NasaEndpoint, data: Value, limit: u32) -> Value {
    match endpoint {
        NasaEndpoint::Exoplanets => match data {
            Value::Array(planets) => Value::Array(
                planets
                    .iter()
                    .map(|planet| {
                        json!({
                            "name": or_unknown(planet.get("pl_name")),
                            "mass": or_unknown(planet.get("pl_bmasse")),
                            "radius": or_unknown(planet.get("pl_rade")),
                            "distance": or_unknown(planet.get("st_dist")),
                            "type": "exoplanet",
                            "source": "NASA Exoplanet Archive",
                        })
                    })
                    .collect(),
            ),
            other => other,
        },
        NasaEndpoint::MarsPhotos => match data.get("photos").and_then(Value::as_array) {
            Some(photos) => Value::Array(
                photos
                    .iter()
                    .take(limit as usize)
                    .map(|photo| {
                        json!({
                            "id": photo.get("id").cloned().unwrap_or(Value::Null),
                            "img_src": photo.get("img_src").cloned().unwrap_or(Value::Null),
                            "earth_date": photo.get("earth_date").cloned().unwrap_or(Value::Null),
                            "rover": photo.pointer("/rover/name").cloned().unwrap_or(Value::Null),
                            "camera": photo.pointer("/camera/full_name").cloned().unwrap_or(Value::Null),
                            "type": "mars-photo",
                            "source": "NASA Mars Rover Photos",
                        })
                    })
                    .collect(),
            ),
            None => data,
        },
        NasaEndpoint::Apod | NasaEndpoint::EarthImagery => data,
    }
}

#[async_trait]
impl SpaceDataSource for NasaClient {
    async fn fetch(&self, request: &SpaceDataRequest) -> Result<SpaceDataResponse> {
        tracing::info!(
            "🛰️ NASA API request: endpoint={}, limit={}, search='{}'",
            request.endpoint,
            request.limit,
            request.search
        );

        let endpoint = NasaEndpoint::parse(&request.endpoint);
        let url = self.build_url(endpoint, request.limit)?;

        let response = self.client.get(url).send().await?;
        let response = ensure_success("NASA API", response).await?;
        let data: Value = response.json().await?;

        let data = normalize_payload(endpoint, data, request.limit);
        let count = data.as_array().map(Vec::len).unwrap_or(1);
        tracing::info!("NASA data received: {} items", count);

        Ok(SpaceDataResponse {
            data,
            endpoint: request.endpoint.clone(),
            count,
            source: SPACE_DATA_SOURCE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_endpoint_falls_back_to_apod() {
        assert_eq!(NasaEndpoint::parse("planetary/apod"), NasaEndpoint::Apod);
        assert_eq!(NasaEndpoint::parse("nebulae"), NasaEndpoint::Apod);
        assert_eq!(NasaEndpoint::parse("exoplanets"), NasaEndpoint::Exoplanets);
    }

    #[test]
    fn test_build_apod_url() {
        let client = NasaClient::new(NasaConfig::default()).unwrap();
        let url = client.build_url(NasaEndpoint::Apod, 12).unwrap();

        assert_eq!(url.path(), "/planetary/apod");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("api_key".to_string(), "DEMO_KEY".to_string())));
        assert!(pairs.contains(&("count".to_string(), "12".to_string())));
    }

    #[test]
    fn test_normalize_exoplanets_defaults_unknown() {
        let raw = json!([
            {"pl_name": "Kepler-22 b", "pl_bmasse": 9.1, "pl_rade": 2.1, "st_dist": 190.0},
            {"pl_name": null, "pl_bmasse": 0, "pl_rade": "", "st_dist": null}
        ]);

        let data = normalize_payload(NasaEndpoint::Exoplanets, raw, 10);

        assert_eq!(data[0]["name"], "Kepler-22 b");
        assert_eq!(data[0]["mass"], 9.1);
        assert_eq!(data[0]["type"], "exoplanet");
        assert_eq!(data[1]["name"], "Unknown");
        assert_eq!(data[1]["mass"], "Unknown");
        assert_eq!(data[1]["radius"], "Unknown");
        assert_eq!(data[1]["distance"], "Unknown");
    }

    #[test]
    fn test_normalize_mars_photos_truncates_to_limit() {
        let photo = json!({
            "id": 102693,
            "img_src": "http://mars.jpl.nasa.gov/img.jpg",
            "earth_date": "2015-05-30",
            "rover": {"name": "Curiosity"},
            "camera": {"full_name": "Front Hazard Avoidance Camera"}
        });
        let raw = json!({"photos": [photo.clone(), photo.clone(), photo]});

        let data = normalize_payload(NasaEndpoint::MarsPhotos, raw, 2);

        assert_eq!(data.as_array().unwrap().len(), 2);
        assert_eq!(data[0]["rover"], "Curiosity");
        assert_eq!(data[0]["camera"], "Front Hazard Avoidance Camera");
        assert_eq!(data[0]["source"], "NASA Mars Rover Photos");
    }
}
