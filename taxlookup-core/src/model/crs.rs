use geo::{Coord, MapCoords, MultiPolygon};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// spherical radius used by EPSG:3857, in meters.
const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// coordinate reference systems a district dataset may be published in.
/// geometries are always reprojected to [`Crs::Wgs84`] before indexing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    /// EPSG:4326, longitude/latitude in degrees
    Wgs84,
    /// EPSG:3857, the CDTFA publication projection. assumed when a dataset
    /// does not declare one.
    #[default]
    WebMercator,
}

impl Crs {
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::WebMercator => 3857,
        }
    }

    /// detects the CRS declared by the WKT text of an ESRI `.prj` sidecar file.
    /// geographic NAD83 is read as WGS84, the two differ by under a metre.
    /// returns `None` for anything else other than (pseudo-)Mercator.
    pub fn from_prj(wkt: &str) -> Option<Crs> {
        let upper = wkt.to_uppercase();
        if upper.contains("PROJCS[") {
            let mercator = upper.contains("MERCATOR") && !upper.contains("TRANSVERSE");
            if mercator || upper.contains("3857") {
                Some(Crs::WebMercator)
            } else {
                None
            }
        } else if upper.contains("GEOGCS[")
            && ["WGS_1984", "WGS 84", "WGS84", "NORTH_AMERICAN_1983", "NAD83", "NAD 83"]
                .iter()
                .any(|datum| upper.contains(datum))
        {
            Some(Crs::Wgs84)
        } else {
            None
        }
    }

    /// reprojects a geometry in this CRS to WGS84 longitude/latitude.
    pub fn to_wgs84(&self, geometry: MultiPolygon<f64>) -> MultiPolygon<f64> {
        match self {
            Crs::Wgs84 => geometry,
            Crs::WebMercator => geometry.map_coords(web_mercator_to_wgs84),
        }
    }
}

/// inverse spherical mercator projection.
pub fn web_mercator_to_wgs84(coord: Coord<f64>) -> Coord<f64> {
    let lon = (coord.x / WEB_MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (coord.y / WEB_MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
        .to_degrees();
    Coord { x: lon, y: lat }
}

/// forward spherical mercator projection.
pub fn wgs84_to_web_mercator(coord: Coord<f64>) -> Coord<f64> {
    let x = coord.x.to_radians() * WEB_MERCATOR_RADIUS;
    let y = (std::f64::consts::FRAC_PI_4 + coord.y.to_radians() / 2.0)
        .tan()
        .ln()
        * WEB_MERCATOR_RADIUS;
    Coord { x, y }
}

impl FromStr for Crs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let code = normalized.strip_prefix("epsg:").unwrap_or(&normalized);
        match code {
            "4326" | "wgs84" | "wgs_84" | "crs84" => Ok(Crs::Wgs84),
            "3857" | "900913" | "102100" | "web_mercator" | "webmercator" => Ok(Crs::WebMercator),
            _ => Err(format!(
                "unsupported coordinate reference system '{s}', expected epsg:4326 or epsg:3857"
            )),
        }
    }
}

impl TryFrom<String> for Crs {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Crs::from_str(&value)
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.to_string()
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "epsg:{}", self.epsg())
    }
}
