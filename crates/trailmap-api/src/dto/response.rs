use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use trailmap_core::models::{LatLng, PlacedMarker, TrailPath, Walk, WalkImage};
use trailmap_geo::TrailExtent;

/// Share of the trail's height and width added around it when fitting the map
pub const MAP_PADDING: f64 = 0.2;

/// Bytes escaped when a name is used as one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn thumbnail_url(walk_id: &str, image_name: &str) -> String {
    format!(
        "/thumbnail/{}/{}",
        utf8_percent_encode(walk_id, PATH_SEGMENT),
        utf8_percent_encode(image_name, PATH_SEGMENT)
    )
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "trailmap-api",
        }
    }
}

/// One thumbnail marker of a walk, placed beside the trail
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub image_name: String,
    /// Where the photo was taken
    pub coordinates: LatLng,
    /// Where its thumbnail is drawn
    pub offset: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub thumbnail_url: String,
}

impl MarkerView {
    pub fn new(walk_id: &str, placed: PlacedMarker<WalkImage>) -> Self {
        let image = placed.marker.payload;
        Self {
            thumbnail_url: thumbnail_url(walk_id, &image.image_name),
            image_name: image.image_name,
            coordinates: placed.marker.coordinates,
            offset: placed.offset,
            notes: image.notes,
        }
    }
}

/// Everything the viewer needs to draw a walk
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkMarkersResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub bounds: Option<TrailExtent>,
    pub trail_length_meters: f64,
    pub trail_path: TrailPath,
    pub markers: Vec<MarkerView>,
}

impl WalkMarkersResponse {
    pub fn new(walk: Walk, placed: Vec<PlacedMarker<WalkImage>>) -> Self {
        let markers = placed.into_iter().map(|p| MarkerView::new(&walk.id, p)).collect();

        Self {
            bounds: trailmap_geo::trail_extent(&walk.trail_path, MAP_PADDING),
            trail_length_meters: trailmap_geo::trail_length_meters(&walk.trail_path),
            id: walk.id,
            title: walk.title,
            description: walk.description,
            cover_image: walk.cover_image,
            trail_path: walk.trail_path,
            markers,
        }
    }

    /// Trail line, thumbnail points and connectors from photo to thumbnail
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(1 + self.markers.len() * 2);

        let mut trail_props = JsonObject::new();
        trail_props.insert("kind".to_string(), JsonValue::from("trail"));
        trail_props.insert("title".to_string(), JsonValue::from(self.title.clone()));
        trail_props.insert("lengthMeters".to_string(), JsonValue::from(self.trail_length_meters));
        features.push(feature(
            Value::LineString(self.trail_path.points().iter().copied().map(position).collect()),
            trail_props,
        ));

        for marker in &self.markers {
            let mut props = JsonObject::new();
            props.insert("kind".to_string(), JsonValue::from("thumbnail"));
            props.insert("imageName".to_string(), JsonValue::from(marker.image_name.clone()));
            props.insert("thumbnailUrl".to_string(), JsonValue::from(marker.thumbnail_url.clone()));
            if let Some(notes) = &marker.notes {
                props.insert("notes".to_string(), JsonValue::from(notes.clone()));
            }
            features.push(feature(Value::Point(position(marker.offset)), props));

            let mut connector_props = JsonObject::new();
            connector_props.insert("kind".to_string(), JsonValue::from("connector"));
            connector_props.insert("imageName".to_string(), JsonValue::from(marker.image_name.clone()));
            features.push(feature(
                Value::LineString(vec![position(marker.coordinates), position(marker.offset)]),
                connector_props,
            ));
        }

        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }
    }
}

// GeoJSON positions are [lng, lat]
fn position(coord: LatLng) -> Vec<f64> {
    vec![coord.lng, coord.lat]
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        geometry: Some(Geometry::new(value)),
        properties: Some(properties),
        id: None,
        bbox: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmap_core::models::MarkerPoint;

    fn walk() -> Walk {
        Walk {
            id: "coast".to_string(),
            title: "Coast Path".to_string(),
            description: None,
            cover_image: Some("a.jpg".to_string()),
            trail_path: vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)].into(),
            images: vec![],
        }
    }

    fn placed() -> PlacedMarker<WalkImage> {
        let image = WalkImage {
            image_name: "a.jpg".to_string(),
            coordinates: LatLng::new(0.0001, 0.5),
            notes: Some("Lighthouse".to_string()),
        };
        PlacedMarker {
            offset: LatLng::new(0.0006, 0.5),
            marker: MarkerPoint::new(image.coordinates, image),
        }
    }

    #[test]
    fn test_marker_response_json() {
        let response = WalkMarkersResponse::new(walk(), vec![placed()]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["title"], "Coast Path");
        assert_eq!(json["markers"][0]["imageName"], "a.jpg");
        assert_eq!(json["markers"][0]["offset"], serde_json::json!([0.0006, 0.5]));
        assert_eq!(json["markers"][0]["thumbnailUrl"], "/thumbnail/coast/a.jpg");
        assert!(json["bounds"]["north"].is_number());
        assert!(json["trailLengthMeters"].as_f64().unwrap() > 100_000.0);
    }

    #[test]
    fn test_thumbnail_url_escapes_name() {
        assert_eq!(thumbnail_url("coast", "a.jpg"), "/thumbnail/coast/a.jpg");
        assert_eq!(
            thumbnail_url("coast walk", "pier #2?50%.jpg"),
            "/thumbnail/coast%20walk/pier%20%232%3F50%25.jpg"
        );
    }

    #[test]
    fn test_geojson_layout() {
        let collection = WalkMarkersResponse::new(walk(), vec![placed()]).to_geojson();
        assert_eq!(collection.features.len(), 3);

        let point = collection.features[1].geometry.as_ref().unwrap();
        assert_eq!(point.value, Value::Point(vec![0.5, 0.0006]));

        let kinds: Vec<_> = collection
            .features
            .iter()
            .map(|f| f.property("kind").and_then(|k| k.as_str()).unwrap().to_string())
            .collect();
        assert_eq!(kinds, ["trail", "thumbnail", "connector"]);
    }
}
