mod response;

pub use response::{HealthResponse, MarkerView, WalkMarkersResponse};
