/// 発生し得るすべてのエラーを`enum` 型として定義・集約。
mod error;

/// 地理座標と図形。
mod geometry;

/// GeoJSON 形式への射影とテキスト出力。
mod geojson;

pub use error::Error;
pub use crate::geojson::{
    GeoJson, GeometryType, ToGeoJson,
    format::{FixedFormatter, to_string, to_string_pretty, to_writer},
};
pub use geometry::{
    circle::{Circle, CircleOptions},
    constants,
    point::Point,
    polygon::{Exclude, Polygon},
};
