//! 図形を GeoJSON 互換の `{type, coordinates}` 形式に射影するための型。
//!
//! ジオメトリ本体は `geojson` クレートの [`Geometry`] で保持する。
//! 射影は呼び出しのたびに計算し直され、キャッシュや変更はされない。
//! 値が存在しない図形は `None` として表され、シリアライズすると `null` になる。
//! これにより、任意の地理フィールドをドキュメントから省略できる。

use ::geojson::{Geometry, PolygonType, Position, Value};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    error::Error,
    geometry::{point::Point, polygon::Polygon},
};

/// 固定小数点での JSON 出力。
pub mod format;

#[cfg(test)]
mod tests;

/// 扱うことのできる GeoJSON のジオメトリ種別。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    Polygon,
}

/// GeoJSON のジオメトリオブジェクト `{"type": ..., "coordinates": ...}`。
///
/// 中身は `Point` または `Polygon` の [`Geometry`] に限られ、座標はすべて有効な範囲にある。
/// 読み込み時にも同じ条件で検証され、閉じていないリングは閉じられる。
/// `bbox` や独自のメンバーは保持しない。
///
/// ```
/// # use geodoc::{GeoJson, GeometryType, Point};
/// let geojson = GeoJson::point(Point::new(37.57351, 55.715084).unwrap());
/// assert_eq!(geojson.as_type(), GeometryType::Point);
/// assert_eq!(
///     geodoc::to_string(&geojson).unwrap(),
///     r#"{"type":"Point","coordinates":[37.573510,55.715084]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Geometry")]
pub struct GeoJson {
    kind: GeometryType,
    geometry: Geometry,
}

impl GeoJson {
    pub fn point(point: Point) -> Self {
        Self {
            kind: GeometryType::Point,
            geometry: Geometry::new(Value::Point(position(&point))),
        }
    }

    pub fn polygon(polygon: &Polygon) -> Self {
        let rings: PolygonType = polygon
            .rings()
            .iter()
            .map(|ring| ring.iter().map(position).collect())
            .collect();

        Self {
            kind: GeometryType::Polygon,
            geometry: Geometry::new(Value::Polygon(rings)),
        }
    }

    pub fn as_type(&self) -> GeometryType {
        self.kind
    }

    pub fn as_geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn into_geometry(self) -> Geometry {
        self.geometry
    }

    /// 点のジオメトリであれば [`Point`] として取り出す。
    pub fn to_point(&self) -> Option<Point> {
        match &self.geometry.value {
            Value::Point(coordinates) => point_from_position(coordinates).ok(),
            _ => None,
        }
    }

    /// 多角形のジオメトリであれば [`Polygon`] として取り出す。
    pub fn to_polygon(&self) -> Option<Polygon> {
        match &self.geometry.value {
            Value::Polygon(rings) => polygon_from_rings(rings).ok(),
            _ => None,
        }
    }
}

fn position(point: &Point) -> Position {
    vec![point.as_longitude(), point.as_latitude()]
}

fn point_from_position(position: &[f64]) -> Result<Point, Error> {
    match *position {
        [longitude, latitude] => Point::new(longitude, latitude),
        _ => Err(Error::InvalidPosition {
            len: position.len(),
        }),
    }
}

fn polygon_from_rings(rings: &[Vec<Position>]) -> Result<Polygon, Error> {
    let rings = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|coordinates| point_from_position(coordinates))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Polygon::try_from(rings)
}

impl TryFrom<Geometry> for GeoJson {
    type Error = Error;

    /// 座標を検証し、正規化したジオメトリを構築し直す。
    fn try_from(geometry: Geometry) -> Result<Self, Self::Error> {
        match &geometry.value {
            Value::Point(coordinates) => Ok(Self::point(point_from_position(coordinates)?)),
            Value::Polygon(rings) => Ok(Self::polygon(&polygon_from_rings(rings)?)),
            other => Err(Error::UnsupportedGeometry {
                found: other.type_name(),
            }),
        }
    }
}

impl From<GeoJson> for Geometry {
    fn from(value: GeoJson) -> Self {
        value.geometry
    }
}

impl Serialize for GeoJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.geometry.serialize(serializer)
    }
}

/// 図形を GeoJSON に射影する。
///
/// 値が存在しない（未設定、空、半径が0以下など）場合は `None` を返す。
pub trait ToGeoJson {
    fn to_geojson(&self) -> Option<GeoJson>;
}

impl ToGeoJson for Point {
    fn to_geojson(&self) -> Option<GeoJson> {
        Some(GeoJson::point(*self))
    }
}

impl<T: ToGeoJson> ToGeoJson for Option<T> {
    /// `None` は常に `None` として射影される。
    ///
    /// ```
    /// # use geodoc::{Point, ToGeoJson};
    /// let unset: Option<Point> = None;
    /// assert!(unset.to_geojson().is_none());
    /// assert_eq!(geodoc::to_string(&unset.to_geojson()).unwrap(), "null");
    /// ```
    fn to_geojson(&self) -> Option<GeoJson> {
        self.as_ref().and_then(ToGeoJson::to_geojson)
    }
}
