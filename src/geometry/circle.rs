use std::f64::consts::PI;

#[cfg(any(test, feature = "random"))]
use rand::Rng;
#[cfg(any(test, feature = "random"))]
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};
use tracing::{debug, warn};

use crate::{
    error::Error,
    geojson::{GeoJson, ToGeoJson, format},
    geometry::{
        constants::{
            CIRCLE_SNAP_THRESHOLD, DEFAULT_CIRCLE_SEGMENTS, EARTH_RADIUS, MIN_CIRCLE_SEGMENTS,
        },
        point::Point,
        polygon::Polygon,
    },
};

/// 円を多角形に変換する際の設定。
///
/// 分割数を大きくするほど元の円に近くなるが、頂点数も増える。
/// 設定ファイルなどから読み込めるよう `Deserialize` を実装しており、
/// 省略された項目には既定値が使われる。
///
/// ```
/// # use geodoc::CircleOptions;
/// let options: CircleOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(options.segments(), 16);
///
/// let options = CircleOptions::new().with_segments(64);
/// assert_eq!(options.segments(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleOptions {
    segments: usize,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl CircleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分割数を設定する。
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn segments(&self) -> usize {
        self.segments
    }
}

/// 中心点と半径（メートル）で表される円。
///
/// 半径の範囲は検証しない。半径が `0` 以下の円は GeoJSON やコンパクト表現では
/// 「値なし」として扱われる。中心が `(0, 0)` の円も通常の円として出力される。
/// 未設定の円は `Option<Circle>` の `None` で表す。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// 中心の経度・緯度（度）と半径（メートル）から [`Circle`] を構築する。
    ///
    /// # エラー
    /// 中心座標が範囲外の場合は [`Point::new`] と同じエラーを返す。
    pub fn new(longitude: f64, latitude: f64, radius: f64) -> Result<Self, Error> {
        Ok(Self::from_center(Point::new(longitude, latitude)?, radius))
    }

    /// 既存の中心点から [`Circle`] を構築する。
    pub fn from_center(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn as_center(&self) -> Point {
        self.center
    }

    pub fn as_radius(&self) -> f64 {
        self.radius
    }

    /// 既定の分割数（16）で円を多角形に近似する。
    ///
    /// ```
    /// # use geodoc::Circle;
    /// let circle = Circle::new(37.57351, 55.715084, 500.0).unwrap();
    /// let polygon = circle.to_polygon().unwrap();
    ///
    /// let ring = polygon.exterior().unwrap();
    /// assert_eq!(ring.len(), 17);
    /// assert_eq!(ring.first(), ring.last());
    /// ```
    pub fn to_polygon(&self) -> Result<Polygon, Error> {
        self.to_polygon_with(&CircleOptions::default())
    }

    /// 指定された分割数 `N` で円を多角形に近似する。
    ///
    /// 半径を子午線方向の角度 `rLat` に換算し、中心の緯度での経線の収束を
    /// `rLng = rLat / cos(緯度)` で補正する。`θ = i·2π/N`（`i = 0..=N`）ごとに
    /// 単位円上の `(cos θ, sin θ)` を求め、絶対値が [`CIRCLE_SNAP_THRESHOLD`] 未満の
    /// 成分は `0` に丸めたうえで、中心を `(sin θ·rLng, cos θ·rLat)` だけずらした点を並べる。
    /// 最初と最後の点はどちらも `θ = 0` に相当するため、リングは `N + 1` 点で閉じる。
    ///
    /// # エラー
    /// - 分割数が3未満の場合は [`Error::TooFewSegments`] を返す。
    /// - 極や日付変更線の近くで頂点が座標の範囲外に出た場合は
    ///   [`Error::InvalidLongitude`] または [`Error::InvalidLatitude`] を返す。
    pub fn to_polygon_with(&self, options: &CircleOptions) -> Result<Polygon, Error> {
        let segments = options.segments();
        if segments < MIN_CIRCLE_SEGMENTS {
            return Err(Error::TooFewSegments { segments });
        }

        let lon = self.center.as_longitude();
        let lat = self.center.as_latitude();
        let r_lat = self.radius / EARTH_RADIUS * 180.0 / PI;
        let r_lng = r_lat / lat.to_radians().cos();
        let step = 2.0 * PI / segments as f64;

        debug!(segments, r_lat, r_lng, "approximating circle with polygon");

        let points = (0..=segments)
            .map(|i| {
                let theta = step * i as f64;
                let x = snap(theta.cos());
                let y = snap(theta.sin());
                Point::new(lon + y * r_lng, lat + x * r_lat)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Polygon::new(points)
    }

    /// コンパクト表現 `{"center":[経度,緯度],"radius":半径}` の JSON 文字列を返す。
    ///
    /// 座標は小数点以下6桁、半径は整数に丸められる。半径が `0` 以下なら `null` になる。
    ///
    /// ```
    /// # use geodoc::Circle;
    /// let circle = Circle::new(37.57351, 55.715084, 500.639843).unwrap();
    /// assert_eq!(
    ///     circle.to_compact_json().unwrap(),
    ///     r#"{"center":[37.573510,55.715084],"radius":501}"#
    /// );
    ///
    /// let empty = Circle::new(37.57351, 55.715084, 0.0).unwrap();
    /// assert_eq!(empty.to_compact_json().unwrap(), "null");
    /// ```
    pub fn to_compact_json(&self) -> Result<String, Error> {
        format::to_string(self)
    }

    /// 半径が正の有限値でなければ `false` を返す。
    fn has_area(&self) -> bool {
        self.radius > 0.0 && self.radius.is_finite()
    }

    /// 外部の乱数生成器を使用して、半径が `radius_range` 内のランダムな [`Circle`] を生成する。
    #[cfg(any(test, feature = "random"))]
    pub fn random_using<R: Rng>(rng: &mut R, radius_range: RangeInclusive<f64>) -> Self {
        let center = Point::random_using(rng);
        let radius = rng.random_range(radius_range);
        Self { center, radius }
    }
}

fn snap(value: f64) -> f64 {
    if value.abs() < CIRCLE_SNAP_THRESHOLD {
        0.0
    } else {
        value
    }
}

impl Serialize for Circle {
    /// コンパクト表現として出力する。
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.has_area() {
            return serializer.serialize_none();
        }

        let mut state = serializer.serialize_struct("Circle", 2)?;
        state.serialize_field("center", &self.center)?;
        state.serialize_field("radius", &(self.radius.round() as i64))?;
        state.end()
    }
}

impl ToGeoJson for Circle {
    /// GeoJSON は円をサポートしないため、既定の分割数の多角形として出力する。
    ///
    /// 半径が `0` 以下、または多角形を構築できない場合は `None` を返す。
    fn to_geojson(&self) -> Option<GeoJson> {
        if !self.has_area() {
            return None;
        }

        match self.to_polygon() {
            Ok(polygon) => Some(GeoJson::polygon(&polygon)),
            Err(error) => {
                warn!(
                    %error,
                    center = %self.center,
                    radius = self.radius,
                    "circle dropped from GeoJSON"
                );
                None
            }
        }
    }
}
