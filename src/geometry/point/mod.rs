use std::fmt;

#[cfg(any(test))]
use proptest::prelude::*;
#[cfg(any(test, feature = "random"))]
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    geometry::constants::{
        COORDINATE_PRECISION, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
    },
};

/// 球面上の距離・方位・移動の計算。
mod spherical;


/// 経度・緯度（度）で表される地理座標。
///
/// 並び順は平面上の `x`, `y` に合わせて経度→緯度とする。ドキュメントストアの
/// 地理インデックスが受け付ける形式も同じ順序である。
///
/// 各フィールドをプライベートにすることで、生成時の範囲検証を常に適用する。
/// 「値が未設定」であることは `(0, 0)` ではなく `Option<Point>` の `None` で表す。
///
/// ```
/// pub struct Point {
///     longitude: f64,
///     latitude: f64,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Point {
    longitude: f64,
    latitude: f64,
}

impl fmt::Display for Point {
    /// `Point` を `[経度,緯度]` 形式で表示する。小数点以下は6桁に固定される。
    ///
    /// ```
    /// # use geodoc::Point;
    /// let point = Point::new(37.57351, 55.715084).unwrap();
    /// assert_eq!(point.to_string(), "[37.573510,55.715084]");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.*},{:.*}]",
            COORDINATE_PRECISION, self.longitude, COORDINATE_PRECISION, self.latitude
        )
    }
}

impl Point {
    /// 経度・緯度から [`Point`] を構築する。
    ///
    /// # パラメータ
    /// * `longitude` — 経度（度）-180.0..=180.0
    /// * `latitude` — 緯度（度）-90.0..=90.0
    ///
    /// # バリデーション
    /// - `longitude` が範囲外（`NaN` を含む）の場合、[`Error::InvalidLongitude`] を返す。
    /// - `latitude` が範囲外（`NaN` を含む）の場合、[`Error::InvalidLatitude`] を返す。
    ///
    /// 経度の検証が先に行われる。
    ///
    /// ```
    /// # use geodoc::{Error, Point};
    /// let point = Point::new(37.57351, 55.715084).unwrap();
    /// assert_eq!(point.as_longitude(), 37.57351);
    /// assert_eq!(point.as_latitude(), 55.715084);
    ///
    /// assert!(matches!(
    ///     Point::new(180.5, 0.0),
    ///     Err(Error::InvalidLongitude { .. })
    /// ));
    /// assert!(matches!(
    ///     Point::new(0.0, -90.5),
    ///     Err(Error::InvalidLatitude { .. })
    /// ));
    /// ```
    pub fn new(longitude: f64, latitude: f64) -> Result<Point, Error> {
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(Error::InvalidLongitude { longitude });
        }

        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(Error::InvalidLatitude { latitude });
        }

        Ok(Point {
            longitude,
            latitude,
        })
    }

    /// 経度（度）を返す。
    pub fn as_longitude(&self) -> f64 {
        self.longitude
    }

    /// 緯度（度）を返す。
    pub fn as_latitude(&self) -> f64 {
        self.latitude
    }

    /// 経度・緯度がともに `0` であれば `true` を返す。
    ///
    /// 原点 `(0, 0)` も正当な座標として扱われるため、未設定かどうかの判定には
    /// `Option<Point>` を使うこと。
    ///
    /// ```
    /// # use geodoc::Point;
    /// assert!(Point::new(0.0, 0.0).unwrap().is_zero());
    /// assert!(!Point::new(0.0, 1.0).unwrap().is_zero());
    /// ```
    pub fn is_zero(&self) -> bool {
        self.longitude == 0.0 && self.latitude == 0.0
    }

    /// 検証を行わずに [`Point`] を構築する。
    ///
    /// 呼び出し側は値が有効範囲内であることを保証しなければならない。
    pub(crate) fn new_unchecked(longitude: f64, latitude: f64) -> Point {
        Point {
            longitude,
            latitude,
        }
    }

    /// 地球全体からランダムに [`Point`] を生成する。
    #[cfg(any(test, feature = "random"))]
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::random_using(&mut rng)
    }

    /// 外部の乱数生成器を使用してランダムな [`Point`] を生成する。
    #[cfg(any(test, feature = "random"))]
    pub fn random_using<R: Rng>(rng: &mut R) -> Self {
        let longitude = rng.random_range(MIN_LONGITUDE..=MAX_LONGITUDE);
        let latitude = rng.random_range(MIN_LATITUDE..=MAX_LATITUDE);
        Point {
            longitude,
            latitude,
        }
    }

    #[cfg(any(test))]
    pub fn arb() -> impl Strategy<Value = Self> {
        Self::arb_within(MIN_LATITUDE..=MAX_LATITUDE)
    }

    /// 緯度の範囲を絞ったランダムな [`Point`] の Strategy。
    #[cfg(any(test))]
    pub fn arb_within(
        latitude_range: std::ops::RangeInclusive<f64>,
    ) -> impl Strategy<Value = Self> {
        (MIN_LONGITUDE..=MAX_LONGITUDE, latitude_range)
            .prop_map(|(longitude, latitude)| Point::new(longitude, latitude).unwrap())
    }
}

impl TryFrom<[f64; 2]> for Point {
    type Error = Error;

    /// `[経度, 緯度]` の配列から変換する。
    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Point::new(value[0], value[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(value: Point) -> Self {
        [value.longitude, value.latitude]
    }
}
