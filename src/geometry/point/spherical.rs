use std::f64::consts::PI;

use crate::{
    error::Error,
    geometry::{
        constants::{EARTH_RADIUS, MAX_LATITUDE, MIN_LATITUDE},
        point::Point,
    },
};

impl Point {
    /// 2点間の大円距離（メートル）をハーバーサイン公式で求める。
    ///
    /// 地球は半径 [`EARTH_RADIUS`] の球として扱う。
    ///
    /// ```
    /// # use geodoc::Point;
    /// let a = Point::new(37.57351, 55.715084).unwrap();
    /// assert_eq!(a.distance(&a), 0.0);
    ///
    /// // 赤道上の経度1度はおよそ111km
    /// let b = Point::new(0.0, 0.0).unwrap();
    /// let c = Point::new(1.0, 0.0).unwrap();
    /// assert!((b.distance(&c) - 111_319.49).abs() < 0.01);
    /// ```
    pub fn distance(&self, other: &Point) -> f64 {
        let d_lon = (other.as_longitude() - self.as_longitude()).to_radians();
        let d_lat = (other.as_latitude() - self.as_latitude()).to_radians();
        let lat1 = self.as_latitude().to_radians();
        let lat2 = other.as_latitude().to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();

        EARTH_RADIUS * 2.0 * a.sqrt().asin()
    }

    /// `other` へ向かう初期方位角（度）を返す。
    ///
    /// 北を 0、東を 90 とし、値は -180..=180 の範囲になる。
    ///
    /// ```
    /// # use geodoc::Point;
    /// let origin = Point::new(0.0, 0.0).unwrap();
    /// let east = Point::new(1.0, 0.0).unwrap();
    /// let west = Point::new(-1.0, 0.0).unwrap();
    /// assert!((origin.bearing_to(&east) - 90.0).abs() < 1e-9);
    /// assert!((origin.bearing_to(&west) + 90.0).abs() < 1e-9);
    /// ```
    pub fn bearing_to(&self, other: &Point) -> f64 {
        let d_lon = (other.as_longitude() - self.as_longitude()).to_radians();
        let lat1 = self.as_latitude().to_radians();
        let lat2 = other.as_latitude().to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        y.atan2(x).to_degrees()
    }

    /// この点から方位 `bearing`（度）へ `distance` メートル移動した点を返す。
    ///
    /// 球面上の順解法で求める。経度は `((λ + 3π) mod 2π) − π` で
    /// -180..180 に正規化されるため、日付変更線をまたいでもずれない。
    /// 丸め誤差で極をわずかに越えた緯度は ±90 に収める。
    ///
    /// # エラー
    /// `distance` や `bearing` が有限でない場合、結果の座標が `NaN` になり
    /// [`Error::InvalidLongitude`] または [`Error::InvalidLatitude`] を返す。
    ///
    /// ```
    /// # use geodoc::Point;
    /// let start = Point::new(179.5, 0.0).unwrap();
    /// let moved = start.move_by(111_319.49, 90.0).unwrap();
    /// assert!((moved.as_longitude() + 179.5).abs() < 1e-6);
    /// assert!(moved.as_latitude().abs() < 1e-9);
    /// ```
    pub fn move_by(&self, distance: f64, bearing: f64) -> Result<Point, Error> {
        let dr = distance / EARTH_RADIUS;
        let bearing = bearing.to_radians();
        let lon1 = self.as_longitude().to_radians();
        let lat1 = self.as_latitude().to_radians();

        let lat2 = (lat1.sin() * dr.cos() + lat1.cos() * dr.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * dr.sin() * lat1.cos()).atan2(dr.cos() - lat1.sin() * lat2.sin());
        // fmod と同じく被除数の符号を保つ剰余
        let lon2 = (lon2 + 3.0 * PI) % (2.0 * PI) - PI;

        Point::new(
            lon2.to_degrees(),
            lat2.to_degrees().clamp(MIN_LATITUDE, MAX_LATITUDE),
        )
    }

    /// 与えられた点の経度・緯度をそれぞれ単純平均した点を返す。
    ///
    /// 球面上の重心ではなく平面での平均なので、互いに近い点どうしでのみ意味を持つ。
    /// 点が1つもなければ `None`、1点だけならその点をそのまま返す。
    ///
    /// ```
    /// # use geodoc::Point;
    /// assert_eq!(Point::centroid(&[]), None);
    ///
    /// let a = Point::new(10.0, 20.0).unwrap();
    /// let b = Point::new(20.0, 40.0).unwrap();
    /// assert_eq!(Point::centroid(&[a]), Some(a));
    /// assert_eq!(Point::centroid(&[a, b]), Some(Point::new(15.0, 30.0).unwrap()));
    /// ```
    pub fn centroid(points: &[Point]) -> Option<Point> {
        match points {
            [] => None,
            [point] => Some(*point),
            _ => {
                let n = points.len() as f64;
                let (lon, lat) = points.iter().fold((0.0, 0.0), |(lon, lat), point| {
                    (lon + point.as_longitude(), lat + point.as_latitude())
                });
                // 範囲内の値の平均なので範囲外にはならない
                Some(Point::new_unchecked(lon / n, lat / n))
            }
        }
    }
}
