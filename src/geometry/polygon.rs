use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use crate::{
    error::Error,
    geojson::{GeoJson, ToGeoJson},
    geometry::point::Point,
};

/// 穴を持つことができる多角形。
///
/// 閉じたリングの列として表現される。先頭のリングが外周、2番目以降のリングが
/// 外周から除外される穴となる。各リングは構築時に必ず閉じられる（始点と終点が一致する）。
///
/// 穴が外周の内側にあるか、リング同士が交差していないかといった位相的な検証は行わない。
/// これらは呼び出し側の責任となる。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<Vec<Point>>")]
pub struct Polygon {
    rings: Vec<Vec<Point>>,
    epsilon: f64,
}

impl Polygon {
    /// 始点と終点の一致判定に使う既定の許容誤差。`0.0` は完全一致を意味する。
    pub const DEFAULT_EPSILON: f64 = 0.0;

    /// 外周のみを持つ [`Polygon`] を構築する。
    ///
    /// 始点と終点が一致しない場合は始点を末尾に追加してリングを閉じる。
    ///
    /// ```
    /// # use geodoc::{Point, Polygon};
    /// let polygon = Polygon::new([
    ///     Point::new(0.0, 0.0).unwrap(),
    ///     Point::new(1.0, 1.0).unwrap(),
    ///     Point::new(1.0, 0.0).unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// let exterior = polygon.exterior().unwrap();
    /// assert_eq!(exterior.len(), 4);
    /// assert_eq!(exterior.first(), exterior.last());
    /// ```
    ///
    /// # エラー
    /// 点が1つもない場合は [`Error::EmptyRing`] を返す。
    pub fn new<I>(points: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Point>,
    {
        Self::new_with_epsilon(points, Self::DEFAULT_EPSILON)
    }

    /// 始点と終点の一致判定に許容誤差 `epsilon`（度）を用いて [`Polygon`] を構築する。
    ///
    /// 経度・緯度それぞれの差が `epsilon` 以内なら終点を始点で置き換え、リングを正確に閉じる。
    /// 後から [`Exclude::exclude`] で追加されるリングにも同じ許容誤差が使われる。
    pub fn new_with_epsilon<I>(points: I, epsilon: f64) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Point>,
    {
        let ring = close_ring(points.into_iter().collect(), epsilon)?;
        Ok(Self {
            rings: vec![ring],
            epsilon,
        })
    }

    /// すべてのリングを返す。
    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    /// 外周のリングを返す。リングが1つもなければ `None`。
    pub fn exterior(&self) -> Option<&[Point]> {
        self.rings.first().map(Vec::as_slice)
    }

    /// 穴のリングを返す。
    pub fn holes(&self) -> &[Vec<Point>] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// リングが1つもなければ `true` を返す。
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

/// 多角形に穴を追加する操作。
///
/// `Option<Polygon>` にも実装されており、`None` に対しては何もしない。
pub trait Exclude {
    /// `points` を閉じたリングとして穴に追加する。
    ///
    /// 穴が外周と重なっているかどうかの検証は行われない。
    ///
    /// ```
    /// # use geodoc::{Exclude, Point, Polygon};
    /// let p = |lon, lat| Point::new(lon, lat).unwrap();
    ///
    /// let mut polygon = Polygon::new([p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
    /// polygon.exclude([p(0.0, 0.0), p(0.5, 0.5), p(0.5, 0.0)]).unwrap();
    /// assert_eq!(polygon.rings().len(), 2);
    /// assert_eq!(polygon.holes()[0].len(), 4);
    ///
    /// let mut absent: Option<Polygon> = None;
    /// absent.exclude([p(0.0, 0.0)]).unwrap();
    /// assert!(absent.is_none());
    /// ```
    fn exclude<I>(&mut self, points: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Point>;
}

impl Exclude for Polygon {
    fn exclude<I>(&mut self, points: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Point>,
    {
        let ring = close_ring(points.into_iter().collect(), self.epsilon)?;
        self.rings.push(ring);
        Ok(())
    }
}

impl Exclude for Option<Polygon> {
    fn exclude<I>(&mut self, points: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Point>,
    {
        match self {
            Some(polygon) => polygon.exclude(points),
            None => {
                trace!("exclude on an absent polygon skipped");
                Ok(())
            }
        }
    }
}

/// 始点と終点が一致するようにリングを閉じる。
fn close_ring(mut points: Vec<Point>, epsilon: f64) -> Result<Vec<Point>, Error> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(Error::EmptyRing),
    };

    if first == last {
        return Ok(points);
    }

    let near = (first.as_longitude() - last.as_longitude()).abs() <= epsilon
        && (first.as_latitude() - last.as_latitude()).abs() <= epsilon;

    if near {
        trace!(len = points.len(), epsilon, "snapping ring end onto its start");
        let end = points.len() - 1;
        points[end] = first;
    } else {
        trace!(len = points.len(), "closing ring");
        points.push(first);
    }

    Ok(points)
}

impl TryFrom<Vec<Vec<Point>>> for Polygon {
    type Error = Error;

    /// リングの配列から変換する。閉じていないリングは閉じられる。
    fn try_from(value: Vec<Vec<Point>>) -> Result<Self, Self::Error> {
        let rings = value
            .into_iter()
            .map(|ring| close_ring(ring, Self::DEFAULT_EPSILON))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rings,
            epsilon: Self::DEFAULT_EPSILON,
        })
    }
}

impl PartialEq for Polygon {
    /// リングだけを比較する。閉じる際の許容誤差は比較に含めない。
    fn eq(&self, other: &Self) -> bool {
        self.rings == other.rings
    }
}

impl Serialize for Polygon {
    /// リングの配列 `[[[経度,緯度], ...], ...]` として出力する。
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.rings.serialize(serializer)
    }
}

impl ToGeoJson for Polygon {
    fn to_geojson(&self) -> Option<GeoJson> {
        if self.is_empty() {
            return None;
        }
        Some(GeoJson::polygon(self))
    }
}
