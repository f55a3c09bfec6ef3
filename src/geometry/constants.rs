/// 球体近似で使用する地球の半径（メートル）。
///
/// WGS-84 楕円体の長半径をそのまま用いる。楕円体補正は行わない。
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// 経度の最小値（度）
pub const MIN_LONGITUDE: f64 = -180.0;

/// 経度の最大値（度）
pub const MAX_LONGITUDE: f64 = 180.0;

/// 緯度の最小値（度）
pub const MIN_LATITUDE: f64 = -90.0;

/// 緯度の最大値（度）
pub const MAX_LATITUDE: f64 = 90.0;

/// 円を多角形で近似する際の既定の分割数
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 16;

/// 円を多角形で近似する際に許容される最小の分割数
pub const MIN_CIRCLE_SEGMENTS: usize = 3;

/// 単位円上の成分がこの値未満なら 0 に丸める
//東西南北の点に残る浮動小数点誤差を取り除くため
pub const CIRCLE_SNAP_THRESHOLD: f64 = 0.01;

/// テキスト出力時の座標の小数点以下の桁数
pub const COORDINATE_PRECISION: usize = 6;
