//! 球面近似の地球上で地理座標と図形を扱うための型やロジック。
//!
//! 本モジュールでは、距離や半径などの長さに関する値を、
//! 特に明記しない限りメートル（m）単位で、角度を度で扱います。

/// 地理空間座標の計算で使用される各種の代表的な定数。
pub mod constants;

/// 経度・緯度で定義される `Point` 型。
pub mod point;

/// 中心と半径で定義される `Circle` 型。
pub mod circle;

/// 穴を持つことのできる `Polygon` 型。
pub mod polygon;
