use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

use crate::{error::Error, geometry::constants::COORDINATE_PRECISION};

/// すべての浮動小数点数を固定小数点（既定で小数点以下6桁）で書き出す [`Formatter`]。
///
/// 整数はそのまま、`NaN` や無限大は `serde_json` と同様に `null` として出力される。
/// 配列やオブジェクトの区切りは内側の `Formatter` に委譲する。
#[derive(Debug, Clone)]
pub struct FixedFormatter<F = CompactFormatter> {
    inner: F,
    precision: usize,
}

impl FixedFormatter {
    /// 改行や空白を含まないコンパクトな出力。
    pub fn new() -> Self {
        Self::with_inner(CompactFormatter)
    }
}

impl Default for FixedFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FixedFormatter<PrettyFormatter<'a>> {
    /// 字下げされた出力。
    pub fn pretty() -> Self {
        Self::with_inner(PrettyFormatter::new())
    }
}

impl<F> FixedFormatter<F> {
    pub fn with_inner(inner: F) -> Self {
        Self {
            inner,
            precision: COORDINATE_PRECISION,
        }
    }

    /// 小数点以下の桁数を変更する。
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl<F: Formatter> Formatter for FixedFormatter<F> {
    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write!(writer, "{:.*}", self.precision, value)
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// `value` を `writer` にコンパクトな固定小数点 JSON として書き出す。
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<(), Error>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::with_formatter(writer, FixedFormatter::new());
    value.serialize(&mut serializer)?;
    Ok(())
}

/// `value` をコンパクトな固定小数点 JSON 文字列に変換する。
///
/// ```
/// # use geodoc::{Point, Polygon};
/// let p = |lon, lat| Point::new(lon, lat).unwrap();
/// let polygon = Polygon::new([p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
/// assert_eq!(
///     geodoc::to_string(&polygon).unwrap(),
///     "[[[0.000000,0.000000],[1.000000,1.000000],[1.000000,0.000000],[0.000000,0.000000]]]"
/// );
/// ```
pub fn to_string<T>(value: &T) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(128);
    to_writer(&mut buffer, value)?;
    Ok(String::from_utf8(buffer)?)
}

/// `value` を字下げされた固定小数点 JSON 文字列に変換する。
pub fn to_string_pretty<T>(value: &T) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut buffer, FixedFormatter::pretty());
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}
