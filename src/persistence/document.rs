use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::figure::Color;
use crate::math::Point2;

/// A point as stored in documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEntry {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

impl From<Point2> for PointEntry {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointEntry> for Point2 {
    fn from(e: PointEntry) -> Self {
        Point2::new(e.x, e.y)
    }
}

/// Name-keyed values that serialize as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterMap<T>(Vec<(String, T)>);

impl<T> ParameterMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, value: T) {
        self.0.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Serialize> Serialize for ParameterMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One persisted figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FigureEntry {
    pub name: String,
    pub point_parameters: ParameterMap<PointEntry>,
    pub double_parameters: ParameterMap<f64>,
    pub color: Color,
}

/// A whole document: the figures in collection order.
pub type Document = Vec<FigureEntry>;
