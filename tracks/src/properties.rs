use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::point::lerp;
use crate::time::{interpolate_timestamps, Timestamp};

/// A named attribute carried along with a point. Only these few types are supported; anything
/// richer belongs in a custom point type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Real(f64),
    Timestamp(Timestamp),
    String(String),
}

pub type PropertyMap = BTreeMap<String, PropertyValue>;

impl PropertyValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(x) => Some(*x),
            PropertyValue::Integer(x) => Some(*x as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            PropertyValue::Timestamp(x) => Some(*x),
            _ => None,
        }
    }

    /// Numbers and timestamps blend linearly. Anything else (strings, or two values of
    /// different types) snaps to whichever side is nearer, with `a` winning at exactly 0.5.
    pub fn interpolate(a: &PropertyValue, b: &PropertyValue, t: f64) -> PropertyValue {
        match (a, b) {
            (PropertyValue::Real(x), PropertyValue::Real(y)) => {
                PropertyValue::Real(lerp(*x, *y, t))
            }
            (PropertyValue::Integer(x), PropertyValue::Integer(y)) => {
                PropertyValue::Integer(lerp(*x as f64, *y as f64, t).round() as i64)
            }
            (PropertyValue::Timestamp(x), PropertyValue::Timestamp(y)) => {
                PropertyValue::Timestamp(interpolate_timestamps(*x, *y, t))
            }
            _ => nearest(a, b, t).clone(),
        }
    }
}

pub(crate) fn nearest<'a, T>(a: &'a T, b: &'a T, t: f64) -> &'a T {
    if t <= 0.5 {
        a
    } else {
        b
    }
}

/// Interpolates every key. A key only present on one side is carried through as-is.
pub fn interpolate_properties(a: &PropertyMap, b: &PropertyMap, t: f64) -> PropertyMap {
    let mut result = PropertyMap::new();
    for (key, value) in a {
        let blended = match b.get(key) {
            Some(other) => PropertyValue::interpolate(value, other, t),
            None => value.clone(),
        };
        result.insert(key.clone(), blended);
    }
    for (key, value) in b {
        if !a.contains_key(key) {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}
