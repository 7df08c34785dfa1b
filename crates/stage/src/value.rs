// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;

use glam::{DVec3, Vec3};

/// The declared storage type of an attribute.  Fixed when the attribute is created; writes of any
/// other type are rejected by the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Float,
    Double,
    Float3,
    Double3,
    Token,
    TokenArray,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Bool => "bool",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Float3 => "float3",
            ValueType::Double3 => "double3",
            ValueType::Token => "token",
            ValueType::TokenArray => "token[]",
        })
    }
}

/// A dynamically typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f32),
    Double(f64),
    Float3(Vec3),
    Double3(DVec3),
    Token(String),
    TokenArray(Vec<String>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Float3(_) => ValueType::Float3,
            Value::Double3(_) => ValueType::Double3,
            Value::Token(_) => ValueType::Token,
            Value::TokenArray(_) => ValueType::TokenArray,
        }
    }
}

/// Rust types that map one-to-one onto a [`ValueType`], for typed reads and writes.
pub trait AttributeValue: Sized {
    const VALUE_TYPE: ValueType;

    fn from_value(value: &Value) -> Option<Self>;
    fn into_value(self) -> Value;
}

macro_rules! attribute_value {
    ($ty:ty, $variant:ident) => {
        impl AttributeValue for $ty {
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

attribute_value!(bool, Bool);
attribute_value!(f32, Float);
attribute_value!(f64, Double);
attribute_value!(Vec3, Float3);
attribute_value!(DVec3, Double3);
attribute_value!(String, Token);
attribute_value!(Vec<String>, TokenArray);

/// A typed value slot on a prim.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    value_type: ValueType,
    value: Value,
}

impl Attribute {
    /// Creates an attribute whose declared type is that of its initial value.
    pub fn new(value: Value) -> Self {
        Self {
            value_type: value.value_type(),
            value,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn get<T: AttributeValue>(&self) -> Option<T> {
        T::from_value(&self.value)
    }

    /// Replaces the value, keeping the declared type.  Returns the rejected value's type on
    /// mismatch.
    pub(crate) fn set(&mut self, value: Value) -> Result<(), ValueType> {
        if value.value_type() != self.value_type {
            return Err(value.value_type());
        }
        self.value = value;
        Ok(())
    }
}

// End of File
