//! Shader effects as named parameter sets.
//!
//! The shader program itself lives behind the backend; the core only ever
//! talks to it through parameter names. Setting a parameter the effect does
//! not declare is a silent no-op, so one code path can feed every effect.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

use super::backend::TextureId;

/// Value of a single effect parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Scalar.
    Float(f32),
    /// Integer.
    Int(i32),
    /// Boolean flag.
    Bool(bool),
    /// 2-vector.
    Vec2(Vec2),
    /// 3-vector (positions, directions, RGB colours).
    Vec3(Vec3),
    /// 4-vector (RGBA colours).
    Vec4(Vec4),
    /// 4x4 matrix.
    Matrix(Mat4),
    /// Scalar array.
    FloatArray(Vec<f32>),
    /// 2-vector array.
    Vec2Array(Vec<Vec2>),
    /// 3-vector array.
    Vec3Array(Vec<Vec3>),
    /// Bound texture.
    Texture(TextureId),
}

impl ParamValue {
    /// Short type name for log messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Matrix(_) => "matrix",
            Self::FloatArray(_) => "float[]",
            Self::Vec2Array(_) => "vec2[]",
            Self::Vec3Array(_) => "vec3[]",
            Self::Texture(_) => "texture",
        }
    }

    /// The contained 3-vector, if this is one.
    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained matrix, if this is one.
    #[must_use]
    pub fn as_matrix(&self) -> Option<Mat4> {
        match self {
            Self::Matrix(m) => Some(*m),
            _ => None,
        }
    }
}

/// An opaque shader program parameterized by name/value pairs.
pub trait Effect: Send {
    /// Name of the underlying shader, for logging and backends.
    fn name(&self) -> &str;

    /// Set a declared parameter. Returns `false` (and changes nothing) if
    /// the effect has no parameter by that name.
    fn try_set_parameter(&mut self, name: &str, value: ParamValue) -> bool;

    /// Current value of a declared parameter.
    fn parameter(&self, name: &str) -> Option<&ParamValue>;

    /// Whether the effect declares a parameter by that name.
    fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }
}

/// In-memory [`Effect`]: a fixed set of declared parameters and their values.
#[derive(Debug, Clone, Default)]
pub struct ParameterBag {
    name: String,
    params: FxHashMap<String, ParamValue>,
}

impl ParameterBag {
    /// Effect with no declared parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: FxHashMap::default(),
        }
    }

    /// Declare a parameter with its initial value.
    #[must_use]
    pub fn with(mut self, name: &str, value: ParamValue) -> Self {
        self.declare(name, value);
        self
    }

    /// Declare (or redeclare) a parameter.
    pub fn declare(&mut self, name: &str, value: ParamValue) {
        let _ = self.params.insert(name.to_owned(), value);
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Effect for ParameterBag {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_set_parameter(&mut self, name: &str, value: ParamValue) -> bool {
        match self.params.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_parameters_are_ignored() {
        let mut effect = ParameterBag::new("Lambert")
            .with("World", ParamValue::Matrix(Mat4::IDENTITY));
        assert!(!effect.try_set_parameter("Time", ParamValue::Float(1.0)));
        assert!(effect.parameter("Time").is_none());
        assert_eq!(effect.len(), 1);
    }

    #[test]
    fn declared_parameters_are_replaced() {
        let mut effect = ParameterBag::new("Phong")
            .with("CameraPosition", ParamValue::Vec3(Vec3::ZERO));
        let eye = Vec3::new(0.0, 10.0, 100.0);
        assert!(effect.try_set_parameter("CameraPosition", ParamValue::Vec3(eye)));
        assert_eq!(
            effect.parameter("CameraPosition").and_then(ParamValue::as_vec3),
            Some(eye)
        );
        assert!(effect.has_parameter("CameraPosition"));
    }
}
