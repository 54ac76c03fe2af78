pub use super::{
    error::{Degeneracy, GeometryError},
    glam::{self, Mat4, Quat, Vec2, Vec3, Vec4},
    math::*,
};
