//! Spherical functions: values defined for every direction on the unit sphere.
//!
//! A spherical function maps a unit direction to either a scalar (`f32`) or a
//! colour (`Vector3<f32>`). The variant set is small and fixed:
//! - `Subroutine`: wraps a plain evaluator function
//! - `Product`: pointwise product of two other functions
//! - `CubemapFunction`: colour looked up from an environment sampler
//! - `Visibility`: clamped-cosine lobe around a fixed normal
//!
//! Evaluation takes `&self` and the trait requires `Sync`, so a single
//! function can be shared by every projection worker.

use std::ops::{Add, Mul};

use nalgebra::Vector3;

use super::environment::EnvironmentSampler;
use super::{Direction, Rgb};

/// A value that can be accumulated by quadrature.
///
/// `zero()` is the additive identity used to seed a running sum, so vector
/// types never depend on a scalar `0.0` literal.
pub trait SampleValue: Copy + Send + Add<Output = Self> + Mul<f32, Output = Self> {
    fn zero() -> Self;
}

impl SampleValue for f32 {
    fn zero() -> Self {
        0.0
    }
}

impl SampleValue for Vector3<f32> {
    fn zero() -> Self {
        Vector3::zeros()
    }
}

/// Something that can be evaluated for a unit direction.
pub trait SphericalFunction: Sync {
    type Output: SampleValue;

    fn evaluate(&self, direction: &Direction) -> Self::Output;
}

/// Spherical function backed by a stateless evaluator.
#[derive(Clone, Copy)]
pub struct Subroutine<T> {
    evaluator: fn(&Direction) -> T,
}

impl<T> Subroutine<T> {
    pub const fn new(evaluator: fn(&Direction) -> T) -> Self {
        Self { evaluator }
    }
}

impl<T: SampleValue> SphericalFunction for Subroutine<T> {
    type Output = T;

    fn evaluate(&self, direction: &Direction) -> T {
        (self.evaluator)(direction)
    }
}

/// Pointwise product of two spherical functions.
///
/// Borrows both operands; the caller keeps ownership. The output type is
/// whatever `L::Output * R::Output` produces, so combining incompatible value
/// types (e.g. colour × colour) fails to compile rather than at runtime.
pub struct Product<'a, L: ?Sized, R: ?Sized> {
    left: &'a L,
    right: &'a R,
}

impl<'a, L: ?Sized, R: ?Sized> Product<'a, L, R> {
    pub fn new(left: &'a L, right: &'a R) -> Self {
        Self { left, right }
    }
}

impl<L, R> SphericalFunction for Product<'_, L, R>
where
    L: SphericalFunction + ?Sized,
    R: SphericalFunction + ?Sized,
    L::Output: Mul<R::Output>,
    <L::Output as Mul<R::Output>>::Output: SampleValue,
{
    type Output = <L::Output as Mul<R::Output>>::Output;

    fn evaluate(&self, direction: &Direction) -> Self::Output {
        // Fully qualified: `SampleValue: Mul<f32>` would otherwise shadow this impl
        <L::Output as Mul<R::Output>>::mul(
            self.left.evaluate(direction),
            self.right.evaluate(direction),
        )
    }
}

/// Colour seen in a direction, looked up from an environment sampler.
pub struct CubemapFunction<'a, S: ?Sized> {
    sampler: &'a S,
}

impl<'a, S: EnvironmentSampler + ?Sized> CubemapFunction<'a, S> {
    pub fn new(sampler: &'a S) -> Self {
        Self { sampler }
    }
}

impl<S: EnvironmentSampler + ?Sized> SphericalFunction for CubemapFunction<'_, S> {
    type Output = Rgb;

    fn evaluate(&self, direction: &Direction) -> Rgb {
        self.sampler.sample(direction)
    }
}

/// Clamped-cosine lobe: `max(0, normal · direction)`.
#[derive(Clone, Copy, Debug)]
pub struct Visibility {
    normal: Direction,
}

impl Visibility {
    pub fn new(normal: Direction) -> Self {
        Self { normal }
    }

    pub fn normal(&self) -> &Direction {
        &self.normal
    }
}

impl SphericalFunction for Visibility {
    type Output = f32;

    fn evaluate(&self, direction: &Direction) -> f32 {
        // Round-off can push grazing samples just below zero
        self.normal.dot(direction).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UniformEnvironment;
    use approx::assert_relative_eq;

    fn height(direction: &Direction) -> f32 {
        direction.y
    }

    #[test]
    fn test_subroutine_calls_evaluator() {
        let f = Subroutine::new(height);
        assert_eq!(f.evaluate(&Vector3::new(0.0, 0.25, 0.0)), 0.25);
    }

    #[test]
    fn test_visibility_clamps_back_hemisphere() {
        let v = Visibility::new(Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(v.evaluate(&Vector3::new(0.0, -1.0, 0.0)), 0.0);
        assert_eq!(v.evaluate(&Vector3::new(1.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(v.evaluate(&Vector3::new(0.0, 1.0, 0.0)), 1.0);
    }

    #[test]
    fn test_colour_times_scalar_product() {
        let env = UniformEnvironment::new(Vector3::new(0.5, 0.25, 1.0));
        let colour = CubemapFunction::new(&env);
        let lobe = Visibility::new(Vector3::new(0.0, 0.0, 1.0));
        let product = Product::new(&colour, &lobe);

        let d = Vector3::new(0.0, 0.6, 0.8);
        assert_eq!(product.evaluate(&d), colour.evaluate(&d) * lobe.evaluate(&d));
    }

    #[test]
    fn test_product_of_products() {
        let a = Subroutine::new(height);
        let inner = Product::new(&a, &a);
        let outer = Product::new(&inner, &a);
        let d = Vector3::new(0.0, 0.5, 0.0);
        assert_eq!(outer.evaluate(&d), 0.125);
    }

    #[test]
    fn test_scalar_times_colour_product() {
        let env = UniformEnvironment::new(Vector3::new(0.5, 0.25, 1.0));
        let colour = CubemapFunction::new(&env);
        let lobe = Visibility::new(Vector3::new(0.0, 1.0, 0.0));
        let product = Product::new(&colour, &lobe);
        let nested = Product::new(&product, &lobe);

        let d = Vector3::new(0.0, 0.5, 0.0);
        assert_eq!(nested.evaluate(&d), Vector3::new(0.125, 0.0625, 0.25));
    }
}
