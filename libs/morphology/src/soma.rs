//! # Soma
//!
//! The cell body. Modelled as a centre plus either a declared radius or a
//! profile of surface points, from which the radius statistics are derived.

use crate::error::{MorphologyError, MorphologyResult};
use glam::DVec3;

/// The neuron's cell body.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use morphology::Soma;
///
/// let soma = Soma::from_profile(
///     DVec3::ZERO,
///     vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 3.0, 0.0)],
/// )?;
/// assert_eq!(soma.mean_radius(), 2.0);
/// assert_eq!(soma.max_radius(), 3.0);
/// # Ok::<(), morphology::MorphologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Soma {
    center: DVec3,
    profile: Vec<DVec3>,
    declared_radius: Option<f64>,
}

impl Soma {
    /// A sphere-equivalent soma of the given radius.
    pub fn sphere(center: DVec3, radius: f64) -> MorphologyResult<Self> {
        if !center.is_finite() {
            return Err(MorphologyError::invalid_soma("centre is not finite"));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(MorphologyError::invalid_soma(format!(
                "radius must be non-negative: {radius}"
            )));
        }
        Ok(Self {
            center,
            profile: Vec::new(),
            declared_radius: Some(radius),
        })
    }

    /// A soma described by points on its surface.
    pub fn from_profile(center: DVec3, profile: Vec<DVec3>) -> MorphologyResult<Self> {
        if !center.is_finite() {
            return Err(MorphologyError::invalid_soma("centre is not finite"));
        }
        if let Some(index) = profile.iter().position(|p| !p.is_finite()) {
            return Err(MorphologyError::invalid_soma(format!(
                "profile point {index} is not finite"
            )));
        }
        Ok(Self {
            center,
            profile,
            declared_radius: None,
        })
    }

    /// A soma with no extent, for morphologies that only record its position.
    pub fn point(center: DVec3) -> Self {
        Self {
            center,
            profile: Vec::new(),
            declared_radius: None,
        }
    }

    /// Centre of the soma.
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Profile points, empty for sphere-equivalent somata.
    #[inline]
    pub fn profile(&self) -> &[DVec3] {
        &self.profile
    }

    /// Mean distance from the centre to the profile, or the declared radius.
    pub fn mean_radius(&self) -> f64 {
        if let Some(radius) = self.declared_radius {
            return radius;
        }
        if self.profile.is_empty() {
            return 0.0;
        }
        self.distances().sum::<f64>() / self.profile.len() as f64
    }

    /// Largest distance from the centre to the profile, or the declared radius.
    pub fn max_radius(&self) -> f64 {
        match self.declared_radius {
            Some(radius) => radius,
            None => self.distances().fold(0.0, f64::max),
        }
    }

    /// Smallest distance from the centre to the profile, or the declared radius.
    pub fn min_radius(&self) -> f64 {
        match self.declared_radius {
            Some(radius) => radius,
            None => self.distances().reduce(f64::min).unwrap_or(0.0),
        }
    }

    fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.profile.iter().map(move |p| p.distance(self.center))
    }
}
