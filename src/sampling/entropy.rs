//! Bounded power-law (Pareto-style) sampling via the inverse CDF.

use rand::Rng;

use crate::{Error, Result};

/// Validated `(xmin, xmax, alpha)` triple for [`EntropySampler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawBounds {
    xmin: f64,
    xmax: f64,
    alpha: f64,
}

impl PowerLawBounds {
    pub fn new(xmin: f64, xmax: f64, alpha: f64) -> Result<Self> {
        if !(xmin.is_finite() && xmax.is_finite() && alpha.is_finite()) {
            return Err(Error::DomainError(format!(
                "power-law bounds must be finite (xmin={xmin}, xmax={xmax}, alpha={alpha})"
            )));
        }
        if xmin <= 0.0 {
            return Err(Error::DomainError(format!("xmin must be > 0, got {xmin}")));
        }
        if xmax <= xmin {
            return Err(Error::DomainError(format!(
                "xmax must exceed xmin (xmin={xmin}, xmax={xmax})"
            )));
        }
        if alpha == 1.0 {
            return Err(Error::DomainError("alpha = 1 has no bounded inverse CDF".into()));
        }
        Ok(Self { xmin, xmax, alpha })
    }

    pub fn xmin(&self) -> f64 { self.xmin }
    pub fn xmax(&self) -> f64 { self.xmax }
    pub fn alpha(&self) -> f64 { self.alpha }
}

/// Pure inverse-CDF sampler. Holds no state besides its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropySampler {
    bounds: PowerLawBounds,
}

impl EntropySampler {
    pub fn new(bounds: PowerLawBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> PowerLawBounds {
        self.bounds
    }

    /// Map a uniform `u` in `[0, 1]` onto `[xmin, xmax]`.
    ///
    /// `u = 0` yields exactly `xmin`; `u → 1` approaches `xmax`.
    pub fn at(&self, u: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&u) {
            return Err(Error::DomainError(format!("u must lie in [0, 1], got {u}")));
        }
        Ok(self.invert(u))
    }

    /// One draw from the random source.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.invert(rng.gen_range(0.0..1.0))
    }

    /// Inverse CDF for `u` already known to lie in `[0, 1]`.
    fn invert(&self, u: f64) -> f64 {
        let PowerLawBounds { xmin, xmax, alpha } = self.bounds;
        let k = 1.0 - alpha;
        let x = xmin * (1.0 - u + u * (xmax / xmin).powf(k)).powf(1.0 / k);
        // powf round-trips can land an ulp outside the support
        x.clamp(xmin, xmax)
    }

    /// Largest of `draws` independent samples, biasing toward the tail.
    pub fn sample_max<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> f64 {
        (0..draws.max(1))
            .map(|_| self.sample(rng))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// One-shot form: `xmin * (1 - u + u*(xmax/xmin)^(1-alpha))^(1/(1-alpha))`.
pub fn sample_power_law(xmin: f64, xmax: f64, alpha: f64, u: f64) -> Result<f64> {
    EntropySampler::new(PowerLawBounds::new(xmin, xmax, alpha)?).at(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_u_zero_is_xmin() {
        assert_eq!(sample_power_law(0.1, 10.0, 2.5, 0.0).unwrap(), 0.1);
    }

    #[test]
    fn test_u_near_one_approaches_xmax() {
        let x = sample_power_law(0.1, 10.0, 2.5, 1.0 - 1e-12).unwrap();
        assert!((x - 10.0).abs() < 1e-3, "got {x}");
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(matches!(sample_power_law(0.0, 10.0, 2.5, 0.5), Err(Error::DomainError(_))));
        assert!(matches!(sample_power_law(1.0, 1.0, 2.5, 0.5), Err(Error::DomainError(_))));
        assert!(matches!(sample_power_law(0.1, 10.0, 1.0, 0.5), Err(Error::DomainError(_))));
        assert!(matches!(sample_power_law(0.1, 10.0, 2.5, 1.5), Err(Error::DomainError(_))));
        assert!(matches!(sample_power_law(0.1, f64::NAN, 2.5, 0.5), Err(Error::DomainError(_))));
    }

    #[test]
    fn test_max_of_draws_dominates_single_draw() {
        let sampler = EntropySampler::new(PowerLawBounds::new(0.1, 10.0, 2.5).unwrap());
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let single = sampler.sample(&mut a);
        let max = sampler.sample_max(&mut b, 3);
        assert!(max >= single);
    }

    #[test]
    fn test_sample_matches_inverse_cdf_of_drawn_u() {
        let sampler = EntropySampler::new(PowerLawBounds::new(0.1, 10.0, 2.5).unwrap());
        let mut a = StdRng::seed_from_u64(13);
        let mut b = StdRng::seed_from_u64(13);
        for _ in 0..100 {
            let u: f64 = b.gen_range(0.0..1.0);
            assert_eq!(sampler.sample(&mut a).to_bits(), sampler.at(u).unwrap().to_bits());
        }
    }

    proptest! {
        #[test]
        fn prop_sample_within_bounds(
            xmin in 0.001f64..50.0,
            span in 0.001f64..100.0,
            alpha in prop_oneof![0.05f64..0.95, 1.05f64..6.0],
            u in 0.0f64..=1.0,
        ) {
            let xmax = xmin + span;
            let x = sample_power_law(xmin, xmax, alpha, u).unwrap();
            prop_assert!(x >= xmin && x <= xmax, "{} not in [{}, {}]", x, xmin, xmax);
        }
    }
}
