//! Strategy selection.
//!
//! All three rotation kernels implement [`Resampler`], and [`Strategy`] picks
//! one by name. Callers that only need "rotate this picture" use [`rotate`].
//!
//! | Strategy    | Maps                 | Holes |
//! |-------------|----------------------|-------|
//! | `gather`    | destination → source | no    |
//! | `scatter`   | source → destination | yes   |
//! | `reference` | general affine warp  | no    |

use crate::gather::Gather;
use crate::reference::Reference;
use crate::rotation::Rotation;
use crate::scatter::Scatter;
use crate::{OpsError, OpsResult};
use rota_core::{Angle, Point, RgbImage};
use std::fmt;
use std::str::FromStr;

/// A rotation kernel.
///
/// Implementors return a new image of the same size as `src`; the input is
/// never modified.
pub trait Resampler: Send + Sync {
    /// Short lowercase name.
    fn name(&self) -> &'static str;

    /// Rotates `src` by `rotation`.
    fn resample(&self, src: &RgbImage, rotation: &Rotation) -> OpsResult<RgbImage>;
}

/// Named rotation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Inverse mapping with bilinear sampling.
    #[default]
    Gather,
    /// Forward mapping with bilinear splatting.
    Scatter,
    /// General affine warp.
    Reference,
}

impl Strategy {
    /// Every strategy, in display order.
    pub const ALL: [Strategy; 3] = [Strategy::Gather, Strategy::Scatter, Strategy::Reference];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        self.resampler().name()
    }

    /// The kernel behind this strategy.
    pub fn resampler(self) -> &'static dyn Resampler {
        match self {
            Strategy::Gather => &Gather,
            Strategy::Scatter => &Scatter,
            Strategy::Reference => &Reference,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Strategy::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                OpsError::InvalidParameter(format!(
                    "unknown strategy '{s}' (expected gather, scatter or reference)"
                ))
            })
    }
}

/// Rotates `image` by `angle` degrees about `center` with `strategy`.
///
/// ```rust
/// use rota_core::{RgbImage, Rgb8};
/// use rota_ops::strategy::{rotate, Strategy};
///
/// let img = RgbImage::filled(5, 5, Rgb8::WHITE).unwrap();
/// let out = rotate(&img, 45.0, img.center(), Strategy::Gather).unwrap();
/// assert_eq!(out.pixel(2, 2), Rgb8::WHITE);
/// ```
pub fn rotate(
    image: &RgbImage,
    angle: impl Into<Angle>,
    center: Point,
    strategy: Strategy,
) -> OpsResult<RgbImage> {
    strategy
        .resampler()
        .resample(image, &Rotation::new(angle, center))
}
