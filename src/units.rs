use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Points per millimetre (72 points per inch, 25.4 millimetres per inch)
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// CSS pixels per point (96 pixels per inch)
pub const PX_PER_PT: f32 = 96.0 / 72.0;

/// A length in PDF points (1/72 of an inch). All drawing happens in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

/// A length in millimetres. Template geometry is expressed in millimetres.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Mm(pub f32);

/// A length in CSS pixels, used by the editing surface
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
pub struct Px(pub f32);

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;

            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Mul<$unit> for f32 {
            type Output = $unit;

            fn mul(self, rhs: $unit) -> $unit {
                $unit(self * rhs.0)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;

            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }

        /// Dividing two lengths yields their unitless ratio
        impl Div<$unit> for $unit {
            type Output = f32;

            fn div(self, rhs: $unit) -> f32 {
                self.0 / rhs.0
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);
scalar_ops!(Px);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_MM)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 / PT_PER_MM)
    }
}

impl From<Pt> for Px {
    fn from(pt: Pt) -> Px {
        Px(pt.0 * PX_PER_PT)
    }
}

impl Pt {
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }
}
