//! Unit registry
//!
//! Parses unit expressions such as `kg`, `lb`, `cm` or `kg/m^2` into a scale
//! factor relative to SI base units plus a dimensionality, and converts
//! magnitudes between compatible expressions.
//!
//! Expressions are products of factors separated by `*` or whitespace,
//! optionally divided by further products with `/`. Each factor may carry an
//! integer exponent written `^n` or `**n`. Unit names are case-insensitive.

use crate::error::{MedCalcError, MedCalcResult};
use std::fmt;

/// Exponents of the physical base dimensions a unit is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub mass: i32,
    pub length: i32,
    pub time: i32,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { mass: 0, length: 0, time: 0 };
    pub const MASS: Dimension = Dimension { mass: 1, length: 0, time: 0 };
    pub const LENGTH: Dimension = Dimension { mass: 0, length: 1, time: 0 };
    pub const TIME: Dimension = Dimension { mass: 0, length: 0, time: 1 };

    /// `None` when an exponent leaves the `i32` range.
    fn scaled(self, exponent: i32) -> Option<Self> {
        Some(Self {
            mass: self.mass.checked_mul(exponent)?,
            length: self.length.checked_mul(exponent)?,
            time: self.time.checked_mul(exponent)?,
        })
    }

    fn combined(self, other: Self) -> Option<Self> {
        Some(Self {
            mass: self.mass.checked_add(other.mass)?,
            length: self.length.checked_add(other.length)?,
            time: self.time.checked_add(other.time)?,
        })
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }
        let parts: Vec<String> = [("mass", self.mass), ("length", self.length), ("time", self.time)]
            .into_iter()
            .filter(|(_, exp)| *exp != 0)
            .map(|(name, exp)| if exp == 1 { format!("[{name}]") } else { format!("[{name}]^{exp}") })
            .collect();
        write!(f, "{}", parts.join(" * "))
    }
}

/// A parsed unit expression: multiply a magnitude by `factor` to get SI base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub factor: f64,
    pub dimension: Dimension,
}

impl Unit {
    const ONE: Unit = Unit { factor: 1.0, dimension: Dimension::DIMENSIONLESS };

    const fn new(factor: f64, dimension: Dimension) -> Self {
        Self { factor, dimension }
    }

    fn powi(self, exponent: i32) -> Option<Self> {
        Some(Self { factor: self.factor.powi(exponent), dimension: self.dimension.scaled(exponent)? })
    }

    fn times(self, other: Self) -> Option<Self> {
        Some(Self {
            factor: self.factor * other.factor,
            dimension: self.dimension.combined(other.dimension)?,
        })
    }
}

const POUND_KG: f64 = 0.453_592_37;
const INCH_M: f64 = 0.0254;

fn base_unit(name: &str) -> Option<Unit> {
    use Dimension as D;
    let unit = match name {
        "1" => Unit::ONE,

        "kg" | "kilogram" | "kilograms" => Unit::new(1.0, D::MASS),
        "g" | "gram" | "grams" => Unit::new(1e-3, D::MASS),
        "mg" | "milligram" | "milligrams" => Unit::new(1e-6, D::MASS),
        "lb" | "lbs" | "pound" | "pounds" => Unit::new(POUND_KG, D::MASS),
        "oz" | "ounce" | "ounces" => Unit::new(POUND_KG / 16.0, D::MASS),
        "st" | "stone" | "stones" => Unit::new(POUND_KG * 14.0, D::MASS),

        "m" | "meter" | "meters" | "metre" | "metres" => Unit::new(1.0, D::LENGTH),
        "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
            Unit::new(1e-2, D::LENGTH)
        }
        "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
            Unit::new(1e-3, D::LENGTH)
        }
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
            Unit::new(1e3, D::LENGTH)
        }
        "in" | "inch" | "inches" => Unit::new(INCH_M, D::LENGTH),
        "ft" | "foot" | "feet" => Unit::new(INCH_M * 12.0, D::LENGTH),
        "yd" | "yard" | "yards" => Unit::new(INCH_M * 36.0, D::LENGTH),

        "s" | "sec" | "second" | "seconds" => Unit::new(1.0, D::TIME),
        "min" | "minute" | "minutes" => Unit::new(60.0, D::TIME),
        "h" | "hr" | "hour" | "hours" => Unit::new(3600.0, D::TIME),
        _ => return None,
    };
    Some(unit)
}

fn parse_factor(raw: &str, expr: &str) -> MedCalcResult<Unit> {
    let (name, exponent) = match raw.split_once('^') {
        Some((name, exp)) => {
            let exp = exp.trim().parse::<i32>().map_err(|_| MedCalcError::unknown_unit(expr))?;
            (name.trim(), exp)
        }
        None => (raw, 1),
    };
    let base = base_unit(&name.to_lowercase()).ok_or_else(|| MedCalcError::unknown_unit(expr))?;
    base.powi(exponent).ok_or_else(|| MedCalcError::unknown_unit(expr))
}

fn parse_product(segment: &str, expr: &str) -> MedCalcResult<Unit> {
    let normalized = segment.replace("**", "^");
    let mut factors = normalized
        .split(|c: char| c == '*' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .peekable();
    if factors.peek().is_none() {
        return Err(MedCalcError::unknown_unit(expr));
    }
    factors.try_fold(Unit::ONE, |acc, factor| {
        acc.times(parse_factor(factor, expr)?).ok_or_else(|| MedCalcError::unknown_unit(expr))
    })
}

/// Parse a unit expression.
pub fn parse(expr: &str) -> MedCalcResult<Unit> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(MedCalcError::unknown_unit(expr));
    }
    let mut segments = trimmed.split('/');
    let numerator = match segments.next() {
        Some(segment) => parse_product(segment, expr)?,
        None => return Err(MedCalcError::unknown_unit(expr)),
    };
    let unit = segments.try_fold(numerator, |acc, segment| {
        parse_product(segment, expr)?
            .powi(-1)
            .and_then(|divisor| acc.times(divisor))
            .ok_or_else(|| MedCalcError::unknown_unit(expr))
    })?;
    // Exponents large enough to underflow or overflow the factor make every
    // conversion through it meaningless
    if !unit.factor.is_normal() {
        return Err(MedCalcError::unknown_unit(expr));
    }
    Ok(unit)
}

/// Dimensionality of a unit expression.
pub fn dimensionality(expr: &str) -> MedCalcResult<Dimension> {
    parse(expr).map(|unit| unit.dimension)
}

/// Convert `value` expressed in `from` into `to`.
pub fn convert(value: f64, from: &str, to: &str) -> MedCalcResult<f64> {
    let source = parse(from)?;
    let target = parse(to)?;
    if source.dimension != target.dimension {
        return Err(MedCalcError::conversion(
            Some(from),
            Some(to),
            format!(
                "cannot convert from '{from}' ({}) to '{to}' ({})",
                source.dimension, target.dimension
            ),
        ));
    }
    Ok(value * source.factor / target.factor)
}
