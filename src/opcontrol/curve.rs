//! Joystick response curve.
//!
//! Raw stick readings are passed through a sigmoid before they reach the
//! drivetrain:
//!
//! ```text
//! shape(x) = sign(x) * (128 * 4^((|x| - 50) / 12.5) / (4^((|x| - 50) / 12.5) + 1) - 1)
//! ```
//!
//! rounded to the nearest integer. Small deflections are flattened to zero,
//! the middle of the travel ramps up steeply, and the last third saturates at
//! full power. A stick resting slightly off-center therefore no longer makes
//! the robot creep.
//!
//! The curve is stored as a precomputed table, [`SIGMOID_MAP`], which is the
//! reference for every output value. [`sigmoid`] evaluates the closed form.

use crate::peripherals::MAX_COMMAND;

/// Shaped output for every raw input, indexed by `x + 127`.
#[rustfmt::skip]
pub const SIGMOID_MAP: [i8; 255] = [
    -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127,
    -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -127, -126, -126,
    -126, -126, -126, -126, -126, -126, -126, -126, -125, -125, -125, -125, -124, -124, -124,
    -123, -123, -123, -122, -122, -121, -120, -119, -119, -118, -117, -116, -114, -113, -112,
    -110, -108, -107, -105, -103, -100,  -98,  -95,  -93,  -90,  -87,  -84,  -80,  -77,  -74,
     -70,  -67,  -63,  -59,  -56,  -52,  -49,  -46,  -42,  -39,  -36,  -33,  -31,  -28,  -26,
     -23,  -21,  -19,  -18,  -16,  -14,  -13,  -12,  -10,   -9,   -8,   -7,   -7,   -6,   -5,
      -4,   -4,   -3,   -3,   -3,   -2,   -2,   -2,   -1,   -1,   -1,   -1,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    1,    1,    1,    1,    2,    2,    2,    3,    3,    3,    4,    4,
       5,    6,    7,    7,    8,    9,   10,   12,   13,   14,   16,   18,   19,   21,   23,
      26,   28,   31,   33,   36,   39,   42,   46,   49,   52,   56,   59,   63,   67,   70,
      74,   77,   80,   84,   87,   90,   93,   95,   98,  100,  103,  105,  107,  108,  110,
     112,  113,  114,  116,  117,  118,  119,  119,  120,  121,  122,  122,  123,  123,  123,
     124,  124,  124,  125,  125,  125,  125,  126,  126,  126,  126,  126,  126,  126,  126,
     126,  126,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,
     127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,  127,
];

/// Shapes a raw stick reading. Inputs outside `-127..=127` are clamped first.
///
/// # Example
///
/// ```
/// use firebrand::opcontrol::curve::shape;
///
/// assert_eq!(shape(0), 0);
/// assert_eq!(shape(10), 0);
/// assert_eq!(shape(64), 105);
/// assert_eq!(shape(-127), -127);
/// ```
pub fn shape(x: i32) -> i32 {
    let index = x.clamp(-MAX_COMMAND, MAX_COMMAND) + MAX_COMMAND;
    SIGMOID_MAP[index as usize] as i32
}

/// Evaluates the response curve in closed form, without rounding.
pub fn sigmoid(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let p = 4.0_f64.powf((x.abs() - 50.0) / 12.5);
    x.signum() * (128.0 * p / (p + 1.0) - 1.0)
}
