//! GPIO / peripheral pin assignments for the Lumanode board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Buttons (active-low momentary switches with external pull-ups)
// ---------------------------------------------------------------------------

/// Brightness-up button. Falling edge = press.
pub const BUTTON_UP_GPIO: i32 = 12;
/// Brightness-down button. Falling edge = press.
pub const BUTTON_DOWN_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Lamp output (LEDC PWM into the LED driver's dim input)
// ---------------------------------------------------------------------------

/// LEDC PWM channel driving the lamp dimmer.
pub const LAMP_PWM_GPIO: i32 = 4;
/// LEDC base frequency for the lamp (1 kHz — driver-compatible).
pub const LAMP_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
