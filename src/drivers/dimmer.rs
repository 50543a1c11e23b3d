//! Lamp dimmer driver (LEDC PWM).
//!
//! Maps the domain's 0–1000 brightness range onto the LEDC duty range
//! and writes it out. The LED driver board takes a 1 kHz PWM dim input.

use crate::brightness::BRIGHTNESS_MAX;
use crate::pins;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Duty ceiling for the configured resolution (8-bit → 255).
const DUTY_MAX: u32 = (1 << pins::PWM_RESOLUTION_BITS) - 1;

fn level_to_duty(level: u16) -> u32 {
    let level = u32::from(level.min(BRIGHTNESS_MAX));
    level * DUTY_MAX / u32::from(BRIGHTNESS_MAX)
}

/// Configure the LEDC timer and channel for the lamp output.
#[cfg(target_os = "espidf")]
pub fn init() -> Result<(), crate::drivers::hw_init::HwInitError> {
    use crate::drivers::hw_init::HwInitError;

    // SAFETY: called once from the single main task before the event loop.
    unsafe {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
            freq_hz: pins::LAMP_PWM_FREQ_HZ,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        let ret = ledc_timer_config(&timer);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed(ret));
        }

        let channel = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::LAMP_PWM_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        let ret = ledc_channel_config(&channel);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed(ret));
        }
    }
    log::info!("dimmer: LEDC ready on GPIO {}", pins::LAMP_PWM_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init() -> Result<(), crate::drivers::hw_init::HwInitError> {
    log::info!("dimmer(sim): LEDC init skipped");
    Ok(())
}

/// Apply a brightness level (0–1000) to the lamp PWM.
#[cfg(target_os = "espidf")]
pub fn set_level(level: u16) {
    let duty = level_to_duty(level);
    // SAFETY: channel 0 was configured in init(); duty writes are
    // main-loop only.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn set_level(level: u16) {
    log::debug!("dimmer(sim): level={} duty={}", level, level_to_duty(level));
}
