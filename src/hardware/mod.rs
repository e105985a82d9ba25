pub mod gpio_led;
pub mod traits;

#[cfg(target_os = "none")]
pub mod exti;
