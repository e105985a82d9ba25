//! STM32F103 Blue Pill Pedestrian Crossing
//!
//! This firmware drives a single pedestrian crossing:
//! - Vehicle signal head (red/yellow/green LEDs)
//! - Pedestrian signal head (red/yellow/green LEDs)
//! - Request pushbutton on EXTI line 4
//!
//! Hardware Connections (all LEDs active-high through a resistor to GND):
//!   Pedestrian head -> Blue Pill
//!      RED    -> PA1
//!      YELLOW -> PA2
//!      GREEN  -> PA3
//!
//!   Vehicle head -> Blue Pill
//!      GREEN  -> PB1
//!      YELLOW -> PB2
//!      RED    -> PB5
//!
//!   Request button:
//!      one leg -> PA4 (internal pull-down)
//!      other   -> 3.3V
//!
//! PB3/PB4 are JTAG pins after reset and are deliberately left unused.
//!
//! The phase sequencer runs in thread mode with blocking delays; the request
//! latch runs inside the EXTI4 interrupt and preempts it.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embassy_stm32::{
    gpio::{Input, Level, Output, Pull, Speed},
    time::Hertz,
};
use embassy_time::Delay;
use pedestrian_crossing::{
    Controller, Error, Lamps, Signal,
    hardware::{
        exti::{self, Edge, Port},
        gpio_led::GpioLed,
    },
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _}; // Logging and panic handlers

static CONTROLLER: StaticCell<Controller<Input<'static>>> = StaticCell::new();

#[entry]
fn main() -> ! {
    // 8 MHz crystal straight onto SYSCLK, no PLL
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.sys = Sysclk::HSE;
    }
    let p = embassy_stm32::init(config);

    defmt::info!("pedestrian crossing starting");

    let lamps = Lamps::new(
        Signal::new(
            GpioLed::new(Output::new(p.PB5, Level::Low, Speed::Low)),
            GpioLed::new(Output::new(p.PB2, Level::Low, Speed::Low)),
            GpioLed::new(Output::new(p.PB1, Level::Low, Speed::Low)),
        ),
        Signal::new(
            GpioLed::new(Output::new(p.PA1, Level::Low, Speed::Low)),
            GpioLed::new(Output::new(p.PA2, Level::Low, Speed::Low)),
            GpioLed::new(Output::new(p.PA3, Level::Low, Speed::Low)),
        ),
    );

    let button = Input::new(p.PA4, Pull::Down);
    let controller: &'static Controller<Input<'static>> = CONTROLLER.init(Controller::new(button));

    exti::register_interrupt_callback(controller);
    exti::enable_interrupt_line(Port::A, Edge::Rising);
    defmt::info!("request button armed on EXTI{}", exti::BUTTON_LINE);

    let mut sequencer = controller.sequencer(lamps, Delay);
    match sequencer.run() {
        Ok(never) => match never {},
        Err(Error::Lamp { lamp, .. }) => defmt::panic!("lamp fault on {}", lamp),
        Err(Error::Button(_)) => defmt::panic!("button fault"),
    }
}
