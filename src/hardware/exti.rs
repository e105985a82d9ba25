//! EXTI line 4 binding for the pedestrian button.
//!
//! The line is configured through the PAC instead of `embassy_stm32::exti`,
//! because the request latch has to run inside the interrupt itself, preempting
//! the blocking phase sequencer.

use super::traits::RequestEdgeHandler;
use core::cell::Cell;
use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::pac;
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

/// The button sits on pin 4 of its port.
pub const BUTTON_LINE: usize = 4;

/// AFIO port selection for the line.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

#[derive(Clone, Copy)]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

type Handler = &'static (dyn RequestEdgeHandler + Sync);

static HANDLER: Mutex<CriticalSectionRawMutex, Cell<Option<Handler>>> = Mutex::new(Cell::new(None));

/// Installs the handler invoked from the `EXTI4` interrupt. Replaces any
/// previously registered handler.
pub fn register_interrupt_callback(handler: Handler) {
    HANDLER.lock(|slot| slot.set(Some(handler)));
}

/// Routes `port` pin 4 to EXTI line 4, selects the trigger edge and unmasks
/// the line in both EXTI and the NVIC.
pub fn enable_interrupt_line(port: Port, edge: Edge) {
    let (rising, falling) = match edge {
        Edge::Rising => (true, false),
        Edge::Falling => (false, true),
        Edge::Both => (true, true),
    };

    pac::RCC.apb2enr().modify(|w| w.set_afioen(true));
    pac::AFIO
        .exticr(BUTTON_LINE / 4)
        .modify(|w| w.set_exti(BUTTON_LINE % 4, port as u8));

    pac::EXTI
        .rtsr(0)
        .modify(|w| w.set_line(BUTTON_LINE, rising));
    pac::EXTI
        .ftsr(0)
        .modify(|w| w.set_line(BUTTON_LINE, falling));
    // Drop any edge latched while the pin was being configured
    pac::EXTI.pr(0).write(|w| w.set_line(BUTTON_LINE, true));
    pac::EXTI.imr(0).modify(|w| w.set_line(BUTTON_LINE, true));

    interrupt::EXTI4.unpend();
    unsafe { interrupt::EXTI4.enable() };
}

#[interrupt]
fn EXTI4() {
    pac::EXTI.pr(0).write(|w| w.set_line(BUTTON_LINE, true));

    if let Some(handler) = HANDLER.lock(Cell::get) {
        handler.on_request_edge();
    }
}
