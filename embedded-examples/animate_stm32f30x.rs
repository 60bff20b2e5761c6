//! Full example code for playing a frame-diff animation on a PCD8544 display. This runs on an
//! STM32F303RE, with a Nokia 5110 module connected to SPI1, PA8 for D/C, and PA9 for /RESET.

#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate panic_abort;
extern crate pcd8544;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use pcd8544 as lcd;
use pcd8544::{DiffEntry, Transition};

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

// Assets below were generated with `gfx::emit` from a two-frame blinker; a real project would
// include the emitted module instead.
static BLINKER_KEY: [u8; 504] = [0x00; 504];
static BLINKER_T1: Transition<'static> = Transition {
    delay_ms: 500,
    changes: &[
        DiffEntry { addr: 126, value: 0x3c }, DiffEntry { addr: 127, value: 0x3c },
    ],
};
static BLINKER_T2: Transition<'static> = Transition {
    delay_ms: 500,
    changes: &[
        DiffEntry { addr: 126, value: 0x00 }, DiffEntry { addr: 127, value: 0x00 },
    ],
};
static BLINKER_RING: [Transition<'static>; 2] = [BLINKER_T1, BLINKER_T2];

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7. The PCD8544 tops out at
    // 4Mbit/s.
    let disp_sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let disp_spi = spi::Spi::spi1(
        dp.SPI1,
        (disp_sck, disp_miso, disp_mosi),
        hal_api::spi::Mode {
            polarity: hal_api::spi::Polarity::IdleLow,
            phase: hal_api::spi::Phase::CaptureOnFirstTransition,
        },
        4.mhz(),
        clocks,
        &mut rcc.apb2,
    );

    // PA8 will be the D/C push-pull output.
    let disp_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA9 is the display's /RESET pin. The pcd8544 library does not control this pin; we will
    // assert reset separately.
    let mut disp_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // Create the SpiInterface and Display.
    let mut disp = lcd::Display::new(
        lcd::SpiInterface::new(disp_spi, disp_dc),
        lcd::PixelCoord(84, 48),
    )
    .unwrap();

    // Assert the display's /RESET for 10ms.
    disp_rst.set_low();
    delay.delay_ms(10_u16);
    disp_rst.set_high();

    // Initialize the display. Bias 4 suits the 1:48 multiplex rate of this panel; the operating
    // voltage is the value the module's datasheet recommends and usually needs per-unit tuning.
    disp.init(lcd::Config::new(4, 0x3F).temp_coefficient(0))
        .unwrap();

    // Set up playback over a statically allocated RAM mirror, then run the blinker forever. The
    // two-entry transitions are far below the ~100-change break-even, so targeted updates win.
    static mut SHADOW: [u8; 504] = [0x00; 504];
    let shadow = lcd::ShadowMemory::new(unsafe { &mut SHADOW }, 84).unwrap();
    let animation = lcd::Animation {
        keyframe: &BLINKER_KEY,
        transitions: &BLINKER_RING,
    };
    let mut player =
        lcd::Player::new(animation, shadow, lcd::UpdateStrategy::Targeted).unwrap();

    player.start(&mut disp).unwrap();
    loop {
        let dwell = player.step(&mut disp).unwrap();
        delay.delay_ms(dwell);
    }
}
