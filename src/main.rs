#![no_std]
#![no_main]

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Instant, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use pinetime_watchface::{
    config::{BACKLIGHT_LEVEL, DEFAULT_HOUR_FORMAT, EVENT_QUEUE_DEPTH, TIMEZONE_OFFSET_SECS},
    peripherals::{
        display::{BacklightPins, Display},
        vibrator::{SignalHaptics, Vibrator},
    },
    system::{
        bluetooth::{self, BleLink, Server},
        config::embassy_config,
        time::{HourFormat, TickUnit, TimeManager, TimeReference},
        Clock, Connectivity, Haptics,
    },
    ui::resources::{Bitmap, FlashResources, Font, FontId, ImageId, ResourceStore},
    DefaultWatchface, Event, WatchFace, WatchFaceConfig,
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, EVENT_QUEUE_DEPTH> = Channel::new();
static NOTIFY: Signal<ThreadModeRawMutex, ()> = Signal::new();

static CLOCK: StaticCell<TimeManager> = StaticCell::new();

/// Host services handed to the watch face
struct Device {
    clock: &'static TimeManager,
    link: BleLink,
    haptics: SignalHaptics,
    resources: FlashResources,
}

impl Clock for Device {
    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn hour_format(&self) -> HourFormat {
        self.clock.hour_format()
    }
}

impl Connectivity for Device {
    fn is_connected(&self) -> bool {
        self.link.is_connected()
    }
}

impl Haptics for Device {
    fn long_pulse(&mut self) {
        self.haptics.long_pulse();
    }
}

impl ResourceStore for Device {
    fn load_bitmap(&mut self, id: ImageId) -> Bitmap {
        self.resources.load_bitmap(id)
    }

    fn destroy_bitmap(&mut self, bitmap: Bitmap) {
        self.resources.destroy_bitmap(bitmap);
    }

    fn load_font(&mut self, id: FontId) -> Font {
        self.resources.load_font(id)
    }

    fn unload_font(&mut self, font: Font) {
        self.resources.unload_font(font);
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise and track the phone connection
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: Server, clock: &'static TimeManager) -> ! {
    bluetooth::run(sd, &server, clock.hour_format_setting(), EVENTS.sender()).await
}

/// Run the vibration motor whenever a pulse is signaled
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        NOTIFY.wait().await;
        vibrator.long_pulse().await;
    }
}

/// Deliver a tick at every boundary of `unit`
#[embassy_executor::task(pool_size = 1)]
async fn ticker(clock: &'static TimeManager, unit: TickUnit) {
    loop {
        let wait = unit.secs_until_next(clock.now());
        Timer::after(Duration::from_secs(wait as u64)).await;

        let now = clock.now();
        defmt::debug!("Tick at {}:{}", now.hour(), now.minute());
        EVENTS.send(Event::Tick(now)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(embassy_config());
    defmt::info!("Initializing");

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server = unwrap!(Server::new(sd));
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Initialize time keeping
    let clock: &'static TimeManager = CLOCK.init(TimeManager::init(
        TimeReference::from_epoch(UTC_EPOCH, Instant::now().as_micros()),
        TIMEZONE_OFFSET_SECS,
        DEFAULT_HOUR_FORMAT,
    ));
    server.publish_settings(clock.hour_format_setting());

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let backlight = BacklightPins::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
    );
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        backlight,
    ));

    // Load the watch face
    let config = WatchFaceConfig::default();
    let mut device = Device {
        clock,
        link: BleLink,
        haptics: SignalHaptics::new(&NOTIFY),
        resources: FlashResources::new(config.profile),
    };
    let mut face = DefaultWatchface::new(config);
    face.load(&mut device);
    unwrap!(display.render(&face));
    unwrap!(display.set_brightness(BACKLIGHT_LEVEL));

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(bluetooth_task(sd, server, clock)));
    unwrap!(spawner.spawn(notify(vibrator)));
    if let Some(unit) = face.subscriptions().tick {
        unwrap!(spawner.spawn(ticker(clock, unit)));
    }

    // Event loop, the watch face is never unloaded on the device
    loop {
        let event = EVENTS.receive().await;
        if face.handle_event(event, &mut device) {
            if let Err(e) = display.render(&face) {
                defmt::warn!("Redraw failed: {}", e);
            }
        }
    }
}
