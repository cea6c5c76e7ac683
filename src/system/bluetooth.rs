//! Bluetooth module
//!
//! Advertises the watch, accepts one phone connection at a time and reports
//! link changes to the watch face. A connected phone can read and change the
//! 12/24 hour clock preference through the settings service.

use core::{
    mem,
    sync::atomic::{AtomicBool, Ordering},
};

use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Sender};
use embassy_time::Timer;
use nrf_softdevice::{
    ble::{
        advertisement_builder::{Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload},
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

use crate::{
    config::{ADVERTISE_RETRY_MS, DEVICE_NAME, EVENT_QUEUE_DEPTH},
    system::{
        time::{HourFormat, HourFormatSetting},
        Connectivity,
    },
    ui::Event,
};

/// Link state, written by the connection loop only
static CONNECTED: AtomicBool = AtomicBool::new(false);

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(DEVICE_NAME)
    .build();

/// Scan response, nothing beyond the advertising payload to report
pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub settings: SettingsService,
}

/// Watch settings a phone may change
#[nrf_softdevice::gatt_service(uuid = "b2f1d9a0-6c3e-4f52-9a0e-7d4c1e8b5a10")]
pub struct SettingsService {
    /// `1` for 24 hour clock, `0` for 12 hour clock
    #[characteristic(uuid = "b2f1d9a1-6c3e-4f52-9a0e-7d4c1e8b5a10", read, write)]
    pub hour_mode: u8,
}

impl Server {
    /// Publish the current preferences before a phone can read them
    pub fn publish_settings(&self, hour_format: &HourFormatSetting) {
        if let Err(e) = self.settings.hour_mode_set(&hour_format.get().as_flag()) {
            defmt::warn!("Publishing hour mode failed: {:?}", e);
        }
    }
}

/// Reads the link state shared with [`run`]
pub struct BleLink;

impl Connectivity for BleLink {
    fn is_connected(&self) -> bool {
        CONNECTED.load(Ordering::Relaxed)
    }
}

pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

fn set_connected(connected: bool) {
    CONNECTED.store(connected, Ordering::Relaxed);
}

/// Advertise, serve one connection until it drops, repeat.
pub async fn run(
    sd: &'static Softdevice,
    server: &Server,
    hour_format: &HourFormatSetting,
    events: Sender<'static, ThreadModeRawMutex, Event, EVENT_QUEUE_DEPTH>,
) -> ! {
    let config = peripheral::Config::default();
    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                Timer::after_millis(ADVERTISE_RETRY_MS).await;
                continue;
            }
        };

        defmt::info!("Bluetooth connected");
        set_connected(true);
        events.send(Event::Bluetooth(true)).await;

        // Returns once the peer is gone
        let _ = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Settings(SettingsServiceEvent::HourModeWrite(flag)) => {
                defmt::info!("Hour mode written: {}", flag);
                hour_format.set(HourFormat::from_flag(flag));
            }
        })
        .await;

        defmt::info!("Bluetooth disconnected");
        set_connected(false);
        events.send(Event::Bluetooth(false)).await;
    }
}
