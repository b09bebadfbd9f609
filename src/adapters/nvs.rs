//! NVS (Non-Volatile Storage) settings adapter.
//!
//! Implements [`SettingsPort`] over ESP-IDF NVS: the three selection
//! bytes live as `u8` entries in the `luxmeter` namespace, one key per
//! address, so each write is a single atomic `nvs_commit`. The meter
//! configuration travels as one postcard blob in the same namespace.
//!
//! The simulation backend (host tests) keeps everything in a `HashMap`.

use log::{info, warn};

use crate::app::ports::SettingsPort;
use crate::config::MeterConfig;
use crate::error::StorageError;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const NAMESPACE: &str = "luxmeter";

/// Key for the selection byte at `addr`: `sel0`, `sel1`, `sel2`.
#[cfg(target_os = "espidf")]
fn selection_key(addr: u8) -> [u8; 5] {
    [b's', b'e', b'l', b'0' + addr, 0]
}

#[cfg(target_os = "espidf")]
const CONFIG_KEY: &[u8] = b"mcfg\0";

#[cfg(target_os = "espidf")]
const MAX_CONFIG_BLOB: usize = 256;

pub struct NvsSettings {
    #[cfg(not(target_os = "espidf"))]
    bytes: HashMap<u8, u8>,
    #[cfg(not(target_os = "espidf"))]
    config_blob: Option<Vec<u8>>,
}

impl NvsSettings {
    /// Initialise NVS flash and open the settings backend.
    ///
    /// On first boot or after an IDF version bump the partition is erased
    /// and re-initialised automatically, matching stock ESP-IDF practice.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(StorageError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsSettings: ESP-IDF NVS initialised");
            Ok(Self {})
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("NvsSettings: simulation backend");
            Ok(Self {
                bytes: HashMap::new(),
                config_blob: None,
            })
        }
    }

    /// Open the namespace, run a closure with the handle, close it again.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    /// Load the meter configuration blob, falling back to defaults when
    /// absent or corrupt.
    pub fn load_config(&self) -> MeterConfig {
        #[cfg(not(target_os = "espidf"))]
        {
            match &self.config_blob {
                Some(bytes) => match postcard::from_bytes(bytes) {
                    Ok(cfg) => {
                        info!("NvsSettings: loaded config from store");
                        cfg
                    }
                    Err(_) => {
                        warn!("NvsSettings: stored config corrupt, using defaults");
                        MeterConfig::default()
                    }
                },
                None => {
                    info!("NvsSettings: no stored config, using defaults");
                    MeterConfig::default()
                }
            }
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let mut size: usize = 0;
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        CONFIG_KEY.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret != ESP_OK || size == 0 || size > MAX_CONFIG_BLOB {
                    return Err(ret);
                }

                let mut buf = vec![0u8; size];
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        CONFIG_KEY.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(buf)
            });

            match result {
                Ok(bytes) => match postcard::from_bytes(&bytes) {
                    Ok(cfg) => {
                        info!("NvsSettings: loaded config from NVS ({} bytes)", bytes.len());
                        cfg
                    }
                    Err(_) => {
                        warn!("NvsSettings: stored config corrupt, using defaults");
                        MeterConfig::default()
                    }
                },
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => {
                    info!("NvsSettings: no stored config, using defaults");
                    MeterConfig::default()
                }
                Err(e) => {
                    warn!("NvsSettings: NVS config read error {}, using defaults", e);
                    MeterConfig::default()
                }
            }
        }
    }

    /// Persist the meter configuration blob.
    pub fn save_config(&mut self, config: &MeterConfig) -> Result<(), StorageError> {
        let bytes = postcard::to_allocvec(config).map_err(|_| StorageError::IoError)?;

        #[cfg(not(target_os = "espidf"))]
        {
            self.config_blob = Some(bytes);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        CONFIG_KEY.as_ptr() as *const _,
                        bytes.as_ptr() as *const _,
                        bytes.len(),
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsSettings: config saved to NVS ({} bytes)", bytes.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsSettings: NVS config write error {}", e);
                    Err(StorageError::IoError)
                }
            }
        }
    }
}

impl SettingsPort for NvsSettings {
    fn load_byte(&self, addr: u8) -> Result<u8, StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.bytes.get(&addr).copied().ok_or(StorageError::NotFound)
        }

        #[cfg(target_os = "espidf")]
        {
            let key = selection_key(addr);
            let result = Self::with_nvs_handle(false, |handle| {
                let mut value: u8 = 0;
                let ret = unsafe { nvs_get_u8(handle, key.as_ptr() as *const _, &mut value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(value)
            });
            match result {
                Ok(value) => Ok(value),
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Err(StorageError::NotFound),
                Err(_) => Err(StorageError::IoError),
            }
        }
    }

    fn save_byte(&mut self, addr: u8, value: u8) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.bytes.insert(addr, value);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let key = selection_key(addr);
            let result = Self::with_nvs_handle(true, |handle| {
                let ret = unsafe { nvs_set_u8(handle, key.as_ptr() as *const _, value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            result.map_err(|_| StorageError::IoError)
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::selection::{APERTURE_ADDR, ISO_ADDR, MODE_ADDR};

    #[test]
    fn byte_round_trip_per_address() {
        let mut nvs = NvsSettings::new().unwrap();
        nvs.save_byte(APERTURE_ADDR, 4).unwrap();
        nvs.save_byte(ISO_ADDR, 2).unwrap();
        nvs.save_byte(MODE_ADDR, 1).unwrap();

        assert_eq!(nvs.load_byte(APERTURE_ADDR).unwrap(), 4);
        assert_eq!(nvs.load_byte(ISO_ADDR).unwrap(), 2);
        assert_eq!(nvs.load_byte(MODE_ADDR).unwrap(), 1);
    }

    #[test]
    fn unwritten_address_is_not_found() {
        let nvs = NvsSettings::new().unwrap();
        assert_eq!(nvs.load_byte(APERTURE_ADDR), Err(StorageError::NotFound));
    }

    #[test]
    fn overwrite_replaces_previous_value() {
        let mut nvs = NvsSettings::new().unwrap();
        nvs.save_byte(ISO_ADDR, 1).unwrap();
        nvs.save_byte(ISO_ADDR, 5).unwrap();
        assert_eq!(nvs.load_byte(ISO_ADDR).unwrap(), 5);
    }

    #[test]
    fn config_blob_round_trips() {
        let mut nvs = NvsSettings::new().unwrap();
        assert_eq!(nvs.load_config(), MeterConfig::default());

        let cfg = MeterConfig {
            battery_cells: 2,
            long_press_ms: 900,
            ..MeterConfig::default()
        };
        nvs.save_config(&cfg).unwrap();
        assert_eq!(nvs.load_config(), cfg);
    }

    #[test]
    fn corrupt_config_blob_falls_back_to_defaults() {
        let mut nvs = NvsSettings::new().unwrap();
        nvs.config_blob = Some(vec![0xFF; 3]);
        assert_eq!(nvs.load_config(), MeterConfig::default());
    }
}
