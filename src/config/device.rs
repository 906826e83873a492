/// EUI-64 (8 bytes)
pub type Eui64 = [u8; 8];
/// AES-128 key (16 bytes)
pub type AesKey = [u8; 16];
/// Device address (4 bytes)
pub type DevAddr = [u8; 4];

/// Radio operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoraMode {
    /// Raw LoRa modulation, no MAC layer (diagnostics and spectrum tools)
    Raw,
    /// Full LoRaWAN stack
    Lorawan,
}

/// Regional band plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoraRegion {
    /// Europe, 863-870 MHz
    Eu868,
    /// North America, 902-928 MHz
    Us915,
}

/// LoRaWAN device class, defining the receive-window policy after an uplink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Class A: two receive windows after each uplink
    A,
    /// Class B: scheduled receive slots (beaconing)
    B,
    /// Class C: continuously listening except when transmitting
    C,
}

/// Forward error correction coding rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingRate {
    /// 4/5
    Cr4_5,
    /// 4/6
    Cr4_6,
    /// 4/7
    Cr4_7,
    /// 4/8
    Cr4_8,
}

/// Radio configuration, fixed after [`Radio::configure`] except via explicit
/// reconfiguration.
///
/// [`Radio::configure`]: crate::radio::traits::Radio::configure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioParameters {
    /// Operating mode
    pub mode: LoraMode,
    /// Regional band plan
    pub region: LoraRegion,
    /// Device class
    pub device_class: DeviceClass,
    /// Adaptive data rate
    pub adr: bool,
    /// Coding rate
    pub coding_rate: CodingRate,
    /// Upper bound on a blocking OTAA join, in milliseconds
    pub join_timeout_ms: u32,
    /// Data rate used for the join request
    pub join_data_rate: u8,
    /// Data rate used for uplinks
    pub data_rate: u8,
    /// Radio-level transmission retries for confirmed uplinks
    pub tx_retries: u8,
}

impl Default for RadioParameters {
    fn default() -> Self {
        Self {
            mode: LoraMode::Lorawan,
            region: LoraRegion::Eu868,
            device_class: DeviceClass::A,
            adr: false,
            coding_rate: CodingRate::Cr4_5,
            join_timeout_ms: 60_000,
            join_data_rate: 4,
            data_rate: 5, // SF7BW125
            tx_retries: 2,
        }
    }
}

/// Activation keys; exactly one variant is provisioned per device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationKeys {
    /// Over-the-air activation: session derived through a join handshake
    Otaa {
        /// Application EUI
        app_eui: Eui64,
        /// Application root key
        app_key: AesKey,
    },
    /// Activation by personalization: pre-shared session, no handshake
    Abp {
        /// Device address
        dev_addr: DevAddr,
        /// Network session key
        nwk_skey: AesKey,
        /// Application session key
        app_skey: AesKey,
    },
}

impl ActivationKeys {
    /// Human-readable activation mode label
    pub fn mode_name(&self) -> &'static str {
        match self {
            ActivationKeys::Otaa { .. } => "OTAA",
            ActivationKeys::Abp { .. } => "ABP",
        }
    }
}

/// Full device configuration for a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Radio parameters applied at start
    pub radio: RadioParameters,
    /// Provisioned activation keys
    pub keys: ActivationKeys,
    /// Ask the network to acknowledge uplinks sent via
    /// [`NoiseDevice::send_uplink`]
    ///
    /// [`NoiseDevice::send_uplink`]: crate::device::NoiseDevice::send_uplink
    pub confirmed_uplinks: bool,
    /// Consecutive delivery failures that force a rejoin
    pub rejoin_threshold: u32,
    /// Deep-sleep interval after a completed uplink, in milliseconds;
    /// 0 disables sleeping (interactive/diagnostic profiles)
    pub deepsleep_ms: u32,
}

impl DeviceConfig {
    /// Create a new OTAA device configuration
    pub fn new_otaa(app_eui: Eui64, app_key: AesKey) -> Self {
        Self {
            radio: RadioParameters::default(),
            keys: ActivationKeys::Otaa { app_eui, app_key },
            confirmed_uplinks: true,
            rejoin_threshold: 3,
            deepsleep_ms: 0,
        }
    }

    /// Create a new ABP device configuration
    pub fn new_abp(dev_addr: DevAddr, nwk_skey: AesKey, app_skey: AesKey) -> Self {
        Self {
            radio: RadioParameters::default(),
            keys: ActivationKeys::Abp {
                dev_addr,
                nwk_skey,
                app_skey,
            },
            confirmed_uplinks: true,
            rejoin_threshold: 3,
            deepsleep_ms: 0,
        }
    }
}
