//! Static antenna registry.
//!
//! Reference data only: the antenna's live attributes (type, band, LOS
//! requirement, lock flag, state) come from the scene.

/// One entry of the on-board antenna registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntennaSpec {
    pub name: &'static str,
    /// Multi-line description shown as the dashboard tooltip.
    pub description: &'static str,
}

pub const ANTENNAS: [AntennaSpec; 10] = [
    AntennaSpec {
        name: "ANT_SATCOM_PRIMARY",
        description: "Satellite Communication\n\
            Primary antenna for high-bandwidth satellite connectivity (Ka/Ku/L-band)\n\
            Used for data links, internet, and communications\n\
            with ground stations via satellite",
    },
    AntennaSpec {
        name: "ANT_GNSS_1",
        description: "Global Navigation Satellite System (Primary GPS)\n\
            Receives signals from GPS, GLONASS, Galileo satellites\n\
            for precise positioning and navigation",
    },
    AntennaSpec {
        name: "ANT_GNSS_2",
        description: "Global Navigation Satellite System (Redundant GPS)\n\
            Backup GNSS receiver for navigation redundancy\n\
            and increased accuracy through dual-receiver configuration",
    },
    AntennaSpec {
        name: "ANT_VHF_COMM_TOP",
        description: "VHF Communication (Top Mount)\n\
            Very High Frequency radio for air traffic control communications\n\
            Pilot-to-controller voice communications (118-137 MHz)",
    },
    AntennaSpec {
        name: "ANT_VHF_COMM_BOTTOM",
        description: "VHF Communication (Bottom/Ground)\n\
            Lower-mounted VHF antenna optimized for ground communications\n\
            and tower contact during taxi and parking",
    },
    AntennaSpec {
        name: "ANT_ATC_TRANSPONDER",
        description: "ATC Transponder\n\
            Automatically responds to radar interrogations from air traffic control\n\
            Transmitting aircraft identification, altitude, and status (Mode A/C/S)",
    },
    AntennaSpec {
        name: "ANT_DME",
        description: "Distance Measuring Equipment\n\
            Measures slant-range distance to ground-based DME beacons\n\
            for navigation, works with VOR stations for position fixing",
    },
    AntennaSpec {
        name: "ANT_WEATHER_RADAR",
        description: "Weather Radar\n\
            X-band forward-looking radar for detecting precipitation,\n\
            turbulence, and weather hazards ahead of the aircraft",
    },
    AntennaSpec {
        name: "ANT_HF_LONG_RANGE",
        description: "HF Long Range Communication\n\
            High Frequency radio for long-distance communication\n\
            over oceans and remote areas where VHF is out of range (3-30 MHz)",
    },
    AntennaSpec {
        name: "ANT_ELT",
        description: "Emergency Locator Transmitter\n\
            Distress beacon that transmits on 406 MHz and 121.5 MHz\n\
            to alert search and rescue services in case of crash or emergency",
    },
];

/// Look up a registry entry by antenna name.
pub fn find(name: &str) -> Option<&'static AntennaSpec> {
    ANTENNAS.iter().find(|antenna| antenna.name == name)
}

/// Tooltip text for an antenna; empty for names outside the registry.
pub fn description(name: &str) -> &'static str {
    find(name).map(|antenna| antenna.description).unwrap_or("")
}

/// Names of every registered antenna, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ANTENNAS.iter().map(|antenna| antenna.name)
}
