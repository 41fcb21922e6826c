//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz). Matches the host's update event rate.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Waypoint path ---

/// Entity moved along the waypoint path.
pub const AIRCRAFT_PATH: &str = "/World/Aircraft";

/// Waypoint entities, in path order.
pub const WAYPOINT_PATHS: [&str; 8] = [
    "/World/Waypoints/Waypoint_10",
    "/World/Waypoints/Waypoint_20",
    "/World/Waypoints/Waypoint_30",
    "/World/Waypoints/Waypoint_40",
    "/World/Waypoints/Waypoint_50",
    "/World/Waypoints/Waypoint_60",
    "/World/Waypoints/Waypoint_70",
    "/World/Waypoints/Waypoint_80",
];

/// Waypoint (X, Y, Z) rotation maps to aircraft (X, Z, Y).
pub const AXIS_MAP: [usize; 3] = [0, 2, 1];

// --- RF visualization ---

/// Parent entity scanned for towers.
pub const TOWER_CONTAINER: &str = "/World/Towers";

/// Children of the tower container whose name starts with this are towers.
pub const TOWER_PREFIX: &str = "Tower_";

/// Antennas that get a tower link drawn.
pub const RF_ANTENNAS: [&str; 2] = [
    "/World/Aircraft/Antennas/ANT_VHF_COMM_TOP",
    "/World/Aircraft/Antennas/ANT_VHF_COMM_BOTTOM",
];

/// Links at or inside this distance are in the ON band.
pub const DISTANCE_NEAR: f64 = 15_000.0;

/// Links at or inside this distance (and beyond near) are in the DEGRADED band.
pub const DISTANCE_MEDIUM: f64 = 40_000.0;

/// Line width floor is reached at this multiple of the medium threshold.
pub const WIDTH_FLOOR_FACTOR: f64 = 1.5;

pub const RAY_WIDTH_MAX: f64 = 8.0;
pub const RAY_WIDTH_MIN: f64 = 2.0;

/// Blocked/clear counters reset every this many RF frames.
pub const RF_REPORT_INTERVAL_TICKS: u64 = 60;

// --- Zone monitor ---

/// Parent entity of every antenna.
pub const ANTENNA_ROOT: &str = "/World/Aircraft/Antennas";

pub const BLOCKING_VOLUME: &str = "/World/Volumes/RF_BLOCKING_VOLUME";
pub const ATTENUATION_VOLUME: &str = "/World/Volumes/RF_ATTENUATION_VOLUME";
pub const SECURE_VOLUME: &str = "/World/Volumes/SECURE_ZONE_VOLUME";

/// Zone monitor logs a heartbeat every this many frames.
pub const ZONE_HEARTBEAT_TICKS: u64 = 60;

// --- Attribute defaults ---

pub const DEFAULT_FREQUENCY_BAND: &str = "N/A";
pub const DEFAULT_ANTENNA_TYPE: &str = "UNKNOWN";
