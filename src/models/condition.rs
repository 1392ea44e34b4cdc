//! WMO weather-code translation

/// Fallback phrase for weather codes not in the table
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Convert a WMO weather code to a human-readable description
///
/// Covers the common subset reported by Open-Meteo; see
/// <https://open-meteo.com/en/docs> for the full code reference.
#[must_use]
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Rain showers (slight)",
        81 => "Rain showers (moderate)",
        82 => "Rain showers (violent)",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_CONDITION,
    }
}
