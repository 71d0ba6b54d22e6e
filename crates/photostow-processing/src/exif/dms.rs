use thiserror::Error;

use photostow_core::GpsCoordinates;

#[derive(Debug, Error)]
pub enum DmsParseError {
    #[error("expected two DMS components, got: {0:?}")]
    MalformedPair(String),
    #[error("malformed DMS component: {0:?}")]
    MalformedComponent(String),
    #[error("invalid number in DMS component: {0:?}")]
    InvalidNumber(String),
    #[error("invalid hemisphere letter: {0:?}")]
    InvalidHemisphere(char),
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Parse a sexagesimal coordinate pair into signed decimal degrees.
///
/// Input format: `D:M:S{N|S} D:M:S{E|W}`, e.g. `51:30:0.5486N 0:7:34.4504W`.
/// The first component must carry a latitude hemisphere and the second a
/// longitude hemisphere; south and west are negative.
pub fn parse_dms(input: &str) -> Result<GpsCoordinates, DmsParseError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(DmsParseError::MalformedPair(input.to_string()));
    }

    let (lat_value, lat_hemisphere) = parse_component(parts[0])?;
    let (lon_value, lon_hemisphere) = parse_component(parts[1])?;

    let lat = match lat_hemisphere {
        'N' => lat_value,
        'S' => -lat_value,
        other => return Err(DmsParseError::InvalidHemisphere(other)),
    };
    let lon = match lon_hemisphere {
        'E' => lon_value,
        'W' => -lon_value,
        other => return Err(DmsParseError::InvalidHemisphere(other)),
    };

    if lat.abs() > 90.0 {
        return Err(DmsParseError::OutOfRange(format!("latitude {}", lat)));
    }
    if lon.abs() > 180.0 {
        return Err(DmsParseError::OutOfRange(format!("longitude {}", lon)));
    }

    Ok(GpsCoordinates::new(lat, lon))
}

/// Parse one `D:M:S{letter}` component into unsigned decimal degrees and
/// its hemisphere letter.
fn parse_component(component: &str) -> Result<(f64, char), DmsParseError> {
    let hemisphere = component
        .chars()
        .last()
        .ok_or_else(|| DmsParseError::MalformedComponent(component.to_string()))?;
    if !hemisphere.is_ascii_alphabetic() {
        return Err(DmsParseError::MalformedComponent(component.to_string()));
    }

    let body = &component[..component.len() - hemisphere.len_utf8()];
    let fields: Vec<&str> = body.split(':').collect();
    if fields.len() != 3 {
        return Err(DmsParseError::MalformedComponent(component.to_string()));
    }

    let mut numbers = [0f64; 3];
    for (slot, raw) in numbers.iter_mut().zip(&fields) {
        *slot = raw
            .parse::<f64>()
            .map_err(|_| DmsParseError::InvalidNumber(raw.to_string()))?;
        // f64::parse accepts NaN/inf, which a zero-denominator GPS
        // rational produces; neither may reach the decimal output.
        if !slot.is_finite() || *slot < 0.0 {
            return Err(DmsParseError::OutOfRange(raw.to_string()));
        }
    }

    let [degrees, minutes, seconds] = numbers;
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(DmsParseError::OutOfRange(body.to_string()));
    }

    Ok((degrees + minutes / 60.0 + seconds / 3600.0, hemisphere))
}
