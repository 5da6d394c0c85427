use glam::DVec3;
use log::debug;
use serde::{Deserialize, Serialize};

const GPS_TAG: &str = "GPS";
const MIN_FIELDS: usize = 5;

/// Named world-space coordinate parsed from one `GPS:` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsMark {
    pub name: String,
    pub coords: DVec3,
}

impl GpsMark {
    pub fn new(name: impl Into<String>, coords: DVec3) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }

    /// Whether the line is a waypoint candidate.
    pub fn is_gps_line(line: &str) -> bool {
        line.starts_with(GPS_TAG)
    }

    /// Parses `GPS:name:x:y:z[:color:...]`. Extra trailing fields are
    /// ignored; a missing field or unparseable coordinate yields `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < MIN_FIELDS || fields[0] != GPS_TAG {
            return None;
        }
        let x = fields[2].trim().parse::<f64>().ok()?;
        let y = fields[3].trim().parse::<f64>().ok()?;
        let z = fields[4].trim().parse::<f64>().ok()?;
        Some(Self::new(fields[1], DVec3::new(x, y, z)))
    }
}

/// Extracts every well-formed waypoint from a free-text blob, preserving
/// input order. Non-GPS lines are ignored and malformed GPS lines are
/// dropped rather than aborting the batch.
pub fn parse_custom_data(text: &str) -> Vec<GpsMark> {
    let mut marks = Vec::new();
    for line in text.lines().filter(|line| !line.is_empty()) {
        if !GpsMark::is_gps_line(line) {
            continue;
        }
        match GpsMark::from_line(line) {
            Some(mark) => marks.push(mark),
            None => debug!("Skipping malformed GPS line: {line}"),
        }
    }
    marks
}
