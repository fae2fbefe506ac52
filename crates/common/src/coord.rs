use smallvec::SmallVec;

/// A point on the integer lattice, one component per axis.
///
/// Uses `SmallVec<[i64; 4]>` so coordinates of up to four axes stay inline.
/// Dimensionality is the length; every coordinate in one world must share it.
pub type Coord = SmallVec<[i64; 4]>;

/// Separator between components in a coordinate key.
pub const KEY_DELIMITER: char = ',';

/// Errors from decoding coordinate keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("invalid coordinate key {key:?}: segment {segment:?} is not an integer")]
    InvalidCoordinateKey { key: String, segment: String },
}

/// Encode a coordinate as its canonical key, e.g. `[3, -4]` -> `"3,-4"`.
pub fn format(coord: &[i64]) -> String {
    let mut key = String::with_capacity(coord.len() * 4);
    for (i, part) in coord.iter().enumerate() {
        if i > 0 {
            key.push(KEY_DELIMITER);
        }
        key.push_str(&part.to_string());
    }
    key
}

/// Decode a key produced by [`format`] back into a coordinate.
///
/// Whitespace around segments is tolerated; anything else that is not a
/// signed integer is rejected. The empty key decodes to the zero-axis
/// coordinate, mirroring `format(&[]) == ""`.
pub fn parse(key: &str) -> Result<Coord, CoordError> {
    if key.is_empty() {
        return Ok(Coord::new());
    }
    key.split(KEY_DELIMITER)
        .map(|segment| {
            segment
                .trim()
                .parse::<i64>()
                .map_err(|_| CoordError::InvalidCoordinateKey {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                })
        })
        .collect()
}
