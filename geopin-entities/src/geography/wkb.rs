use super::InvalidGeography;
use crate::geo::Coordinate;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{self, Cursor};

/// Hex length of a 2D point: byte order + type + x + y.
const POINT_HEX_LEN: usize = 2 * (1 + 4 + 2 * 8);
/// Hex length of a 2D point with an embedded SRID.
const POINT_WITH_SRID_HEX_LEN: usize = POINT_HEX_LEN + 2 * 4;

const WKB_LITTLE_ENDIAN: u8 = 1;
const EWKB_SRID_FLAG: u32 = 0x2000_0000;
const WKB_TYPE_POINT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endianness {
    BigEndian,
    LittleEndian,
}

impl From<u8> for Endianness {
    fn from(value: u8) -> Self {
        // Anything but the little endian marker is read as big endian.
        match value {
            WKB_LITTLE_ENDIAN => Endianness::LittleEndian,
            _ => Endianness::BigEndian,
        }
    }
}

impl From<io::Error> for InvalidGeography {
    fn from(_: io::Error) -> Self {
        InvalidGeography::Truncated
    }
}

/// Decodes a hex encoded WKB or EWKB point, optionally prefixed with `0x`.
pub fn point_from_hex(hex: &str) -> Result<Coordinate, InvalidGeography> {
    let buf = decode_hex(strip_hex_prefix(hex))?;
    point_from_bytes(&buf)
}

fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, InvalidGeography> {
    if hex.len() != POINT_HEX_LEN && hex.len() != POINT_WITH_SRID_HEX_LEN {
        return Err(InvalidGeography::HexLength(hex.len()));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidGeography::HexDigit);
    }
    // All ASCII, so every two byte step is a char boundary.
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidGeography::HexDigit)
        })
        .collect()
}

fn point_from_bytes(buf: &[u8]) -> Result<Coordinate, InvalidGeography> {
    let mut reader = Cursor::new(buf);
    let byte_order = Endianness::from(reader.read_u8()?);
    let wkb_type = read_u32(&mut reader, byte_order)?;
    let geometry_type = wkb_type & 0xFF;
    if geometry_type != WKB_TYPE_POINT {
        return Err(InvalidGeography::GeometryType(geometry_type));
    }
    if wkb_type & EWKB_SRID_FLAG != 0 {
        // The SRID is skipped, only the position matters.
        read_u32(&mut reader, byte_order)?;
    }
    let x = read_f64(&mut reader, byte_order)?;
    let y = read_f64(&mut reader, byte_order)?;
    Ok(Coordinate::from_lng_lat(x, y))
}

fn read_u32(reader: &mut Cursor<&[u8]>, byte_order: Endianness) -> io::Result<u32> {
    match byte_order {
        Endianness::BigEndian => reader.read_u32::<BigEndian>(),
        Endianness::LittleEndian => reader.read_u32::<LittleEndian>(),
    }
}

fn read_f64(reader: &mut Cursor<&[u8]>, byte_order: Endianness) -> io::Result<f64> {
    match byte_order {
        Endianness::BigEndian => reader.read_f64::<BigEndian>(),
        Endianness::LittleEndian => reader.read_f64::<LittleEndian>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SRID=4326;POINT(13.4 52.52) as delivered by PostGIS
    const BERLIN_EWKB: &str = "0101000020E6100000CDCCCCCCCCCC2A40C3F5285C8F424A40";
    // POINT(13.4 52.52)
    const BERLIN_WKB: &str = "0101000000CDCCCCCCCCCC2A40C3F5285C8F424A40";

    #[test]
    fn hex_lengths() {
        assert_eq!(42, POINT_HEX_LEN);
        assert_eq!(50, POINT_WITH_SRID_HEX_LEN);
        assert_eq!(POINT_HEX_LEN, BERLIN_WKB.len());
        assert_eq!(POINT_WITH_SRID_HEX_LEN, BERLIN_EWKB.len());
    }

    #[test]
    fn decode_postgis_point() {
        let expected = Coordinate::new(52.52, 13.4);
        assert_eq!(Ok(expected), point_from_hex(BERLIN_WKB));
        assert_eq!(Ok(expected), point_from_hex(BERLIN_EWKB));
        assert_eq!(Ok(expected), point_from_hex(&BERLIN_EWKB.to_lowercase()));
        assert_eq!(Ok(expected), point_from_hex(&format!("0x{BERLIN_EWKB}")));
        assert_eq!(Ok(expected), point_from_hex(&format!("0X{BERLIN_WKB}")));
    }

    #[test]
    fn endianness_flag() {
        assert_eq!(Endianness::LittleEndian, Endianness::from(1));
        assert_eq!(Endianness::BigEndian, Endianness::from(0));
        assert_eq!(Endianness::BigEndian, Endianness::from(7));
    }

    #[test]
    fn decode_hex_pairs() {
        let buf = decode_hex(BERLIN_WKB).unwrap();
        assert_eq!(21, buf.len());
        assert_eq!([0x01, 0x01, 0x00, 0x00, 0x00, 0xCD], buf[..6]);
        assert_eq!(buf, decode_hex(&BERLIN_WKB.to_lowercase()).unwrap());
        let mut signed = BERLIN_WKB.to_string();
        signed.replace_range(0..1, "+");
        assert_eq!(Err(InvalidGeography::HexDigit), decode_hex(&signed));
    }

    #[test]
    fn reject_invalid_hex() {
        assert_eq!(
            Err(InvalidGeography::HexLength(40)),
            point_from_hex(&BERLIN_WKB[..40])
        );
        assert_eq!(
            Err(InvalidGeography::HexLength(0)),
            point_from_hex("0x")
        );
        let mut not_hex = BERLIN_WKB.to_string();
        not_hex.replace_range(10..11, "G");
        assert_eq!(Err(InvalidGeography::HexDigit), point_from_hex(&not_hex));
        // A multi-byte character must not split a hex pair.
        let mut not_ascii = BERLIN_WKB[..40].to_string();
        not_ascii.push('é');
        assert_eq!(42, not_ascii.len());
        assert_eq!(Err(InvalidGeography::HexDigit), point_from_hex(&not_ascii));
    }

    #[test]
    fn reject_srid_flag_without_srid() {
        // 42 hex digits but the SRID flag claims 4 more bytes
        let hex = "0101000020E6100000CDCCCCCCCCCC2A40C3F5285C";
        assert_eq!(POINT_HEX_LEN, hex.len());
        assert_eq!(Err(InvalidGeography::Truncated), point_from_hex(hex));
    }

    #[test]
    fn reject_other_geometry_types() {
        // LineString type code in a point-sized buffer
        let hex = "0102000000CDCCCCCCCCCC2A40C3F5285C8F424A40";
        assert_eq!(Err(InvalidGeography::GeometryType(2)), point_from_hex(hex));
        // ISO PointZ (1001) has low byte 0xE9
        let hex = "01E9030000CDCCCCCCCCCC2A40C3F5285C8F424A40";
        assert_eq!(
            Err(InvalidGeography::GeometryType(0xE9)),
            point_from_hex(hex)
        );
    }
}
