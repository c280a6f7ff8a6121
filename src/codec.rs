//! Binary trajectory file codec.
//!
//! # File Layout
//!
//! ```text
//! offset 0 : u32 LE record_count
//! offset 4 : record_count × record
//! ```
//!
//! | Record | Size | Fields (all little-endian) |
//! |--------|------|----------------------------|
//! | [`MotionPoint`] | 20 bytes | `f32 dx, f32 dy, f32 dz, i32 quadrant, f32 magnitude` |
//! | [`WeatherPoint`] | 12 bytes | `f32 temperature, f32 humidity, f32 pressure` |
//!
//! Every field is written and read explicitly at a fixed offset; the
//! in-memory layout of the Rust structs never reaches the disk.
//!
//! Reads are soft: an unopenable file or a missing header yields an empty
//! result, and a truncated body is cut back to the last complete record.
//! Both cases are logged. Writes surface every failure as
//! [`TrajectoryError::Io`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, TrajectoryError};
use crate::point::{MotionPoint, TrajectoryAverage, WeatherPoint};

/// Size of the record count header.
pub const HEADER_SIZE: usize = 4;

/// Encoded size of a [`MotionPoint`].
pub const MOTION_RECORD_SIZE: usize = 20;

/// Encoded size of a [`WeatherPoint`].
pub const WEATHER_RECORD_SIZE: usize = 12;

/// A fixed-size little-endian record.
pub trait Record: Copy {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write the record into `buf`, which is exactly [`Self::SIZE`] bytes.
    fn encode(&self, buf: &mut [u8]);

    /// Read a record from `buf`, which is exactly [`Self::SIZE`] bytes.
    fn decode(buf: &[u8]) -> Self;
}

#[inline]
fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn word(buf: &[u8], offset: usize) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    bytes
}

#[inline]
fn get_f32(buf: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(word(buf, offset))
}

#[inline]
fn get_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(word(buf, offset))
}

impl Record for MotionPoint {
    const SIZE: usize = MOTION_RECORD_SIZE;

    fn encode(&self, buf: &mut [u8]) {
        put_f32(buf, 0, self.dx);
        put_f32(buf, 4, self.dy);
        put_f32(buf, 8, self.dz);
        put_i32(buf, 12, self.quadrant);
        put_f32(buf, 16, self.magnitude);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            dx: get_f32(buf, 0),
            dy: get_f32(buf, 4),
            dz: get_f32(buf, 8),
            quadrant: get_i32(buf, 12),
            magnitude: get_f32(buf, 16),
        }
    }
}

impl Record for WeatherPoint {
    const SIZE: usize = WEATHER_RECORD_SIZE;

    fn encode(&self, buf: &mut [u8]) {
        put_f32(buf, 0, self.temperature);
        put_f32(buf, 4, self.humidity);
        put_f32(buf, 8, self.pressure);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            temperature: get_f32(buf, 0),
            humidity: get_f32(buf, 4),
            pressure: get_f32(buf, 8),
        }
    }
}

/// Records recovered from an encoded buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<R> {
    /// Complete records, in file order.
    pub records: Vec<R>,

    /// Record count claimed by the header.
    pub declared: u32,
}

impl<R> Decoded<R> {
    /// True when the header promised more records than the body held.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        (self.declared as usize) > self.records.len()
    }
}

/// Decode a count header and as many complete records as `bytes` holds.
///
/// Returns `None` when the buffer is too short for the header. Bytes past
/// the declared count are ignored. A partial trailing record is never
/// emitted.
#[must_use]
pub fn decode_records<R: Record>(bytes: &[u8]) -> Option<Decoded<R>> {
    if bytes.len() < HEADER_SIZE {
        return None;
    }
    let declared = u32::from_le_bytes(word(bytes, 0));

    let records = bytes[HEADER_SIZE..]
        .chunks_exact(R::SIZE)
        .take(declared as usize)
        .map(R::decode)
        .collect();

    Some(Decoded { records, declared })
}

/// Encode a count header followed by every record.
///
/// # Errors
///
/// Returns an error if the writer fails, or if there are more records than
/// a `u32` header can count.
pub fn encode_records<R: Record>(mut writer: impl Write, records: &[R]) -> io::Result<()> {
    let count = u32::try_from(records.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "record count exceeds u32 header")
    })?;
    writer.write_all(&count.to_le_bytes())?;

    let mut buf = vec![0u8; R::SIZE];
    for record in records {
        record.encode(&mut buf);
        writer.write_all(&buf)?;
    }
    Ok(())
}

fn load_records<R: Record>(path: &Path) -> Vec<R> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open trajectory file");
            return Vec::new();
        }
    };

    let Some(decoded) = decode_records::<R>(&bytes) else {
        tracing::warn!(
            path = %path.display(),
            len = bytes.len(),
            "file too short to contain a record count"
        );
        return Vec::new();
    };

    if decoded.is_truncated() {
        tracing::warn!(
            path = %path.display(),
            declared = decoded.declared,
            complete = decoded.records.len(),
            "file truncated, keeping complete records only"
        );
    } else {
        tracing::debug!(path = %path.display(), count = decoded.declared, "loaded records");
    }
    decoded.records
}

fn check_count(path: &Path, len: usize) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(TrajectoryError::invalid_input(format!(
            "{len} records for {} exceed the u32 count header",
            path.display()
        )));
    }
    Ok(())
}

fn store_records<R: Record>(path: &Path, records: &[R]) -> Result<()> {
    check_count(path, records.len())?;

    let file = File::create(path).map_err(|e| TrajectoryError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    encode_records(&mut writer, records).map_err(|e| TrajectoryError::io(path, e))?;
    writer.flush().map_err(|e| TrajectoryError::io(path, e))?;

    tracing::debug!(path = %path.display(), count = records.len(), "wrote records");
    Ok(())
}

/// Read every complete [`MotionPoint`] from a trajectory file.
///
/// Never fails: a missing or unreadable file yields an empty vector.
pub fn read_points(path: impl AsRef<Path>) -> Vec<MotionPoint> {
    load_records(path.as_ref())
}

/// Write `points` to `path`, replacing any existing file in place.
///
/// # Errors
///
/// Returns [`TrajectoryError::Io`] if the destination cannot be created or
/// written. A failed write may leave a partial file behind; use
/// [`write_points_atomic`] when that matters.
pub fn write_points(path: impl AsRef<Path>, points: &[MotionPoint]) -> Result<()> {
    store_records(path.as_ref(), points)
}

/// Write `points` to a temporary sibling of `path`, then rename it over
/// `path`.
///
/// Readers observe either the old file or the complete new one. The bytes
/// are identical to [`write_points`].
///
/// # Errors
///
/// Returns [`TrajectoryError::Io`] if the temporary file cannot be created,
/// written, synced or renamed.
pub fn write_points_atomic(path: impl AsRef<Path>, points: &[MotionPoint]) -> Result<()> {
    let path = path.as_ref();
    check_count(path, points.len())?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TrajectoryError::io(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_records(&mut writer, points).map_err(|e| TrajectoryError::io(path, e))?;
        writer.flush().map_err(|e| TrajectoryError::io(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| TrajectoryError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| TrajectoryError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), count = points.len(), "atomically replaced records");
    Ok(())
}

/// Read every complete [`WeatherPoint`] from a packed weather file.
pub fn read_weather_points(path: impl AsRef<Path>) -> Vec<WeatherPoint> {
    load_records(path.as_ref())
}

/// Write packed weather records to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`TrajectoryError::Io`] if the destination cannot be created or
/// written.
pub fn write_weather_points(path: impl AsRef<Path>, points: &[WeatherPoint]) -> Result<()> {
    store_records(path.as_ref(), points)
}

/// Read only the final record named by the header, seeking directly to it.
///
/// Returns `None` for a missing file, a zero count, or a file whose final
/// declared record is incomplete (even if earlier records are intact).
pub fn read_last_point(path: impl AsRef<Path>) -> Option<MotionPoint> {
    let path = path.as_ref();
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open trajectory file");
            return None;
        }
    };

    let mut header = [0u8; HEADER_SIZE];
    if let Err(e) = file.read_exact(&mut header) {
        tracing::warn!(path = %path.display(), error = %e, "header too short");
        return None;
    }

    let count = u32::from_le_bytes(header);
    if count == 0 {
        tracing::debug!(path = %path.display(), "trajectory file holds no records");
        return None;
    }

    let offset = HEADER_SIZE as u64 + u64::from(count - 1) * MOTION_RECORD_SIZE as u64;
    let mut record = [0u8; MOTION_RECORD_SIZE];
    let read = file
        .seek(SeekFrom::Start(offset))
        .and_then(|_| file.read_exact(&mut record));
    if let Err(e) = read {
        tracing::warn!(
            path = %path.display(),
            index = count - 1,
            error = %e,
            "incomplete final record"
        );
        return None;
    }

    Some(MotionPoint::decode(&record))
}

/// Average `dx`, `dy`, `dz` and magnitude over the complete records of a
/// trajectory file.
///
/// Records with a NaN in any of those fields come from incomplete weather
/// samples and are skipped. Returns `None` when no record is usable.
pub fn average_point(path: impl AsRef<Path>) -> Option<TrajectoryAverage> {
    let path = path.as_ref();
    let points = load_records::<MotionPoint>(path);

    let (sum, count) = points
        .iter()
        .filter(|p| ![p.dx, p.dy, p.dz, p.magnitude].iter().any(|v| v.is_nan()))
        .fold(([0.0f64; 4], 0usize), |(mut sum, count), p| {
            for (acc, v) in sum.iter_mut().zip([p.dx, p.dy, p.dz, p.magnitude]) {
                *acc += f64::from(v);
            }
            (sum, count + 1)
        });

    if count < points.len() {
        tracing::debug!(
            path = %path.display(),
            skipped = points.len() - count,
            "skipped records with NaN fields"
        );
    }
    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(TrajectoryAverage {
        dx: (sum[0] / n) as f32,
        dy: (sum[1] / n) as f32,
        dz: (sum[2] / n) as f32,
        magnitude: (sum[3] / n) as f32,
        count,
    })
}
