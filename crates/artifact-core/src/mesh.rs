//! STL mesh loading and model-fitting normalization.

use glam::Vec3;
use thiserror::Error;

const STL_HEADER_LEN: usize = 80;
const STL_RECORD_LEN: usize = 50;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("mesh data too short ({0} bytes)")]
    TooShort(usize),
    #[error("binary STL truncated: expected {expected} bytes, got {actual}")]
    TruncatedBinary { expected: u64, actual: usize },
    #[error("ASCII STL parse error at line {line}: {message}")]
    Ascii { line: usize, message: String },
    #[error("mesh has no triangles")]
    Empty,
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Tight bounds of `points`, `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// A loaded triangle mesh. Immutable once built.
#[derive(Clone, Debug)]
pub struct MeshAsset {
    /// Three consecutive positions per triangle.
    positions: Vec<Vec3>,
    /// One normal per position.
    normals: Vec<Vec3>,
    bounds: Aabb,
}

impl MeshAsset {
    /// Build from a flat triangle list; normals are derived per face.
    pub fn from_triangles(positions: Vec<Vec3>) -> Result<Self, MeshError> {
        let normals = positions
            .chunks_exact(3)
            .flat_map(|t| {
                let n = face_normal(t[0], t[1], t[2]);
                [n, n, n]
            })
            .collect();
        Self::assemble(positions, normals)
    }

    /// Parse binary or ASCII STL.
    pub fn from_stl(bytes: &[u8]) -> Result<Self, MeshError> {
        if bytes.len() < STL_HEADER_LEN + 4 {
            if looks_ascii(bytes) {
                return parse_ascii(bytes);
            }
            return Err(MeshError::TooShort(bytes.len()));
        }
        let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
        // u64 so an ASCII header read as a count cannot overflow on 32-bit targets
        let expected = (STL_HEADER_LEN + 4) as u64 + u64::from(count) * STL_RECORD_LEN as u64;
        if bytes.len() as u64 == expected {
            return parse_binary(bytes, count as usize);
        }
        if looks_ascii(bytes) {
            return parse_ascii(bytes);
        }
        Err(MeshError::TruncatedBinary {
            expected,
            actual: bytes.len(),
        })
    }

    fn assemble(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Result<Self, MeshError> {
        if positions.len() < 3 {
            return Err(MeshError::Empty);
        }
        let bounds = Aabb::from_points(&positions).ok_or(MeshError::Empty)?;
        Ok(Self {
            positions,
            normals,
            bounds,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Uniform scale mapping the mesh's largest dimension onto `target_size`.
pub fn normalize(mesh: &MeshAsset, target_size: f32) -> f32 {
    fit_scale(Some(&mesh.bounds()), target_size)
}

/// Like [`normalize`] but tolerant of a missing mesh: falls back to 1 when there
/// is nothing to measure or the largest dimension is zero or not finite.
pub fn fit_scale(bounds: Option<&Aabb>, target_size: f32) -> f32 {
    let Some(bounds) = bounds else {
        log::warn!("[mesh] no mesh bounds; using unit scale");
        return 1.0;
    };
    let max_dim = bounds.max_dimension();
    if !max_dim.is_finite() || max_dim <= 0.0 {
        log::warn!("[mesh] degenerate bounds (max dimension {max_dim}); using unit scale");
        return 1.0;
    }
    target_size / max_dim
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

fn looks_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    head.trim_ascii_start().starts_with(b"solid") && head.iter().all(|b| b.is_ascii())
}

#[inline]
fn read_vec3(rec: &[u8]) -> Vec3 {
    let f = |i: usize| f32::from_le_bytes([rec[i], rec[i + 1], rec[i + 2], rec[i + 3]]);
    Vec3::new(f(0), f(4), f(8))
}

fn parse_binary(bytes: &[u8], count: usize) -> Result<MeshAsset, MeshError> {
    let mut positions = Vec::with_capacity(count * 3);
    let mut normals = Vec::with_capacity(count * 3);
    for rec in bytes[STL_HEADER_LEN + 4..].chunks_exact(STL_RECORD_LEN) {
        let a = read_vec3(&rec[12..24]);
        let b = read_vec3(&rec[24..36]);
        let c = read_vec3(&rec[36..48]);
        let stored = read_vec3(&rec[0..12]);
        let n = if stored.length_squared() > 0.0 {
            stored.normalize()
        } else {
            face_normal(a, b, c)
        };
        positions.extend([a, b, c]);
        normals.extend([n, n, n]);
    }
    MeshAsset::assemble(positions, normals)
}

fn parse_ascii(bytes: &[u8]) -> Result<MeshAsset, MeshError> {
    let text = String::from_utf8_lossy(bytes);
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut facet_normal = Vec3::ZERO;
    let mut facet: Vec<Vec3> = Vec::with_capacity(3);

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut parts = raw.split_whitespace();
        match parts.next() {
            Some("facet") => {
                facet.clear();
                facet_normal = match parts.next() {
                    Some("normal") => parse_triplet(parts, line)?,
                    _ => Vec3::ZERO,
                };
            }
            Some("vertex") => facet.push(parse_triplet(parts, line)?),
            Some("endfacet") => {
                if facet.len() != 3 {
                    return Err(MeshError::Ascii {
                        line,
                        message: format!("facet has {} vertices", facet.len()),
                    });
                }
                let n = if facet_normal.length_squared() > 0.0 {
                    facet_normal.normalize()
                } else {
                    face_normal(facet[0], facet[1], facet[2])
                };
                positions.extend_from_slice(&facet);
                normals.extend([n, n, n]);
            }
            _ => {}
        }
    }
    MeshAsset::assemble(positions, normals)
}

fn parse_triplet<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, MeshError> {
    let mut out = [0.0_f32; 3];
    for slot in &mut out {
        let tok = parts.next().ok_or_else(|| MeshError::Ascii {
            line,
            message: "expected three numbers".into(),
        })?;
        *slot = tok.parse().map_err(|e| MeshError::Ascii {
            line,
            message: format!("{tok:?}: {e}"),
        })?;
    }
    Ok(Vec3::from(out))
}
