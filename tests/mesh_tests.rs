// Host-side tests for STL parsing and model fitting.

use approx::assert_relative_eq;
use artifact_core::constants::TARGET_SIZE;
use artifact_core::{fit_scale, normalize, Aabb, MeshAsset, MeshError};
use glam::Vec3;

fn binary_stl(triangles: &[[Vec3; 3]], normal: Vec3) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for tri in triangles {
        for v in std::iter::once(normal).chain(tri.iter().copied()) {
            for c in v.to_array() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

/// Two triangles spanning an 8 x 2 x 4 box.
fn box_8_2_4() -> Vec<[Vec3; 3]> {
    vec![
        [Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)],
        [Vec3::new(0.0, 0.0, 4.0), Vec3::new(8.0, 2.0, 4.0), Vec3::new(8.0, 0.0, 0.0)],
    ]
}

#[test]
fn normalize_8_2_4_box_to_half() {
    let bytes = binary_stl(&box_8_2_4(), Vec3::Z);
    let mesh = MeshAsset::from_stl(&bytes).expect("valid binary stl");
    assert_eq!(mesh.triangle_count(), 2);
    let b = mesh.bounds();
    assert_eq!(b.size(), Vec3::new(8.0, 2.0, 4.0));
    assert_relative_eq!(normalize(&mesh, TARGET_SIZE), 0.5);
}

#[test]
fn normalize_does_not_touch_geometry() {
    let mesh = MeshAsset::from_triangles(box_8_2_4().concat()).expect("mesh");
    let before = mesh.positions().to_vec();
    let _ = normalize(&mesh, TARGET_SIZE);
    assert_eq!(mesh.positions(), before.as_slice());
}

#[test]
fn zero_normals_are_recomputed() {
    let tri = [[Vec3::ZERO, Vec3::X, Vec3::Y]];
    let mesh = MeshAsset::from_stl(&binary_stl(&tri, Vec3::ZERO)).expect("mesh");
    assert_eq!(mesh.normals()[0], Vec3::Z);
    assert_eq!(mesh.normals().len(), mesh.positions().len());
}

#[test]
fn parses_ascii_stl() {
    let text = "solid demo
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 8 0 0
      vertex 0 2 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 0 0 4
      vertex 8 2 4
      vertex 8 0 0
    endloop
  endfacet
endsolid demo
";
    let mesh = MeshAsset::from_stl(text.as_bytes()).expect("valid ascii stl");
    assert_eq!(mesh.triangle_count(), 2);
    assert_relative_eq!(normalize(&mesh, TARGET_SIZE), 0.5);
    assert_eq!(mesh.bounds().center(), Vec3::new(4.0, 1.0, 2.0));
}

#[test]
fn ascii_errors_carry_line_numbers() {
    let text = "solid bad\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0\n";
    match MeshAsset::from_stl(text.as_bytes()) {
        Err(MeshError::Ascii { line, .. }) => assert_eq!(line, 4),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ascii_without_facets_is_empty() {
    let err = MeshAsset::from_stl(b"solid nothing\nendsolid nothing\n").unwrap_err();
    assert_eq!(err, MeshError::Empty);
}

#[test]
fn truncated_binary_is_reported() {
    let mut bytes = binary_stl(&box_8_2_4(), Vec3::Z);
    bytes.truncate(84 + 50);
    assert_eq!(
        MeshAsset::from_stl(&bytes).unwrap_err(),
        MeshError::TruncatedBinary {
            expected: 184,
            actual: 134
        }
    );
}

#[test]
fn huge_triangle_count_does_not_overflow() {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 50]);
    assert_eq!(
        MeshAsset::from_stl(&bytes).unwrap_err(),
        MeshError::TruncatedBinary {
            expected: 84 + 50 * u64::from(u32::MAX),
            actual: 134
        }
    );
}

#[test]
fn ascii_with_space_padded_header_parses() {
    // Bytes 80..84 are spaces, which read as a count of 0x20202020.
    let mut text = format!("solid {}\n", " ".repeat(100));
    text.push_str(
        "facet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 8 0 0\nvertex 0 2 4\nendloop\nendfacet\nendsolid\n",
    );
    let mesh = MeshAsset::from_stl(text.as_bytes()).expect("valid ascii stl");
    assert_eq!(mesh.triangle_count(), 1);
    assert_relative_eq!(normalize(&mesh, TARGET_SIZE), 0.5);
}

#[test]
fn tiny_input_is_too_short() {
    assert_eq!(
        MeshAsset::from_stl(&[0u8; 10]).unwrap_err(),
        MeshError::TooShort(10)
    );
}

#[test]
fn fit_scale_falls_back_to_one() {
    assert_eq!(fit_scale(None, TARGET_SIZE), 1.0);
    let point = Aabb {
        min: Vec3::splat(3.0),
        max: Vec3::splat(3.0),
    };
    assert_eq!(fit_scale(Some(&point), TARGET_SIZE), 1.0);
    let broken = Aabb {
        min: Vec3::ZERO,
        max: Vec3::new(f32::NAN, 1.0, 1.0),
    };
    assert!(fit_scale(Some(&broken), TARGET_SIZE).is_finite());
}

#[test]
fn aabb_of_empty_set_is_none() {
    assert!(Aabb::from_points(&[] as &[Vec3]).is_none());
    let b = Aabb::from_points(&[Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, 0.0)])
        .expect("bounds");
    assert_eq!(b.max_dimension(), 4.0);
}
