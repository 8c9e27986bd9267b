//! Property tests for the construction lattice.

use build_royale_engine::world::{GridAddress, GridSpace};
use glam::Vec3;
use proptest::prelude::*;

fn cell_size() -> impl Strategy<Value = Vec3> {
    (0.5f32..20.0, 0.5f32..20.0, 0.5f32..20.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn position() -> impl Strategy<Value = Vec3> {
    (-500.0f32..500.0, -500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_vertices_are_distinct_corners(cell in cell_size()) {
        let corners: Vec<Vec3> = (0..8u8)
            .map(|i| GridAddress::new(i).map(|a| a.offset(cell)))
            .collect::<Result<_, _>>()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (i, a) in corners.iter().enumerate() {
            // Every coordinate is either 0 or the full cell extent
            for (v, s) in [(a.x, cell.x), (a.y, cell.y), (a.z, cell.z)] {
                prop_assert!(v == 0.0 || v == s);
            }
            for b in &corners[i + 1..] {
                prop_assert_ne!(*a, *b);
            }
        }
    }

    #[test]
    fn prop_face_centers_bisect_opposite_corners(cell in cell_size()) {
        let pairs = [
            (GridAddress::BOTTOM_FACE, 0u8, 2u8),
            (GridAddress::TOP_FACE, 4, 6),
            (GridAddress::NEG_Z_FACE, 0, 5),
            (GridAddress::POS_Z_FACE, 3, 6),
            (GridAddress::NEG_X_FACE, 0, 7),
            (GridAddress::POS_X_FACE, 1, 6),
            (GridAddress::CENTER, 0, 6),
        ];
        for (face, a, b) in pairs {
            let a = GridAddress::new(a).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let b = GridAddress::new(b).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let mid = (a.offset(cell) + b.offset(cell)) * 0.5;
            prop_assert!(face.offset(cell).abs_diff_eq(mid, 1e-5));
        }
    }

    #[test]
    fn prop_snap_is_idempotent(cell in cell_size(), p in position()) {
        let grid = GridSpace::new(cell);
        let once = grid.snap(p);
        prop_assert_eq!(grid.snap(once), once);
    }

    #[test]
    fn prop_snap_contains_position(cell in cell_size(), p in position()) {
        let grid = GridSpace::new(cell);
        let index = grid.cell_index(p);
        let lo = grid.cell_origin(index);
        let hi = grid.cell_origin(index + glam::IVec3::ONE);
        prop_assert!(lo.cmple(p).all());
        prop_assert!(p.cmplt(hi).all());
    }

    #[test]
    fn prop_align_is_snap_plus_offset(cell in cell_size(), p in position(), index in 0u8..15) {
        let grid = GridSpace::new(cell);
        let address = GridAddress::new(index).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(grid.align(p, address), grid.point_for_address(grid.snap(p), address));
    }

    #[test]
    fn prop_shared_faces_match_across_cells(cell in cell_size(), k in -200i32..200) {
        let grid = GridSpace::new(cell);
        let step = [
            (glam::IVec3::X, GridAddress::POS_X_FACE, GridAddress::NEG_X_FACE),
            (glam::IVec3::Y, GridAddress::TOP_FACE, GridAddress::BOTTOM_FACE),
            (glam::IVec3::Z, GridAddress::POS_Z_FACE, GridAddress::NEG_Z_FACE),
        ];
        for (axis, near, far) in step {
            let index = axis * k;
            prop_assert_eq!(
                grid.point_in_cell(index, near),
                grid.point_in_cell(index + axis, far)
            );
        }
    }

    #[test]
    fn prop_out_of_range_rejected(index in 15u8..=255) {
        prop_assert!(GridAddress::new(index).is_err());
    }
}
