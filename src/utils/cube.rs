// This file contains the geometry of the 3x3x3 cube and the logic for spawning it.
use bevy::mesh::VertexAttributeValues;
use bevy::prelude::*;

use crate::utils::objects::{Cell, CubeGroup, GroupOrientation};
use shared::constants::cube_constants::{CELL_COUNT, CELLS_PER_AXIS, FACE_COLORS};

/// Placement of one cell, produced by [`build_cells`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPlacement {
    pub coord: UVec3,
    pub position: Vec3,
}

/// Total edge length of the cube: three cells and the two gaps between them.
pub fn cube_extent(cell_size: f32, gap: f32) -> f32 {
    (cell_size + gap) * CELLS_PER_AXIS as f32 - gap
}

/// Offset of the first cell center along any axis, so the grid is centered on the origin.
fn grid_start(cell_size: f32, gap: f32) -> f32 {
    -cube_extent(cell_size, gap) / 2.0 + cell_size / 2.0
}

/// Builds the 27 cells of the grid, x-major then y then z.
/// Cell `i` along an axis sits at `start + i * (size + gap)`.
pub fn build_cells(cell_size: f32, gap: f32) -> Vec<CellPlacement> {
    let start = grid_start(cell_size, gap);
    let step = cell_size + gap;
    let n = CELLS_PER_AXIS as u32;

    let mut cells = Vec::with_capacity(CELL_COUNT);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let coord = UVec3::new(x, y, z);
                let position = Vec3::splat(start) + coord.as_vec3() * step;
                cells.push(CellPlacement { coord, position });
            }
        }
    }
    cells
}

/// Color of a face from its outward normal: +X/-X, +Y/-Y and +Z/-Z share a color.
pub fn face_color(normal: Vec3) -> [f32; 4] {
    let n = normal.abs();
    if n.x >= n.y && n.x >= n.z {
        FACE_COLORS[0]
    } else if n.y >= n.z {
        FACE_COLORS[1]
    } else {
        FACE_COLORS[2]
    }
}

/// A cuboid mesh whose vertices carry the face color of their normal.
pub fn cell_mesh(cell_size: f32) -> Mesh {
    let mut mesh = Mesh::from(Cuboid::from_length(cell_size));

    // Cuboid faces have flat normals, so each vertex belongs to exactly one face.
    let colors: Vec<[f32; 4]> = match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
        Some(VertexAttributeValues::Float32x3(normals)) => normals
            .iter()
            .map(|n| face_color(Vec3::from_array(*n)))
            .collect(),
        _ => Vec::new(),
    };
    if !colors.is_empty() {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }
    mesh
}

/// Handles allocated while spawning the cube.
pub struct SpawnedCube {
    pub group: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Spawns the cube group with its 27 cells as children.
/// All cells share one mesh and one material.
pub fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cell_size: f32,
    gap: f32,
) -> SpawnedCube {
    let mesh = meshes.add(cell_mesh(cell_size));
    // White base so the vertex colors show through unchanged.
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.6,
        ..default()
    });

    let cells = build_cells(cell_size, gap);
    let group = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            CubeGroup,
            GroupOrientation::default(),
        ))
        .with_children(|parent| {
            for cell in &cells {
                parent.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(cell.position),
                    Cell { coord: cell.coord },
                ));
            }
        })
        .id();

    SpawnedCube {
        group,
        mesh,
        material,
    }
}
