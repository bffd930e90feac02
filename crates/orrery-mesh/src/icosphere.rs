//! Icosphere mesh generation for sphere-shaped bodies.

use std::fmt;

use glam::Vec3;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::buffers::MeshBuffers;
use crate::error::MeshError;

/// Highest subdivision level accepted by [`SubdivisionLevel`].
///
/// Face count grows as `20 * 4^k`; level 8 is already 1.3M triangles.
pub const MAX_SUBDIVISION_LEVEL: u32 = 8;

/// Faces of the base icosahedron, outward-facing counter-clockwise winding.
///
/// Index order is fixed: subdivision output and winding depend on it.
pub const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    // 5 faces around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 icosahedron vertices, normalized onto the unit sphere.
///
/// Built from the cyclic permutations of `(±1, ±φ, 0)`.
pub fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

/// Number of triangles produced at subdivision level `level`: `20 * 4^level`.
pub const fn expected_face_count(level: u32) -> usize {
    20 * 4usize.pow(level)
}

/// Number of vertices produced at subdivision level `level`: `10 * 4^level + 2`.
pub const fn expected_vertex_count(level: u32) -> usize {
    10 * 4usize.pow(level) + 2
}

/// A validated subdivision level in `0..=MAX_SUBDIVISION_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubdivisionLevel(u32);

impl SubdivisionLevel {
    /// The bare icosahedron.
    pub const ZERO: Self = Self(0);

    /// Validate an unsigned level.
    pub fn new(level: u32) -> Result<Self, MeshError> {
        if level > MAX_SUBDIVISION_LEVEL {
            return Err(MeshError::InvalidArgument {
                level: i64::from(level),
                max: MAX_SUBDIVISION_LEVEL,
            });
        }
        Ok(Self(level))
    }

    /// The raw number of subdivision rounds.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Shift this level by a signed bias, failing if the result leaves the valid range.
    pub fn offset(self, bias: i32) -> Result<Self, MeshError> {
        Self::try_from(i64::from(self.0) + i64::from(bias))
    }
}

impl TryFrom<i64> for SubdivisionLevel {
    type Error = MeshError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        u32::try_from(level)
            .map_err(|_| MeshError::InvalidArgument {
                level,
                max: MAX_SUBDIVISION_LEVEL,
            })
            .and_then(Self::new)
    }
}

impl TryFrom<i32> for SubdivisionLevel {
    type Error = MeshError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(level))
    }
}

impl TryFrom<u32> for SubdivisionLevel {
    type Error = MeshError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl fmt::Display for SubdivisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generate an icosphere for the given subdivision level.
///
/// Accepts any integer convertible into a [`SubdivisionLevel`]; negative or
/// oversized levels return [`MeshError::InvalidArgument`] before any work is done.
pub fn generate<L>(level: L) -> Result<IcosphereMesh, MeshError>
where
    L: TryInto<SubdivisionLevel, Error = MeshError>,
{
    Ok(IcosphereMesh::generate(level.try_into()?))
}

/// Mutable generation state for a single icosphere.
///
/// Owns the append-only vertex pool, the current face list, and the edge
/// midpoint cache. Nothing is shared between builders.
#[derive(Debug, Clone)]
pub struct IcosphereBuilder {
    positions: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    midpoints: FxHashMap<(u32, u32), u32>,
    rounds: u32,
}

impl IcosphereBuilder {
    /// Start from the base icosahedron.
    pub fn new() -> Self {
        Self {
            positions: icosahedron_vertices().to_vec(),
            faces: ICOSAHEDRON_FACES.to_vec(),
            midpoints: FxHashMap::default(),
            rounds: 0,
        }
    }

    /// Start from the base icosahedron with storage reserved for `level` rounds.
    pub fn with_capacity_for(level: SubdivisionLevel) -> Self {
        let mut builder = Self::new();
        let vertices = expected_vertex_count(level.get());
        builder.positions.reserve(vertices - builder.positions.len());
        // Every new vertex is exactly one cached edge.
        builder.midpoints.reserve(vertices - builder.positions.len());
        builder
    }

    /// Resolve the vertex at the midpoint of edge `a`-`b`, creating it on first use.
    ///
    /// The edge is unordered: `midpoint(a, b)` and `midpoint(b, a)` return the
    /// same index. New vertices are projected onto the unit sphere.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is not an index into the vertex pool.
    pub fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&index) = self.midpoints.get(&key) {
            return index;
        }

        let mid = ((self.positions[a as usize] + self.positions[b as usize]) * 0.5).normalize();
        let index = self.positions.len() as u32;
        self.positions.push(mid);
        self.midpoints.insert(key, index);
        index
    }

    /// Split every face into four, preserving winding.
    pub fn subdivide(&mut self) {
        let faces = std::mem::take(&mut self.faces);
        let mut next = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = self.midpoint(a, b);
            let bc = self.midpoint(b, c);
            let ca = self.midpoint(c, a);

            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }

        self.faces = next;
        self.rounds += 1;
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of subdivision rounds applied so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Freeze the current state into an immutable mesh, dropping the cache.
    pub fn finish(self) -> IcosphereMesh {
        IcosphereMesh {
            level: self.rounds,
            positions: self.positions,
            faces: self.faces,
        }
    }
}

impl Default for IcosphereBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished icosphere: unit-sphere vertices and triangle faces.
///
/// Normals are not stored separately; on a sphere centered at the origin the
/// normal of every vertex is its position.
#[derive(Debug, Clone, PartialEq)]
pub struct IcosphereMesh {
    level: u32,
    positions: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
}

impl IcosphereMesh {
    /// Run `level` subdivision rounds on the base icosahedron.
    pub fn generate(level: SubdivisionLevel) -> Self {
        let mut builder = IcosphereBuilder::with_capacity_for(level);
        for _ in 0..level.get() {
            builder.subdivide();
        }
        let mesh = builder.finish();

        debug!(
            level = mesh.level,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Generated icosphere"
        );
        mesh
    }

    /// Subdivision rounds applied to produce this mesh.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals, identical to [`positions`](Self::positions).
    pub fn normals(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Flattened triangle index list in winding order.
    pub fn indices(&self) -> &[u32] {
        self.faces.as_flattened()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Copy the mesh out as flat `position` / `normal` / `indices` arrays.
    pub fn to_buffers(&self) -> MeshBuffers {
        let position: Vec<f32> = self.positions.iter().flat_map(|p| p.to_array()).collect();
        MeshBuffers {
            normal: position.clone(),
            position,
            indices: self.indices().to_vec(),
        }
    }
}
