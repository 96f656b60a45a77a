use crate::units::*;
use microprofile::scope;

pub type ParticleIndex = u32;
pub type CellIndex = u32;

#[derive(Copy, Clone)]
struct Particle {
    pidx: ParticleIndex,
    cidx: CellIndex,
}

#[derive(Copy, Clone)]
struct CellPos {
    x: u16,
    y: u16,
}
impl CellPos {
    #[inline]
    fn to_cidx(self) -> CellIndex {
        super::morton::encode(self.x, self.y)
    }
}

#[derive(Copy, Clone)]
struct Cell {
    first_particle: ParticleIndex,
    cidx: CellIndex,
}

struct GridProperties {
    cell_size_inv: Real,
    grid_min: Point,
}
impl GridProperties {
    // Saturates outside of the representable range. Neighbors still end up in adjacent cells.
    #[inline]
    fn position_to_cellpos(&self, position: Point) -> CellPos {
        let cellspace = (position - self.grid_min) * self.cell_size_inv;
        CellPos {
            x: cellspace.x as u16,
            y: cellspace.y as u16,
        }
    }
}

/// Uniform grid over all particles with cells as large as the search radius.
///
/// Particles are sorted by the morton code of their cell, so a cell is a contiguous range of the sorted particle list.
/// Queries visit the 3x3 cells around the query position. It is up to the user to filter the candidates by distance.
pub struct NeighborhoodSearch {
    grid: GridProperties,
    particles: Vec<Particle>,
    cells: Vec<Cell>,
}

impl NeighborhoodSearch {
    /// * radius:   Radius that determines if a point is a neighbor
    pub fn new(radius: Real) -> NeighborhoodSearch {
        NeighborhoodSearch {
            grid: GridProperties {
                cell_size_inv: 1.0 / radius,
                grid_min: Point::new(0.0, 0.0),
            },
            particles: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn update(&mut self, positions: &[Point]) {
        microprofile::scope!("NeighborhoodSearch", "update");

        // Grid starts one cell before the lowest particle so that the 3x3 query block never underflows.
        let cell_size = 1.0 / self.grid.cell_size_inv;
        let mut grid_min = Point::new(Real::MAX, Real::MAX);
        for p in positions.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
            grid_min.x = grid_min.x.min(p.x);
            grid_min.y = grid_min.y.min(p.y);
        }
        if grid_min.x == Real::MAX {
            grid_min = Point::new(0.0, 0.0);
        }
        self.grid.grid_min = Point::new(grid_min.x - cell_size, grid_min.y - cell_size);

        self.particles.clear();
        self.particles.extend(positions.iter().enumerate().map(|(pidx, &position)| Particle {
            pidx: pidx as ParticleIndex,
            cidx: self.grid.position_to_cellpos(position).to_cidx(),
        }));

        // Sort by cell index. Stable, so particles within a cell keep their index order.
        self.particles.sort_by_key(|a| a.cidx);

        self.cells.clear();
        let mut prev_cidx = None;
        for (sorted_idx, p) in self.particles.iter().enumerate() {
            if prev_cidx != Some(p.cidx) {
                self.cells.push(Cell {
                    first_particle: sorted_idx as ParticleIndex,
                    cidx: p.cidx,
                });
                prev_cidx = Some(p.cidx);
            }
        }
        self.cells.push(Cell {
            first_particle: self.particles.len() as ParticleIndex,
            cidx: CellIndex::max_value(),
        }); // sentinel cell
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Calls `f` for every particle in the cells around `position`. Includes the particle at `position` itself.
    pub fn foreach_potential_neighbor(&self, position: Point, mut f: impl FnMut(ParticleIndex)) {
        if self.particles.is_empty() {
            return;
        }
        let center = self.grid.position_to_cellpos(position);
        for y in center.y.saturating_sub(1)..=center.y.saturating_add(1) {
            for x in center.x.saturating_sub(1)..=center.x.saturating_add(1) {
                let cidx = CellPos { x, y }.to_cidx();
                // The sentinel shares its key with the last representable cell, which must not be picked.
                let cells = &self.cells[..self.cells.len() - 1];
                if let Ok(cell_arrayidx) = cells.binary_search_by_key(&cidx, |cell| cell.cidx) {
                    let first_particle = self.cells[cell_arrayidx].first_particle;
                    let last_particle = self.cells[cell_arrayidx + 1].first_particle;
                    for p in &self.particles[first_particle as usize..last_particle as usize] {
                        f(p.pidx);
                    }
                }
            }
        }
    }
}
