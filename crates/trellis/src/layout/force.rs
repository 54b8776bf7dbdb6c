//! Force-directed node placement
//!
//! This module implements the force-directed layout algorithm. Nodes start
//! evenly spread on a circle, then a fixed number of rounds apply
//! inverse-square repulsion between every pair and spring attraction along
//! every edge. A correction pass afterwards guarantees the minimum spacing
//! the simulation alone may not reach.

use log::{debug, info, trace};

use trellis_core::geometry::{Point, Size};

use crate::{
    config::ForceConfig,
    layout::{PositionedNode, separation},
    structure::LayoutGraph,
};

/// Transient physical state of one node during a layout run.
#[derive(Debug, Clone, Copy, Default)]
struct Particle {
    position: Point,
    velocity: Point,
}

/// Force layout engine
///
/// The engine holds only configuration; each [`Engine::layout`] call owns its
/// particle array, so one engine may serve concurrent layouts.
///
/// No randomness is involved: the same graph and configuration always yield
/// the same positions.
#[derive(Debug, Clone)]
pub struct Engine {
    config: ForceConfig,
    node_size: Size,
}

impl Engine {
    /// Create a new force layout engine for nodes of `node_size`
    pub fn new(config: ForceConfig, node_size: Size) -> Self {
        Self { config, node_size }
    }

    /// Minimum distance enforced between two node centers.
    pub fn min_distance(&self) -> f32 {
        self.node_size.width() + self.config.separation_margin()
    }

    /// Compute a position for every node of `graph`, in input order.
    ///
    /// Edges with unknown endpoints are ignored. An empty graph yields an
    /// empty layout.
    pub fn layout(&self, graph: &LayoutGraph) -> Vec<PositionedNode> {
        info!(
            node_count = graph.node_count(),
            edge_count = graph.edges().len();
            "Running force layout"
        );

        let positions = self.compute_positions(graph);

        graph
            .graph()
            .nodes()
            .iter()
            .zip(positions)
            .map(|(node, position)| {
                PositionedNode::new(node.id(), node.label(), position, self.node_size)
            })
            .collect()
    }

    fn compute_positions(&self, graph: &LayoutGraph) -> Vec<Point> {
        if graph.node_count() == 0 {
            return Vec::new();
        }

        let mut particles = self.initialize_particles(graph.node_count());
        self.run_force_simulation(graph, &mut particles);

        let mut positions: Vec<Point> = particles.iter().map(|p| p.position).collect();

        let outcome = separation::enforce_min_distance(
            &mut positions,
            self.min_distance(),
            self.config.separation_buffer(),
            self.config.separation_passes(),
        );
        debug!(
            passes = outcome.passes(),
            resolved = outcome.is_resolved();
            "Separation pass finished"
        );

        if !outcome.is_resolved() && self.config.grid_fallback() {
            separation::place_on_grid(&mut positions, self.min_distance());
        }

        self.normalize(&mut positions);
        trace!(positions:?; "Final positions");
        positions
    }

    /// Place node `i` of `n` at angle `2π·i/n` on the seeding circle.
    fn initialize_particles(&self, count: usize) -> Vec<Particle> {
        let center = self.config.initial_center();
        let radius = self.config.initial_radius();

        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                let offset = Point::new(angle.cos(), angle.sin()).scale(radius);
                Particle {
                    position: center.add_point(offset),
                    velocity: Point::default(),
                }
            })
            .collect()
    }

    /// Run force-directed layout algorithm
    fn run_force_simulation(&self, graph: &LayoutGraph, particles: &mut [Particle]) {
        let iterations = self.config.iterations();

        for round in 0..iterations {
            let forces = self.calculate_forces(graph, particles);

            for (particle, force) in particles.iter_mut().zip(&forces) {
                particle.velocity = particle
                    .velocity
                    .add_point(*force)
                    .scale(self.config.damping());
                particle.position = particle.position.add_point(particle.velocity);
            }

            // Cooling decays linearly to zero on top of the constant damping
            let cooling = 1.0 - round as f32 / iterations as f32;
            for particle in particles.iter_mut() {
                particle.velocity = particle.velocity.scale(cooling);
            }
        }
    }

    /// Net force on every particle, from the positions at the start of the round.
    fn calculate_forces(&self, graph: &LayoutGraph, particles: &[Particle]) -> Vec<Point> {
        particles
            .iter()
            .enumerate()
            .map(|(i, particle)| {
                let mut force = Point::default();

                // Repulsion from all other particles
                for (j, other) in particles.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let delta = other.position.sub_point(particle.position);
                    let distance = delta.hypot().max(1.0);
                    let repulsion = self.config.repulsion_strength() / (distance * distance);
                    force = force.sub_point(delta.scale(repulsion / distance));
                }

                // Spring attraction toward linked particles
                for &j in graph.neighbors(i) {
                    let delta = particles[j].position.sub_point(particle.position);
                    let distance = delta.hypot().max(1.0);
                    let attraction = (distance - self.config.ideal_distance())
                        * self.config.attraction_strength();
                    force = force.add_point(delta.scale(attraction / distance));
                }

                force
            })
            .collect()
    }

    /// Translate the layout so its minimum x and y equal the normalize margin.
    fn normalize(&self, positions: &mut [Point]) {
        let Some(min) = positions
            .iter()
            .copied()
            .reduce(|a, b| Point::new(a.x().min(b.x()), a.y().min(b.y())))
        else {
            return;
        };

        let margin = self.config.normalize_margin();
        let offset = Point::new(margin, margin).sub_point(min);
        for position in positions.iter_mut() {
            *position = position.add_point(offset);
        }
    }
}
