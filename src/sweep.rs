// Sampling grids and the sweeps behind each visualization
// Every sweep is a lazy iterator that can be cloned to restart it, nothing here knows about rendering.
use serde::{Serialize, Deserialize};

use crate::prelude::*;

/// Evenly spaced values over [start, end], both ends included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid1 {
	start: Float,
	end: Float,
	count: usize
}

impl Grid1 {
	pub fn new(start: Float, end: Float, count: usize) -> Result<Self> {
		if count < 2 {
			return Err(RailgunError::InvalidGrid(format!("need at least 2 samples, got {}", count)));
		}
		if !(start.is_finite() && end.is_finite()) || start == end {
			return Err(RailgunError::InvalidGrid(format!("range [{}, {}] is empty or not finite", start, end)));
		}
		Ok(Self {
			start,
			end,
			count
		})
	}
	pub fn len(&self) -> usize {
		self.count
	}
	pub fn step(&self) -> Float {
		(self.end - self.start) / ((self.count - 1) as Float)
	}
	/// The `i`th value, the last one is exactly `end` so sweeps land on the wires when they should
	pub fn value(&self, i: usize) -> Float {
		if i + 1 == self.count {
			self.end
		}
		else {
			self.start + (self.end - self.start) * (i as Float) / ((self.count - 1) as Float)
		}
	}
	pub fn values(&self) -> impl Iterator<Item = Float> + Clone {
		let grid = *self;
		(0..grid.count).map(move |i| grid.value(i))
	}
}

/// A 2D cross-section, holding the coordinate that stays fixed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plane {
	YZ {x: Float},
	XZ {y: Float},
	XY {z: Float}
}

impl Plane {
	/// 3D point from in-plane coordinates (u, v)
	pub fn point(&self, u: Float, v: Float) -> V3 {
		match *self {
			Self::YZ{x} => V3::new(x, u, v),
			Self::XZ{y} => V3::new(u, y, v),
			Self::XY{z} => V3::new(u, v, z)
		}
	}
	/// In-plane (u, v) components of a vector or position
	pub fn project(&self, vector: &V3) -> (Float, Float) {
		match self {
			Self::YZ{..} => (vector.y, vector.z),
			Self::XZ{..} => (vector.x, vector.z),
			Self::XY{..} => (vector.x, vector.y)
		}
	}
	pub fn axis_labels(&self) -> (&'static str, &'static str) {
		match self {
			Self::YZ{..} => ("y", "z"),
			Self::XZ{..} => ("x", "z"),
			Self::XY{..} => ("x", "y")
		}
	}
}

/// Rectangular grid on a plane, `u` varies fastest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2 {
	pub plane: Plane,
	pub u: Grid1,
	pub v: Grid1
}

impl Grid2 {
	pub fn new(plane: Plane, u: Grid1, v: Grid1) -> Self {
		Self {
			plane,
			u,
			v
		}
	}
	/// y-z cross-section through both rails halfway along them, with a margin of 1 around the rails
	pub fn rail_cross_section(geometry: &GeometryConfig, resolution: usize) -> Result<Self> {
		let s = geometry.rail_separation();
		let half_height = s / 2.0 + 1.0;
		Ok(Self::new(
			Plane::YZ{x: -geometry.rail_length() / 2.0},
			Grid1::new(-1.0, s + 1.0, resolution)?,
			Grid1::new(-half_height, half_height, resolution)?
		))
	}
	/// x-z cross-section through the middle of the projectile
	pub fn projectile_cross_section(geometry: &GeometryConfig, resolution: usize) -> Result<Self> {
		let s = geometry.rail_separation();
		let half_width = s / 2.0;
		Ok(Self::new(
			Plane::XZ{y: s / 2.0},
			Grid1::new(-half_width, half_width, resolution)?,
			Grid1::new(-half_width, half_width, resolution)?
		))
	}
	pub fn len(&self) -> usize {
		self.u.len() * self.v.len()
	}
	pub fn points(&self) -> impl Iterator<Item = V3> + Clone {
		let grid = *self;
		grid.v.values().flat_map(move |v| grid.u.values().map(move |u| grid.plane.point(u, v)))
	}
}

/// A vector value at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
	pub position: V3,
	pub value: V3
}

/// A scalar value against one swept coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarSample {
	pub position: V3,
	pub coordinate: Float,
	pub value: Float
}

/// Field and force magnitude at one point along the projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileAxisSample {
	pub r: Float,
	pub field_magnitude: Float,
	pub force_magnitude: Float
}

/// Points along a rail, from the breech (x = -rail_length) to the muzzle (x = 0)
pub fn rail_line(geometry: &GeometryConfig, rail: SegmentKind, count: usize) -> Result<impl Iterator<Item = V3> + Clone> {
	let y = match rail {
		SegmentKind::LeftRail => 0.0,
		SegmentKind::RightRail => geometry.rail_separation(),
		SegmentKind::Projectile => return Err(RailgunError::InvalidGrid("the projectile is not a rail".to_string()))
	};
	let grid = Grid1::new(-geometry.rail_length(), 0.0, count)?;
	Ok(grid.values().map(move |x| V3::new(x, y, 0.0)))
}

/// (a) Sum of both rails' finite-wire fields over a grid
pub fn rail_field(geometry: GeometryConfig, grid: &Grid2) -> impl Iterator<Item = Sample> + Clone {
	grid.points().map(move |position| Sample {
		position,
		value: combined_rail_field(position, &geometry)
	})
}

/// (b) Rails' field and the force it puts on the projectile, along the projectile (y in [0, rail_separation])
pub fn projectile_axis(geometry: GeometryConfig, count: usize) -> Result<impl Iterator<Item = ProjectileAxisSample> + Clone> {
	let grid = Grid1::new(0.0, geometry.rail_separation(), count)?;
	let receiver = CurrentSegment::new(SegmentKind::Projectile, &geometry).unit_current();
	Ok(grid.values().map(move |r| {
		let b = combined_rail_field(V3::new(0.0, r, 0.0), &geometry);
		ProjectileAxisSample {
			r,
			field_magnitude: b.norm(),
			force_magnitude: force_magnitude(b, receiver)
		}
	}))
}

/// Riemann sum of the force magnitude along the projectile.
/// Only meaningful for comparing configurations against each other: the 1/r singularity at each wire makes the real integral diverge,
/// and the degenerate end samples contribute nothing.
pub fn projectile_force_total(geometry: GeometryConfig, count: usize) -> Result<Float> {
	let dr = Grid1::new(0.0, geometry.rail_separation(), count)?.step();
	Ok(projectile_axis(geometry, count)?.map(|sample| sample.force_magnitude * dr).sum())
}

/// (c) Force on `rail`'s current from the opposing rail's field, infinite-wire approximation
pub fn opposing_rail_force(geometry: GeometryConfig, rail: SegmentKind, count: usize) -> Result<impl Iterator<Item = Sample> + Clone> {
	let points = rail_line(&geometry, rail, count)?;
	let (receiver, source) = rail_pair(&geometry, rail)?;
	Ok(points.map(move |position| Sample {
		position,
		value: force_density_at(FieldModel::INFINITE_WIRE.field_at(&source, position), receiver)
	}))
}

/// (d) Force on `rail`'s current from the projectile's finite-wire field
pub fn projectile_force_on_rail(geometry: GeometryConfig, rail: SegmentKind, count: usize) -> Result<impl Iterator<Item = Sample> + Clone> {
	let points = rail_line(&geometry, rail, count)?;
	let (receiver, _) = rail_pair(&geometry, rail)?;
	let projectile = CurrentSegment::new(SegmentKind::Projectile, &geometry);
	Ok(points.map(move |position| Sample {
		position,
		value: force_density_at(FieldModel::FINITE_WIRE.field_at(&projectile, position), receiver)
	}))
}

/// (e) |force from projectile| + |force from opposing rail| along `rail`, against x
pub fn rail_force_total(geometry: GeometryConfig, rail: SegmentKind, count: usize) -> Result<impl Iterator<Item = ScalarSample> + Clone> {
	let from_projectile = projectile_force_on_rail(geometry, rail, count)?;
	let from_rail = opposing_rail_force(geometry, rail, count)?;
	Ok(from_projectile.zip(from_rail).map(|(a, b)| ScalarSample {
		position: a.position,
		coordinate: a.position.x,
		value: a.value.norm() + b.value.norm()
	}))
}

/// (f) Projectile's own finite-wire field over a grid
pub fn projectile_field(geometry: GeometryConfig, grid: &Grid2) -> impl Iterator<Item = Sample> + Clone {
	grid.points().map(move |position| Sample {
		position,
		value: field_at(SegmentKind::Projectile, position, &geometry)
	})
}

/// Receiving unit current of `rail` and the opposing rail as a field source
fn rail_pair(geometry: &GeometryConfig, rail: SegmentKind) -> Result<(V3, CurrentSegment)> {
	let opposing = rail.opposing_rail().ok_or_else(|| RailgunError::InvalidGrid(format!("{} has no opposing rail", rail.name())))?;
	Ok((
		CurrentSegment::new(rail, geometry).unit_current(),
		CurrentSegment::new(opposing, geometry)
	))
}

/// Every visualization the explorer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Visualization {
	RailField,
	ProjectileAxis,
	RailRepulsion,
	ProjectileOnRails,
	RailForceTotal,
	ProjectileField
}

impl Visualization {
	pub const ALL: [Visualization; 6] = [
		Self::RailField,
		Self::ProjectileAxis,
		Self::RailRepulsion,
		Self::ProjectileOnRails,
		Self::RailForceTotal,
		Self::ProjectileField
	];
	pub fn title(&self) -> &'static str {
		match self {
			Self::RailField => "Magnetic field of both rails (y-z cross-section)",
			Self::ProjectileAxis => "Field and force magnitude along the projectile",
			Self::RailRepulsion => "Force on each rail from the opposing rail",
			Self::ProjectileOnRails => "Force on each rail from the projectile",
			Self::RailForceTotal => "Total force magnitude along the left rail",
			Self::ProjectileField => "Magnetic field of the projectile (x-z cross-section)"
		}
	}
	/// Used for output file names
	pub fn slug(&self) -> &'static str {
		match self {
			Self::RailField => "rail_field",
			Self::ProjectileAxis => "projectile_axis",
			Self::RailRepulsion => "rail_repulsion",
			Self::ProjectileOnRails => "projectile_on_rails",
			Self::RailForceTotal => "rail_force_total",
			Self::ProjectileField => "projectile_field"
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	fn geometry(separation: Float, length: Float, current: Float) -> GeometryConfig {
		GeometryConfig::new(separation, length, current).unwrap()
	}
	#[test]
	fn grid_endpoints_are_exact() {
		let grid = Grid1::new(0.0, 3.0, 100).unwrap();
		let values: Vec<Float> = grid.values().collect();
		assert_eq!(values.len(), 100);
		assert_eq!(values[0], 0.0);
		assert_eq!(values[99], 3.0);
		assert_relative_eq!(values[33], 1.0, epsilon = 1e-12);
		assert_relative_eq!(grid.step(), 3.0 / 99.0);
		let reversed = Grid1::new(0.0, -2.0, 3).unwrap();
		assert_eq!(reversed.values().collect::<Vec<_>>(), vec![0.0, -1.0, -2.0]);
	}
	#[test]
	fn invalid_grids() {
		assert!(matches!(Grid1::new(0.0, 1.0, 1), Err(RailgunError::InvalidGrid(_))));
		assert!(Grid1::new(1.0, 1.0, 10).is_err());
		assert!(Grid1::new(0.0, Float::NAN, 10).is_err());
		assert!(Grid2::rail_cross_section(&GeometryConfig::default(), 0).is_err());
		assert!(rail_line(&GeometryConfig::default(), SegmentKind::Projectile, 10).is_err());
	}
	#[test]
	fn grid2_layout() {
		let grid = Grid2::new(Plane::YZ{x: -1.5}, Grid1::new(0.0, 1.0, 2).unwrap(), Grid1::new(-1.0, 1.0, 3).unwrap());
		let points: Vec<V3> = grid.points().collect();
		assert_eq!(points.len(), grid.len());
		assert_eq!(points[0], V3::new(-1.5, 0.0, -1.0));
		assert_eq!(points[1], V3::new(-1.5, 1.0, -1.0));
		assert_eq!(points[2], V3::new(-1.5, 0.0, 0.0));
		assert_eq!(points[5], V3::new(-1.5, 1.0, 1.0));
		assert_eq!(Plane::XZ{y: 2.0}.point(1.0, 3.0), V3::new(1.0, 2.0, 3.0));
		assert_eq!(Plane::XZ{y: 2.0}.project(&V3::new(1.0, 2.0, 3.0)), (1.0, 3.0));
	}
	#[test]
	fn sweeps_restart_identically() {
		let geometry = geometry(3.0, 4.0, 1.0);
		let grid = Grid2::rail_cross_section(&geometry, 15).unwrap();
		let sweep = rail_field(geometry, &grid);
		let first: Vec<Sample> = sweep.clone().collect();
		let second: Vec<Sample> = sweep.collect();
		let fresh: Vec<Sample> = rail_field(geometry, &grid).collect();
		assert_eq!(first.len(), 225);
		assert_eq!(first, second);
		assert_eq!(first, fresh);
		let axis_a: Vec<_> = projectile_axis(geometry, 50).unwrap().collect();
		let axis_b: Vec<_> = projectile_axis(geometry, 50).unwrap().collect();
		assert_eq!(axis_a, axis_b);
		let total_a: Vec<_> = rail_force_total(geometry, SegmentKind::LeftRail, 30).unwrap().collect();
		let total_b: Vec<_> = rail_force_total(geometry, SegmentKind::LeftRail, 30).unwrap().collect();
		assert_eq!(total_a, total_b);
	}
	#[test]
	fn projectile_axis_has_single_minimum_at_midpoint() {
		let geometry = geometry(3.0, 4.0, 1.0);
		let samples: Vec<ProjectileAxisSample> = projectile_axis(geometry, 100).unwrap().collect();
		assert_eq!(samples.len(), 100);
		assert_eq!(samples[0].r, 0.0);
		assert_eq!(samples[99].r, 3.0);
		// The end samples sit on a rail, whose own contribution is dropped there
		assert_relative_eq!(samples[0].field_magnitude, 1.0 / 3.0 * (1.0 + 4.0 / 25.0_f64.sqrt()), epsilon = 1e-12);
		let interior = &samples[1..99];
		let min_index = interior.iter()
			.enumerate()
			.min_by(|a, b| a.1.field_magnitude.total_cmp(&b.1.field_magnitude))
			.map(|(i, _)| i)
			.unwrap();
		assert!((interior[min_index].r - 1.5).abs() < 3.0 / 99.0);
		let tolerance = 1e-12;
		for pair in interior[..=min_index].windows(2) {
			assert!(pair[1].field_magnitude <= pair[0].field_magnitude + tolerance, "not non-increasing at r = {}", pair[1].r);
		}
		for pair in interior[min_index..].windows(2) {
			assert!(pair[1].field_magnitude + tolerance >= pair[0].field_magnitude, "not non-decreasing at r = {}", pair[1].r);
		}
		// Field is along z and the projectile current along y, so |F| = |B| per unit current
		for sample in interior {
			assert_relative_eq!(sample.force_magnitude, sample.field_magnitude, epsilon = 1e-12);
		}
	}
	#[test]
	fn projectile_force_total_is_finite_and_scales() {
		let single = projectile_force_total(geometry(3.0, 4.0, 1.0), 100).unwrap();
		let double = projectile_force_total(geometry(3.0, 4.0, 2.0), 100).unwrap();
		assert!(single.is_finite() && single > 0.0);
		assert_relative_eq!(double, 2.0 * single, epsilon = 1e-9);
	}
	#[test]
	fn doubling_current_doubles_sweeps() {
		let single = geometry(3.0, 3.0, 1.0);
		let double = geometry(3.0, 3.0, 2.0);
		let point = V3::new(0.0, 1.5, 0.0);
		let grid = Grid2::new(Plane::YZ{x: 0.0}, Grid1::new(1.0, 2.0, 3).unwrap(), Grid1::new(-0.5, 0.5, 3).unwrap());
		let midpoint_single = rail_field(single, &grid).find(|s| s.position == point).unwrap();
		let midpoint_double = rail_field(double, &grid).find(|s| s.position == point).unwrap();
		assert_relative_eq!(midpoint_double.value.norm(), 2.0 * midpoint_single.value.norm(), epsilon = 1e-12);
		let axis_single = projectile_axis(single, 3).unwrap().nth(1).unwrap();
		let axis_double = projectile_axis(double, 3).unwrap().nth(1).unwrap();
		assert_eq!(axis_single.r, 1.5);
		assert_relative_eq!(axis_double.force_magnitude, 2.0 * axis_single.force_magnitude, epsilon = 1e-12);
		for rail in [SegmentKind::LeftRail, SegmentKind::RightRail] {
			for (a, b) in opposing_rail_force(single, rail, 10).unwrap().zip(opposing_rail_force(double, rail, 10).unwrap()) {
				assert_relative_eq!(b.value, a.value * 2.0, epsilon = 1e-12);
			}
			for (a, b) in projectile_force_on_rail(single, rail, 10).unwrap().zip(projectile_force_on_rail(double, rail, 10).unwrap()) {
				assert_relative_eq!(b.value, a.value * 2.0, epsilon = 1e-12);
			}
		}
	}
	#[test]
	fn rails_are_pushed_apart() {
		let geometry = geometry(2.0, 3.0, 1.0);
		for sample in opposing_rail_force(geometry, SegmentKind::LeftRail, 7).unwrap() {
			assert_eq!(sample.position.y, 0.0);
			assert_relative_eq!(sample.value, V3::new(0.0, -0.5, 0.0), epsilon = 1e-12);
		}
		for sample in opposing_rail_force(geometry, SegmentKind::RightRail, 7).unwrap() {
			assert_eq!(sample.position.y, 2.0);
			assert_relative_eq!(sample.value, V3::new(0.0, 0.5, 0.0), epsilon = 1e-12);
		}
	}
	#[test]
	fn projectile_force_on_rails_grows_toward_muzzle() {
		let geometry = geometry(3.0, 3.0, 1.0);
		let samples: Vec<Sample> = projectile_force_on_rail(geometry, SegmentKind::LeftRail, 31).unwrap().collect();
		assert_eq!(samples[0].position, V3::new(-3.0, 0.0, 0.0));
		// The muzzle end touches the projectile's axis
		assert_eq!(samples[30].value, V3::zeros());
		for pair in samples[..30].windows(2) {
			assert!(pair[1].value.norm() > pair[0].value.norm());
		}
		for sample in &samples[..30] {
			assert!(sample.value.y < 0.0);
			assert_relative_eq!(sample.value.x, 0.0, epsilon = 1e-12);
		}
		let right: Vec<Sample> = projectile_force_on_rail(geometry, SegmentKind::RightRail, 31).unwrap().collect();
		for (l, r) in samples.iter().zip(right.iter()) {
			assert_relative_eq!(l.value, -r.value, epsilon = 1e-12);
		}
	}
	#[test]
	fn rail_force_total_adds_magnitudes() {
		let geometry = geometry(3.0, 3.0, 1.0);
		let totals: Vec<ScalarSample> = rail_force_total(geometry, SegmentKind::LeftRail, 4).unwrap().collect();
		assert_eq!(totals.len(), 4);
		assert_eq!(totals[0].coordinate, -3.0);
		assert_eq!(totals[3].coordinate, 0.0);
		// At the muzzle only the opposing rail contributes
		assert_relative_eq!(totals[3].value, 1.0 / 3.0, epsilon = 1e-12);
		// At the breech: 1/3 from the other rail, (1/3) * (1 + 3/sqrt(18)) from the projectile
		assert_relative_eq!(totals[0].value, 1.0 / 3.0 + (1.0 + 3.0 / 18.0_f64.sqrt()) / 3.0, epsilon = 1e-12);
	}
	#[test]
	fn projectile_field_circles_the_projectile() {
		let geometry = geometry(3.0, 3.0, 1.0);
		let grid = Grid2::projectile_cross_section(&geometry, 11).unwrap();
		for sample in projectile_field(geometry, &grid) {
			assert_eq!(sample.value.y, 0.0);
			let radial = V3::new(sample.position.x, 0.0, sample.position.z);
			assert_relative_eq!(sample.value.dot(&radial), 0.0, epsilon = 1e-12);
		}
		// Centre of an odd grid is on the projectile
		let centre = projectile_field(geometry, &grid).nth(60).unwrap();
		assert_eq!(centre.position, V3::new(0.0, 1.5, 0.0));
		assert_eq!(centre.value, V3::zeros());
	}
}
