// Closed-form field of a finite straight current segment
use crate::prelude::*;

/// The three wires of the model.
/// Rails run along x over [-rail_length, 0], the left one at y = 0 and the right one at y = rail_separation.
/// The projectile runs along y across the muzzle (x = 0), closing the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
	LeftRail,
	RightRail,
	Projectile
}

impl SegmentKind {
	pub const ALL: [SegmentKind; 3] = [SegmentKind::LeftRail, SegmentKind::RightRail, SegmentKind::Projectile];
	pub fn name(&self) -> &'static str {
		match self {
			Self::LeftRail => "left rail",
			Self::RightRail => "right rail",
			Self::Projectile => "projectile"
		}
	}
	/// The rail on the other side, `None` for the projectile
	pub fn opposing_rail(&self) -> Option<Self> {
		match self {
			Self::LeftRail => Some(Self::RightRail),
			Self::RightRail => Some(Self::LeftRail),
			Self::Projectile => None
		}
	}
}

/// One idealized, infinitely thin straight wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSegment {
	pub kind: SegmentKind,
	/// Direction times magnitude
	pub current: V3,
	/// Index of the coordinate the wire runs along (0 = x, 1 = y)
	axis: usize,
	/// Any point on the wire's axis
	offset: V3,
	/// Length used by the end-correction term
	length: Float
}

impl CurrentSegment {
	pub fn new(kind: SegmentKind, geometry: &GeometryConfig) -> Self {
		let i = geometry.current();
		match kind {
			// Current goes up the left rail, across the projectile and back down the right rail
			SegmentKind::LeftRail => Self {
				kind,
				current: V3::new(i, 0.0, 0.0),
				axis: 0,
				offset: V3::zeros(),
				length: geometry.rail_length()
			},
			SegmentKind::RightRail => Self {
				kind,
				current: V3::new(-i, 0.0, 0.0),
				axis: 0,
				offset: V3::new(0.0, geometry.rail_separation(), 0.0),
				length: geometry.rail_length()
			},
			SegmentKind::Projectile => Self {
				kind,
				current: V3::new(0.0, i, 0.0),
				axis: 1,
				offset: V3::zeros(),
				length: geometry.rail_separation()
			}
		}
	}
	pub fn all(geometry: &GeometryConfig) -> [Self; 3] {
		SegmentKind::ALL.map(|kind| Self::new(kind, geometry))
	}
	/// Unit current element pointing the way the current flows, used as the receiving element when sweeping forces
	pub fn unit_current(&self) -> V3 {
		let magnitude = self.current.norm();
		if magnitude == 0.0 {
			return self.current;
		}
		self.current / magnitude
	}
	/// Perpendicular displacement from the wire's axis to `point`
	pub fn effective_point(&self, point: V3) -> V3 {
		let mut out = point - self.offset;
		out[self.axis] = 0.0;
		out
	}
}

/// Which flavour of the field formula to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldModel {
	/// Scale the infinite-wire field by `1 + L / sqrt(L^2 + r^2)`, with `r` the perpendicular distance only.
	/// There is no axial taper toward the wire's ends. The rail-repulsion plots turn this off.
	pub use_finite_length_correction: bool
}

impl FieldModel {
	pub const FINITE_WIRE: Self = Self {use_finite_length_correction: true};
	pub const INFINITE_WIRE: Self = Self {use_finite_length_correction: false};
	/// Field of `segment` at `point`. Exactly zero when the point is on the wire's axis, where the formula is singular.
	pub fn field_at(&self, segment: &CurrentSegment, point: V3) -> V3 {
		let effective = segment.effective_point(point);
		let r = effective.norm();
		if r == 0.0 {
			return V3::zeros();
		}
		let r_hat = effective / r;
		let base = segment.current.cross(&r_hat) / r;
		if self.use_finite_length_correction {
			base * end_correction(segment.length, r)
		}
		else {
			base
		}
	}
	/// Sum of both rails' fields
	pub fn combined_rail_field(&self, point: V3, geometry: &GeometryConfig) -> V3 {
		self.field_at(&CurrentSegment::new(SegmentKind::LeftRail, geometry), point)
		+ self.field_at(&CurrentSegment::new(SegmentKind::RightRail, geometry), point)
	}
}

impl Default for FieldModel {
	fn default() -> Self {
		Self::FINITE_WIRE
	}
}

/// Depends only on the perpendicular distance `r`, not on where along the wire the point sits,
/// so the field is the same at every axial position.
fn end_correction(length: Float, r: Float) -> Float {
	1.0 + length / (length.powi(2) + r.powi(2)).sqrt()
}

/// Finite-wire field of one of the three segments
pub fn field_at(kind: SegmentKind, point: V3, geometry: &GeometryConfig) -> V3 {
	FieldModel::FINITE_WIRE.field_at(&CurrentSegment::new(kind, geometry), point)
}

pub fn combined_rail_field(point: V3, geometry: &GeometryConfig) -> V3 {
	FieldModel::FINITE_WIRE.combined_rail_field(point, geometry)
}
