/* Rail-gun magnetostatics explorer
Closed-form finite-wire fields and Lorentz forces for two rails and a projectile, sampled over grids for quiver and line plots.
Units are arbitrary (no mu0/4pi), this is for comparing shapes of fields, not a physics engine.
*/

pub mod error;
pub mod config;
pub mod field;
pub mod force;
pub mod sweep;
pub mod session;
pub mod export;
#[cfg(feature = "image-rendering")]
pub mod plot;

pub mod prelude {
	pub use nalgebra::Vector3;
	pub const APP_NAME: &str = "Rail-gun field explorer";
	pub type Float = f64;
	pub type V3 = Vector3<Float>;
	pub use crate::{
		error::{RailgunError, Result},
		config::{GeometryConfig, ParameterPanel, Parameter, SliderSpec, RunConfig},
		field::{CurrentSegment, SegmentKind, FieldModel, field_at, combined_rail_field},
		force::{force_density_at, force_magnitude},
		sweep::{Grid1, Grid2, Plane, Sample, ScalarSample, Visualization},
		session::{Session, Figure}
	};
}
