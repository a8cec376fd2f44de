// Geometry parameters, slider panel and run configuration
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use serde_yaml::from_reader;

use crate::prelude::*;

/// Rail separation, rail length and current magnitude.
///
/// Immutable once built, every evaluator takes it by value or reference. Separation and length are
/// strictly positive and finite, current is finite (it may be negative, which reverses every field).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryFields")]
pub struct GeometryConfig {
	rail_separation: Float,
	rail_length: Float,
	current: Float
}

#[derive(Deserialize)]
struct GeometryFields {
	rail_separation: Float,
	rail_length: Float,
	current: Float
}

impl TryFrom<GeometryFields> for GeometryConfig {
	type Error = RailgunError;
	fn try_from(fields: GeometryFields) -> Result<Self> {
		Self::new(fields.rail_separation, fields.rail_length, fields.current)
	}
}

impl GeometryConfig {
	pub fn new(rail_separation: Float, rail_length: Float, current: Float) -> Result<Self> {
		check_positive("rail_separation", rail_separation)?;
		check_positive("rail_length", rail_length)?;
		if !current.is_finite() {
			return Err(RailgunError::InvalidConfiguration {
				parameter: "current",
				requirement: "finite",
				value: current
			});
		}
		Ok(Self {
			rail_separation,
			rail_length,
			current
		})
	}
	/// Returns a new config with all three parameters replaced, the receiver is left untouched
	pub fn set_geometry(&self, rail_separation: Float, rail_length: Float, current: Float) -> Result<Self> {
		Self::new(rail_separation, rail_length, current)
	}
	pub fn with_rail_separation(&self, rail_separation: Float) -> Result<Self> {
		Self::new(rail_separation, self.rail_length, self.current)
	}
	pub fn with_rail_length(&self, rail_length: Float) -> Result<Self> {
		Self::new(self.rail_separation, rail_length, self.current)
	}
	pub fn with_current(&self, current: Float) -> Result<Self> {
		Self::new(self.rail_separation, self.rail_length, current)
	}
	pub fn rail_separation(&self) -> Float {
		self.rail_separation
	}
	pub fn rail_length(&self) -> Float {
		self.rail_length
	}
	pub fn current(&self) -> Float {
		self.current
	}
}

impl Default for GeometryConfig {
	fn default() -> Self {
		Self {
			rail_separation: 3.0,
			rail_length: 3.0,
			current: 1.0
		}
	}
}

fn check_positive(parameter: &'static str, value: Float) -> Result<()> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	}
	else {
		Err(RailgunError::InvalidConfiguration {
			parameter,
			requirement: "finite and > 0",
			value
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
	RailSeparation,
	RailLength,
	Current
}

impl Parameter {
	pub const ALL: [Self; 3] = [Self::RailSeparation, Self::RailLength, Self::Current];
}

/// Range and step of one slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
	pub label: &'static str,
	pub min: Float,
	pub max: Float,
	pub step: Float,
	pub default: Float
}

impl SliderSpec {
	/// Clamps `value` into the slider's range and snaps it onto the nearest multiple of the step.
	/// Dividing by the number of steps per unit keeps e.g. 3.0 from coming out as 3.0000000000000004.
	pub fn snap(&self, value: Float) -> Float {
		if value.is_nan() {
			return self.default;
		}
		let clamped = value.clamp(self.min, self.max);
		let per_unit = 1.0 / self.step;
		((clamped * per_unit).round() / per_unit).clamp(self.min, self.max)
	}
}

/// The three sliders, holding their current (already snapped) positions
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterPanel {
	pub separation: SliderSpec,
	pub length: SliderSpec,
	pub current: SliderSpec,
	values: [Float; 3]
}

impl ParameterPanel {
	pub fn spec(&self, parameter: Parameter) -> &SliderSpec {
		match parameter {
			Parameter::RailSeparation => &self.separation,
			Parameter::RailLength => &self.length,
			Parameter::Current => &self.current
		}
	}
	pub fn value(&self, parameter: Parameter) -> Float {
		self.values[Self::index(parameter)]
	}
	/// Moves one slider, returns the value it actually landed on
	pub fn set(&mut self, parameter: Parameter, value: Float) -> Float {
		let snapped = self.spec(parameter).snap(value);
		self.values[Self::index(parameter)] = snapped;
		snapped
	}
	/// Moves all three sliders to the closest positions to an existing config
	pub fn load(&mut self, geometry: &GeometryConfig) {
		self.set(Parameter::RailSeparation, geometry.rail_separation());
		self.set(Parameter::RailLength, geometry.rail_length());
		self.set(Parameter::Current, geometry.current());
	}
	pub fn geometry(&self) -> Result<GeometryConfig> {
		GeometryConfig::new(
			self.value(Parameter::RailSeparation),
			self.value(Parameter::RailLength),
			self.value(Parameter::Current)
		)
	}
	fn index(parameter: Parameter) -> usize {
		match parameter {
			Parameter::RailSeparation => 0,
			Parameter::RailLength => 1,
			Parameter::Current => 2
		}
	}
}

impl Default for ParameterPanel {
	fn default() -> Self {
		let separation = SliderSpec {label: "Rail separation", min: 1.0, max: 5.0, step: 0.1, default: 3.0};
		let length = SliderSpec {label: "Rail length", min: 1.0, max: 5.0, step: 0.1, default: 3.0};
		let current = SliderSpec {label: "Current", min: 0.1, max: 5.0, step: 0.1, default: 1.0};
		Self {
			values: [separation.default, length.default, current.default],
			separation,
			length,
			current
		}
	}
}

/// Everything a headless run needs, loadable from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
	#[serde(default)]
	pub geometry: GeometryConfig,
	/// Points per axis for quiver grids
	#[serde(default = "default_resolution")]
	pub resolution: usize,
	/// Points along 1D curves
	#[serde(default = "default_line_samples")]
	pub line_samples: usize,
	#[serde(default = "default_output_dir")]
	pub output_dir: PathBuf,
	/// What to draw, everything when empty
	#[serde(default)]
	pub visualizations: Vec<Visualization>
}

fn default_resolution() -> usize {
	20
}

fn default_line_samples() -> usize {
	100
}

fn default_output_dir() -> PathBuf {
	PathBuf::from("output")
}

impl RunConfig {
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let file = File::open(path)?;
		let config: Self = from_reader(file)?;
		Ok(config)
	}
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			geometry: GeometryConfig::default(),
			resolution: default_resolution(),
			line_samples: default_line_samples(),
			output_dir: default_output_dir(),
			visualizations: Vec::new()
		}
	}
}
