// Interactive session: slider change -> recompute the active visualization
use crate::prelude::*;
use crate::sweep::{self, ProjectileAxisSample};

/// One named curve of a line plot
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
	pub label: String,
	pub points: Vec<(Float, Float)>
}

/// Everything a rendering sink needs to draw one visualization
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
	/// Vectors on a plane, drawn with their in-plane components
	Quiver {
		visualization: Visualization,
		plane: Plane,
		arrows: Vec<Sample>
	},
	Lines {
		visualization: Visualization,
		x_label: &'static str,
		y_label: &'static str,
		series: Vec<Series>,
		/// Caveated single-number summary, e.g. the Riemann force total
		summary: Option<(&'static str, Float)>
	}
}

impl Figure {
	pub fn build(visualization: Visualization, geometry: GeometryConfig, resolution: usize, line_samples: usize) -> Result<Self> {
		let rails = [SegmentKind::LeftRail, SegmentKind::RightRail];
		Ok(match visualization {
			Visualization::RailField => {
				let grid = Grid2::rail_cross_section(&geometry, resolution)?;
				Self::Quiver {
					visualization,
					plane: grid.plane,
					arrows: sweep::rail_field(geometry, &grid).collect()
				}
			},
			Visualization::ProjectileAxis => {
				let samples: Vec<ProjectileAxisSample> = sweep::projectile_axis(geometry, line_samples)?.collect();
				Self::Lines {
					visualization,
					x_label: "r (distance from left rail)",
					y_label: "magnitude",
					series: vec![
						Series {
							label: "field magnitude".to_string(),
							points: samples.iter().map(|s| (s.r, s.field_magnitude)).collect()
						},
						Series {
							label: "force magnitude".to_string(),
							points: samples.iter().map(|s| (s.r, s.force_magnitude)).collect()
						}
					],
					summary: Some(("riemann force total", sweep::projectile_force_total(geometry, line_samples)?))
				}
			},
			Visualization::RailRepulsion => {
				let mut arrows = Vec::new();
				for rail in rails {
					arrows.extend(sweep::opposing_rail_force(geometry, rail, resolution)?);
				}
				Self::Quiver {
					visualization,
					plane: Plane::XY{z: 0.0},
					arrows
				}
			},
			Visualization::ProjectileOnRails => {
				let mut arrows = Vec::new();
				for rail in rails {
					arrows.extend(sweep::projectile_force_on_rail(geometry, rail, resolution)?);
				}
				Self::Quiver {
					visualization,
					plane: Plane::XY{z: 0.0},
					arrows
				}
			},
			Visualization::RailForceTotal => Self::Lines {
				visualization,
				x_label: "x (along rail)",
				y_label: "force magnitude",
				series: vec![Series {
					label: SegmentKind::LeftRail.name().to_string(),
					points: sweep::rail_force_total(geometry, SegmentKind::LeftRail, line_samples)?
						.map(|s| (s.coordinate, s.value))
						.collect()
				}],
				summary: None
			},
			Visualization::ProjectileField => {
				let grid = Grid2::projectile_cross_section(&geometry, resolution)?;
				Self::Quiver {
					visualization,
					plane: grid.plane,
					arrows: sweep::projectile_field(geometry, &grid).collect()
				}
			}
		})
	}
	pub fn visualization(&self) -> Visualization {
		match self {
			Self::Quiver{visualization, ..} => *visualization,
			Self::Lines{visualization, ..} => *visualization
		}
	}
	pub fn title(&self) -> &'static str {
		self.visualization().title()
	}
	pub fn axis_labels(&self) -> (&'static str, &'static str) {
		match self {
			Self::Quiver{plane, ..} => plane.axis_labels(),
			Self::Lines{x_label, y_label, ..} => (*x_label, *y_label)
		}
	}
}

/// Holds the current geometry and the active visualization, and recomputes the figure whenever either changes.
/// A failed update leaves the previous geometry and figure in place.
#[derive(Debug, Clone)]
pub struct Session {
	panel: ParameterPanel,
	geometry: GeometryConfig,
	visualization: Visualization,
	resolution: usize,
	line_samples: usize,
	figure: Figure,
	recomputes: u64
}

impl Session {
	/// Starts from the run's geometry snapped onto the sliders
	pub fn new(run: &RunConfig, visualization: Visualization) -> Result<Self> {
		let mut panel = ParameterPanel::default();
		panel.load(&run.geometry);
		let geometry = panel.geometry()?;
		let figure = Figure::build(visualization, geometry, run.resolution, run.line_samples)?;
		Ok(Self {
			panel,
			geometry,
			visualization,
			resolution: run.resolution,
			line_samples: run.line_samples,
			figure,
			recomputes: 1
		})
	}
	pub fn geometry(&self) -> &GeometryConfig {
		&self.geometry
	}
	pub fn panel(&self) -> &ParameterPanel {
		&self.panel
	}
	pub fn visualization(&self) -> Visualization {
		self.visualization
	}
	pub fn figure(&self) -> &Figure {
		&self.figure
	}
	/// Number of times a figure has been computed, including the initial one
	pub fn recomputes(&self) -> u64 {
		self.recomputes
	}
	/// Replaces all three parameters. Invalid values are rejected, valid ones are snapped onto the sliders like any slider input.
	pub fn set_geometry(&mut self, rail_separation: Float, rail_length: Float, current: Float) -> Result<&Figure> {
		let requested = self.geometry.set_geometry(rail_separation, rail_length, current)?;
		let mut panel = self.panel.clone();
		panel.load(&requested);
		self.update(panel, self.visualization)
	}
	/// Slider callback: snap the value onto the slider, then recompute
	pub fn set_slider(&mut self, parameter: Parameter, value: Float) -> Result<&Figure> {
		let mut panel = self.panel.clone();
		panel.set(parameter, value);
		self.update(panel, self.visualization)
	}
	pub fn set_visualization(&mut self, visualization: Visualization) -> Result<&Figure> {
		self.update(self.panel.clone(), visualization)
	}
	/// The panel is the only source of the committed geometry
	fn update(&mut self, panel: ParameterPanel, visualization: Visualization) -> Result<&Figure> {
		let geometry = panel.geometry()?;
		let figure = Figure::build(visualization, geometry, self.resolution, self.line_samples)?;
		// Only commit once the whole sweep succeeded
		self.geometry = geometry;
		self.visualization = visualization;
		self.panel = panel;
		self.figure = figure;
		self.recomputes += 1;
		Ok(&self.figure)
	}
}
