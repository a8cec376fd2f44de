// Headless front end: pick the parameters the notebook sliders used to set, write every requested visualization to disk
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use railgun_fields::prelude::*;
use railgun_fields::export::save_figure_csv;
#[cfg(feature = "image-rendering")]
use railgun_fields::plot::{save_figure_png, PlotStyle};

#[derive(Parser)]
#[command(name = "railgun_fields")]
#[command(version)]
#[command(about = "Magnetic fields and forces of a simplified rail-gun", long_about = None)]
struct Cli {
	/// YAML run configuration, flags below override it
	#[arg(short, long)]
	config: Option<PathBuf>,
	/// Distance between the rails
	#[arg(short, long)]
	separation: Option<Float>,
	/// Length of the rails
	#[arg(short, long)]
	length: Option<Float>,
	/// Current magnitude
	#[arg(short = 'i', long)]
	current: Option<Float>,
	/// Visualizations to produce, all of them when omitted
	#[arg(short, long, value_enum)]
	mode: Vec<Visualization>,
	/// Points per axis for quiver plots
	#[arg(short, long)]
	resolution: Option<usize>,
	/// Points along line plots
	#[arg(long)]
	samples: Option<usize>,
	/// Output directory
	#[arg(short, long)]
	output: Option<PathBuf>
}

fn run_config(cli: &Cli) -> Result<RunConfig> {
	let mut run = match &cli.config {
		Some(path) => RunConfig::load(path)?,
		None => RunConfig::default()
	};
	run.geometry = run.geometry.set_geometry(
		cli.separation.unwrap_or(run.geometry.rail_separation()),
		cli.length.unwrap_or(run.geometry.rail_length()),
		cli.current.unwrap_or(run.geometry.current())
	)?;
	if let Some(resolution) = cli.resolution {
		run.resolution = resolution;
	}
	if let Some(samples) = cli.samples {
		run.line_samples = samples;
	}
	if let Some(output) = &cli.output {
		run.output_dir = output.clone();
	}
	Ok(run)
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
	let cli = Cli::parse();
	let run = run_config(&cli)?;
	let modes = if !cli.mode.is_empty() {
		cli.mode.clone()
	}
	else if !run.visualizations.is_empty() {
		run.visualizations.clone()
	}
	else {
		Visualization::ALL.to_vec()
	};
	// File and flag values alike land on the slider ranges and steps
	let mut session = Session::new(&run, modes[0])?;
	println!("{}", APP_NAME);
	for parameter in Parameter::ALL {
		let panel = session.panel();
		println!("  {} = {}", panel.spec(parameter).label, panel.value(parameter));
	}
	fs::create_dir_all(&run.output_dir)?;
	for mode in modes {
		let figure = session.set_visualization(mode)?;
		let csv_path = run.output_dir.join(format!("{}.csv", mode.slug()));
		let (x_label, y_label) = figure.axis_labels();
		println!("Writing \"{}\" ({} vs {}) to {}", figure.title(), y_label, x_label, csv_path.display());
		save_figure_csv(&csv_path, figure)?;
		#[cfg(feature = "image-rendering")] {
			let png_path = run.output_dir.join(format!("{}.png", mode.slug()));
			println!("Rendering \"{}\" to {}", figure.title(), png_path.display());
			save_figure_png(&png_path, figure, &PlotStyle::default())?;
		}
		if let Figure::Lines{summary: Some((label, value)), ..} = figure {
			println!("  {} = {} (comparative only, diverges for real wires)", label, value);
		}
	}
	Ok(())
}
