// Plain numeric output of a figure, for plotting elsewhere
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::prelude::*;

/// Writes `figure` as CSV.
/// Quiver plots get one row per arrow (`x,y,z,vx,vy,vz,magnitude`), line plots one row per x value with a column per series.
pub fn write_figure_csv<W: Write>(writer: &mut W, figure: &Figure) -> Result<()> {
	match figure {
		Figure::Quiver{arrows, ..} => {
			writeln!(writer, "x,y,z,vx,vy,vz,magnitude")?;
			for arrow in arrows {
				let p = arrow.position;
				let v = arrow.value;
				writeln!(writer, "{},{},{},{},{},{},{}", p.x, p.y, p.z, v.x, v.y, v.z, v.norm())?;
			}
		},
		Figure::Lines{x_label, series, ..} => {
			let mut header = csv_field(x_label);
			for s in series {
				header.push(',');
				header.push_str(&csv_field(&s.label));
			}
			writeln!(writer, "{}", header)?;
			let rows = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
			for i in 0..rows {
				// Every series of one figure is sampled at the same x values
				let x = series.iter().find_map(|s| s.points.get(i)).map(|p| p.0).unwrap_or(Float::NAN);
				let mut row = format!("{}", x);
				for s in series {
					row.push(',');
					if let Some((_, y)) = s.points.get(i) {
						row.push_str(&y.to_string());
					}
				}
				writeln!(writer, "{}", row)?;
			}
		}
	}
	Ok(())
}

pub fn save_figure_csv<P: AsRef<Path>>(path: P, figure: &Figure) -> Result<()> {
	let mut writer = BufWriter::new(File::create(path)?);
	write_figure_csv(&mut writer, figure)?;
	writer.flush()?;
	Ok(())
}

fn csv_field(text: &str) -> String {
	if text.contains(',') || text.contains('"') {
		format!("\"{}\"", text.replace('"', "\"\""))
	}
	else {
		text.to_string()
	}
}
