// Renders figures into images: quiver plots of vector samples and line plots of scalar curves
use std::path::Path;

use image::{Rgb, RgbImage, ImageBuffer};
use nalgebra::Vector2;

use crate::prelude::*;
use crate::session::Series;

pub type V2 = Vector2<Float>;
pub type ImgV2 = Vector2<u32>;

const SERIES_COLORS: [Rgb<u8>; 4] = [
	Rgb([80, 170, 255]),
	Rgb([255, 140, 60]),
	Rgb([120, 220, 120]),
	Rgb([230, 90, 200])
];

#[derive(Debug, Clone)]
pub struct PlotStyle {
	pub image_size: ImgV2,
	/// Pixels left empty around the plotted area
	pub margin_px: u32,
	pub background: Rgb<u8>,
	pub axis_color: Rgb<u8>,
	/// Every arrow is drawn this long, magnitude goes into brightness instead since fields blow up near the wires
	pub arrow_px: Float,
	pub weak_color: Rgb<u8>,
	pub strong_color: Rgb<u8>
}

impl Default for PlotStyle {
	fn default() -> Self {
		Self {
			image_size: ImgV2::new(600, 600),
			margin_px: 30,
			background: Rgb([0; 3]),
			axis_color: Rgb([90; 3]),
			arrow_px: 18.0,
			weak_color: Rgb([40, 60, 160]),
			strong_color: Rgb([255, 240, 120])
		}
	}
}

/// World (plot) coordinates to pixels, y pointing up in world space
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePosTranslater {
	pub scale: V2,
	/// World position of the bottom-left corner of the image
	pub origin: V2,
	pub image_size: ImgV2
}

impl ImagePosTranslater {
	/// Fits [min, max] into the image leaving `margin_px` on every side
	pub fn fit(min: V2, max: V2, image_size: ImgV2, margin_px: u32) -> Self {
		let usable = V2::new(
			(image_size.x.saturating_sub(margin_px.saturating_mul(2))).max(1) as Float,
			(image_size.y.saturating_sub(margin_px.saturating_mul(2))).max(1) as Float
		);
		let span = V2::new(nonzero_span(max.x - min.x), nonzero_span(max.y - min.y));
		let scale = usable.component_div(&span);
		let margin_world = V2::new(margin_px as Float / scale.x, margin_px as Float / scale.y);
		Self {
			scale,
			origin: min - margin_world,
			image_size
		}
	}
	pub fn world_to_px(&self, pos: V2) -> Option<ImgV2> {
		let px = self.world_to_px_float(pos);
		if px.x >= 0.0 && px.y >= 0.0 && px.x < self.image_size.x as Float && px.y < self.image_size.y as Float {
			Some(ImgV2::new(px.x as u32, px.y as u32))
		}
		else {
			None
		}
	}
	/// Unclipped pixel position, can be outside the image
	pub fn world_to_px_float(&self, pos: V2) -> V2 {
		let relative = (pos - self.origin).component_mul(&self.scale);
		V2::new(relative.x, self.image_size.y as Float - 1.0 - relative.y)
	}
}

fn nonzero_span(span: Float) -> Float {
	if span.abs() > Float::EPSILON {
		span
	}
	else {
		1.0
	}
}

pub fn render_figure(figure: &Figure, style: &PlotStyle) -> RgbImage {
	let mut image: RgbImage = ImageBuffer::from_pixel(style.image_size.x, style.image_size.y, style.background);
	match figure {
		Figure::Quiver{plane, arrows, ..} => render_quiver(&mut image, plane, arrows, style),
		Figure::Lines{series, ..} => render_lines(&mut image, series, style)
	}
	image
}

pub fn save_figure_png<P: AsRef<Path>>(path: P, figure: &Figure, style: &PlotStyle) -> Result<()> {
	render_figure(figure, style).save(path)?;
	Ok(())
}

fn render_quiver(image: &mut RgbImage, plane: &Plane, arrows: &[Sample], style: &PlotStyle) {
	let positions: Vec<V2> = arrows.iter().map(|a| to_v2(plane.project(&a.position))).collect();
	let Some((min, max)) = bounds(positions.iter().copied()) else {
		return;
	};
	let translater = ImagePosTranslater::fit(min, max, style.image_size, style.margin_px);
	draw_axes(image, &translater, min, max, style.axis_color);
	let max_magnitude = arrows.iter()
		.map(|a| to_v2(plane.project(&a.value)).norm())
		.filter(|m| m.is_finite())
		.fold(0.0, Float::max);
	for (arrow, pos) in arrows.iter().zip(positions) {
		let in_plane = to_v2(plane.project(&arrow.value));
		let magnitude = in_plane.norm();
		if magnitude == 0.0 || !magnitude.is_finite() {
			if let Some(px) = translater.world_to_px(pos) {
				image.put_pixel(px.x, px.y, style.weak_color);
			}
			continue;
		}
		let start = translater.world_to_px_float(pos);
		// Log scale so the arrows next to a wire don't wash out everything else
		let t = if max_magnitude > 0.0 {(1.0 + magnitude).ln() / (1.0 + max_magnitude).ln()} else {0.0};
		let color = lerp_color(style.weak_color, style.strong_color, t);
		// Image y points down
		let direction = V2::new(in_plane.x, -in_plane.y) / magnitude;
		let end = start + direction * style.arrow_px;
		draw_line(image, start, end, color);
		let head = style.arrow_px * 0.35;
		for angle in [2.6, -2.6] {
			let (sin, cos) = Float::sin_cos(angle);
			let barb = V2::new(direction.x * cos - direction.y * sin, direction.x * sin + direction.y * cos);
			draw_line(image, end, end + barb * head, color);
		}
	}
}

fn render_lines(image: &mut RgbImage, series: &[Series], style: &PlotStyle) {
	let all_points = series.iter()
		.flat_map(|s| s.points.iter())
		.map(|&(x, y)| V2::new(x, y))
		.filter(|p| p.x.is_finite() && p.y.is_finite());
	let Some((min, max)) = bounds(all_points) else {
		return;
	};
	let translater = ImagePosTranslater::fit(min, max, style.image_size, style.margin_px);
	draw_axes(image, &translater, min, max, style.axis_color);
	for (i, s) in series.iter().enumerate() {
		let color = SERIES_COLORS[i % SERIES_COLORS.len()];
		for pair in s.points.windows(2) {
			let a = V2::new(pair[0].0, pair[0].1);
			let b = V2::new(pair[1].0, pair[1].1);
			if a.iter().chain(b.iter()).all(|c| c.is_finite()) {
				draw_line(image, translater.world_to_px_float(a), translater.world_to_px_float(b), color);
			}
		}
	}
}

/// Axis lines through the world origin, or along the edge of the data when the origin is outside it
fn draw_axes(image: &mut RgbImage, translater: &ImagePosTranslater, min: V2, max: V2, color: Rgb<u8>) {
	let x_axis_y = 0.0_f64.clamp(min.y, max.y);
	let y_axis_x = 0.0_f64.clamp(min.x, max.x);
	draw_line(image, translater.world_to_px_float(V2::new(min.x, x_axis_y)), translater.world_to_px_float(V2::new(max.x, x_axis_y)), color);
	draw_line(image, translater.world_to_px_float(V2::new(y_axis_x, min.y)), translater.world_to_px_float(V2::new(y_axis_x, max.y)), color);
}

fn bounds(points: impl Iterator<Item = V2>) -> Option<(V2, V2)> {
	points.fold(None, |acc, p| match acc {
		None => Some((p, p)),
		Some((min, max)) => Some((min.inf(&p), max.sup(&p)))
	})
}

fn to_v2((u, v): (Float, Float)) -> V2 {
	V2::new(u, v)
}

fn lerp_color(a: Rgb<u8>, b: Rgb<u8>, t: Float) -> Rgb<u8> {
	let t = t.clamp(0.0, 1.0);
	let mut out = [0u8; 3];
	for i in 0..3 {
		out[i] = (a.0[i] as Float + (b.0[i] as Float - a.0[i] as Float) * t).round() as u8;
	}
	Rgb(out)
}

/// Bresenham, clipped to the image
fn draw_line(image: &mut RgbImage, start: V2, end: V2, color: Rgb<u8>) {
	let (mut x0, mut y0) = (start.x.round() as i64, start.y.round() as i64);
	let (x1, y1) = (end.x.round() as i64, end.y.round() as i64);
	let dx = (x1 - x0).abs();
	let dy = -(y1 - y0).abs();
	let sx = if x0 < x1 {1} else {-1};
	let sy = if y0 < y1 {1} else {-1};
	let mut err = dx + dy;
	loop {
		put_pixel_checked(image, x0, y0, color);
		if x0 == x1 && y0 == y1 {
			break;
		}
		let e2 = 2 * err;
		if e2 >= dy {
			err += dy;
			x0 += sx;
		}
		if e2 <= dx {
			err += dx;
			y0 += sy;
		}
	}
}

fn put_pixel_checked(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
	if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
		image.put_pixel(x as u32, y as u32, color);
	}
}
