//! Plotting of sampled beam profiles.
//!
//! The backend is chosen from the file extension: `.svg` uses the [`SVGBackend`], `.png`, `.bmp`
//! and `.jpg` the [`BitMapBackend`].
use crate::{
    error::{GbError, GbResult},
    profile::{BeamProfiles, BeamSide, ProfileLine, SampleRange},
};
use itertools::izip;
use plotters::{
    coord::Shift,
    prelude::{
        BitMapBackend, ChartBuilder, Circle, DrawingArea, DrawingBackend, IntoDrawingArea,
        LineSeries, SVGBackend,
    },
    style::{Color, RGBColor, BLUE, GREEN, WHITE},
};
use std::{ops::Range, path::Path};

/// Drawing backend of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PltBackEnd {
    /// scalable vector graphics (`.svg`)
    SVG,
    /// raster image (`.png`, `.bmp`, `.jpg`)
    Bitmap,
}
impl PltBackEnd {
    /// Select the backend matching the extension of the given file.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Plot`] if the extension is missing or unsupported.
    pub fn from_path(path: &Path) -> GbResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                GbError::Plot(format!("no file extension in {}", path.display()))
            })?;
        match ext.as_str() {
            "svg" => Ok(Self::SVG),
            "png" | "bmp" | "jpg" => Ok(Self::Bitmap),
            _ => Err(GbError::Plot(format!(
                "unsupported file extension \"{ext}\". Choose \".svg\", \".png\", \".bmp\" or \".jpg\""
            ))),
        }
    }
}

/// Anything that can be written to an image file.
pub trait Plottable {
    /// Plot `self` into the given file.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Plot`] if the backend cannot be determined or drawing fails.
    fn to_plot(&self, file_path: &Path) -> GbResult<()>;
}

/// Figure settings of a beam profile plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamPlot {
    fig_size: (u32, u32),
    caption: Option<String>,
    max_markers: usize,
}
impl Default for BeamPlot {
    fn default() -> Self {
        Self {
            fig_size: (1000, 600),
            caption: None,
            max_markers: 60,
        }
    }
}
impl BeamPlot {
    /// Set the figure size in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.fig_size = (width, height);
        self
    }
    /// Set a caption drawn on top of the chart.
    #[must_use]
    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_owned());
        self
    }
    /// Line color of the given beam.
    #[must_use]
    pub const fn beam_color(beam: BeamSide) -> RGBColor {
        match beam {
            BeamSide::Object => GREEN,
            BeamSide::Image => BLUE,
        }
    }
    /// Axis limits `(z, radius)` enclosing all lines.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Plot`] if there are no finite samples.
    pub fn axis_limits(lines: &[ProfileLine]) -> GbResult<(Range<f64>, Range<f64>)> {
        let mut z_min = f64::INFINITY;
        let mut z_max = f64::NEG_INFINITY;
        let mut r_max = 0.0_f64;
        for line in lines {
            for (z, y) in izip!(line.x.iter(), line.y.iter()) {
                if z.is_finite() && y.is_finite() {
                    z_min = z_min.min(*z);
                    z_max = z_max.max(*z);
                    r_max = r_max.max(y.abs());
                }
            }
        }
        if z_min >= z_max || r_max <= 0.0 {
            return Err(GbError::Plot("no finite data to plot".into()));
        }
        let r_max = 1.1 * r_max;
        Ok((z_min..z_max, -r_max..r_max))
    }
    /// Write the profiles to the given file.
    ///
    /// # Errors
    ///
    /// This function will return a [`GbError::Plot`] if the backend cannot be determined or drawing fails.
    pub fn plot(&self, profiles: &BeamProfiles, path: &Path) -> GbResult<()> {
        match PltBackEnd::from_path(path)? {
            PltBackEnd::SVG => {
                let root = SVGBackend::new(path, self.fig_size).into_drawing_area();
                self.draw(profiles, &root)
            }
            PltBackEnd::Bitmap => {
                let root = BitMapBackend::new(path, self.fig_size).into_drawing_area();
                self.draw(profiles, &root)
            }
        }
    }
    fn draw<DB: DrawingBackend>(
        &self,
        profiles: &BeamProfiles,
        root: &DrawingArea<DB, Shift>,
    ) -> GbResult<()> {
        let lines = profiles.lines();
        let (z_range, r_range) = Self::axis_limits(&lines)?;
        root.fill(&WHITE).map_err(plot_error)?;
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(5)
            .x_label_area_size(40)
            .y_label_area_size(60);
        if let Some(caption) = &self.caption {
            builder.caption(caption, ("sans-serif", 20));
        }
        let mut chart = builder
            .build_cartesian_2d(z_range, r_range)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .x_desc("z (mm)")
            .y_desc("beam radius (µm)")
            .draw()
            .map_err(plot_error)?;
        for line in &lines {
            let color = Self::beam_color(line.beam);
            match line.range {
                SampleRange::Physical => {
                    chart
                        .draw_series(LineSeries::new(
                            izip!(line.x.iter(), line.y.iter()).map(|(z, y)| (*z, *y)),
                            color.stroke_width(2),
                        ))
                        .map_err(plot_error)?;
                }
                // dotted: sparse markers
                SampleRange::Extended => {
                    let step = (line.x.len() / self.max_markers).max(1);
                    chart
                        .draw_series(
                            izip!(line.x.iter(), line.y.iter())
                                .step_by(step)
                                .map(|(z, y)| Circle::new((*z, *y), 1, color.filled())),
                        )
                        .map_err(plot_error)?;
                }
            }
        }
        root.present().map_err(plot_error)
    }
}

fn plot_error<E: std::fmt::Display>(e: E) -> GbError {
    GbError::Plot(format!("drawing failed: {e}"))
}

impl Plottable for BeamProfiles {
    fn to_plot(&self, file_path: &Path) -> GbResult<()> {
        BeamPlot::default().plot(self, file_path)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gaussian_beam::GaussianBeam, micrometer, millimeter, nanometer, profile::ProfileSampler};
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    fn profiles() -> BeamProfiles {
        let object = GaussianBeam::new(micrometer!(20.0), nanometer!(1000.0)).unwrap();
        let image = GaussianBeam::new(micrometer!(40.0), nanometer!(1000.0)).unwrap();
        ProfileSampler::new(101, millimeter!(5.0))
            .unwrap()
            .sample(&object, millimeter!(15.0), &image, millimeter!(30.0))
            .unwrap()
    }
    #[test]
    fn backend_from_path() {
        assert_eq!(
            PltBackEnd::from_path(Path::new("beam.svg")).unwrap(),
            PltBackEnd::SVG
        );
        assert_eq!(
            PltBackEnd::from_path(Path::new("beam.PNG")).unwrap(),
            PltBackEnd::Bitmap
        );
        assert_eq!(
            PltBackEnd::from_path(Path::new("beam.jpg")).unwrap(),
            PltBackEnd::Bitmap
        );
        assert_matches!(
            PltBackEnd::from_path(Path::new("beam.txt")),
            Err(GbError::Plot(_))
        );
        assert_matches!(
            PltBackEnd::from_path(Path::new("beam")),
            Err(GbError::Plot(_))
        );
    }
    #[test]
    fn colors() {
        assert_eq!(BeamPlot::beam_color(BeamSide::Object), GREEN);
        assert_eq!(BeamPlot::beam_color(BeamSide::Image), BLUE);
    }
    #[test]
    fn axis_limits() {
        let profiles = profiles();
        let (z, r) = BeamPlot::axis_limits(&profiles.lines()).unwrap();
        assert_relative_eq!(z.start, -5.0);
        assert_relative_eq!(z.end, 50.0);
        let largest = profiles
            .lines()
            .iter()
            .flat_map(|l| l.y.iter().copied().collect::<Vec<f64>>())
            .fold(0.0_f64, f64::max);
        assert_relative_eq!(r.end, 1.1 * largest);
        assert_relative_eq!(r.start, -r.end);
        assert_matches!(BeamPlot::axis_limits(&[]), Err(GbError::Plot(_)));
    }
    #[test]
    fn unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beam.pdf");
        assert_matches!(profiles().to_plot(&path), Err(GbError::Plot(_)));
        assert!(!path.exists());
    }
    #[test]
    fn builder() {
        let plot = BeamPlot::default().with_size(200, 100).with_caption("test");
        assert_eq!(plot.fig_size, (200, 100));
        assert_eq!(plot.caption.as_deref(), Some("test"));
    }
}
