//! Visualization utilities for potential_field_3d
//!
//! Collects obstacles, paths and markers, then renders them into a
//! gnuplot 3D figure on `show` or `save_png`.

use gnuplot::{AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Obstacles3D, Path3D, PlannerError, PlannerResult, Point3D};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(colors::PATH, "Path")
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone)]
enum Series {
    Line { x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, style: PathStyle },
    Points { x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, style: PointStyle },
}

/// 3D plot builder
#[derive(Debug, Clone)]
pub struct Visualizer3D {
    title: String,
    x_label: String,
    y_label: String,
    z_label: String,
    series: Vec<Series>,
}

impl Visualizer3D {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            z_label: "Z [m]".to_string(),
            series: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_labels(&mut self, x: &str, y: &str, z: &str) -> &mut Self {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
        self.z_label = z.to_string();
        self
    }

    /// Number of plotted data series
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn plot_path(&mut self, path: &Path3D, style: &PathStyle) -> &mut Self {
        self.series.push(Series::Line {
            x: path.x_coords(),
            y: path.y_coords(),
            z: path.z_coords(),
            style: style.clone(),
        });
        self
    }

    pub fn plot_obstacles(&mut self, obstacles: &Obstacles3D) -> &mut Self {
        let style = PointStyle::new(colors::OBSTACLE, "Obstacles")
            .with_symbol('S')
            .with_size(1.0);
        self.series.push(Series::Points {
            x: obstacles.x_coords(),
            y: obstacles.y_coords(),
            z: obstacles.z_coords(),
            style,
        });
        self
    }

    pub fn plot_point(&mut self, point: Point3D, style: &PointStyle) -> &mut Self {
        self.series.push(Series::Points {
            x: vec![point.x],
            y: vec![point.y],
            z: vec![point.z],
            style: style.clone(),
        });
        self
    }

    pub fn plot_start(&mut self, point: Point3D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, point: Point3D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Build a gnuplot figure from the collected series
    pub fn render(&self) -> Figure {
        let mut figure = Figure::new();
        {
            let axes = figure.axes3d();
            if !self.title.is_empty() {
                axes.set_title(&self.title, &[]);
            }
            axes.set_x_label(&self.x_label, &[]);
            axes.set_y_label(&self.y_label, &[]);
            axes.set_z_label(&self.z_label, &[]);

            for series in &self.series {
                match series {
                    Series::Line { x, y, z, style } => {
                        axes.lines(x, y, z, &[
                            Caption(&style.caption),
                            Color(&style.color),
                            LineWidth(style.line_width),
                        ]);
                    }
                    Series::Points { x, y, z, style } => {
                        axes.points(x, y, z, &[
                            Caption(&style.caption),
                            Color(&style.color),
                            PointSymbol(style.symbol),
                            PointSize(style.size),
                        ]);
                    }
                }
            }
        }
        figure
    }

    /// Open an interactive gnuplot window
    pub fn show(&self) -> PlannerResult<()> {
        self.render()
            .show()
            .map(|_| ())
            .map_err(|e| PlannerError::Visualization(e.to_string()))
    }

    pub fn save_png(&self, path: &str, width: u32, height: u32) -> PlannerResult<()> {
        self.render()
            .save_to_png(path, width, height)
            .map_err(|e| PlannerError::Visualization(e.to_string()))
    }
}

impl Default for Visualizer3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Obstacles, path, start and goal in one figure
pub fn plot_planning_result(
    path: &Path3D,
    obstacles: &Obstacles3D,
    start: Point3D,
    goal: Point3D,
    title: &str,
) -> Visualizer3D {
    let mut vis = Visualizer3D::new();
    vis.set_title(title)
        .plot_obstacles(obstacles)
        .plot_path(path, &PathStyle::new(colors::PATH, "Potential Field Path"))
        .plot_start(start)
        .plot_goal(goal);
    vis
}
