//
// Potential field path planning in 3D.
//
// Run with `--show` to open a gnuplot window and `--save <file.png>` to
// write the plot. Set RUST_LOG=debug for planner logging.

use log::{error, info};

use potential_field_3d::utils::plot_planning_result;
use potential_field_3d::{Obstacles3D, PotentialFieldConfig, PotentialFieldPlanner3D, Point3D};

fn main() {
    env_logger::init();
    info!("Potential Field 3D path planning start!!");

    let args: Vec<String> = std::env::args().collect();
    let show_animation = args.iter().any(|a| a == "--show");
    let save_path = args
        .iter()
        .position(|a| a == "--save")
        .and_then(|i| args.get(i + 1).cloned());

    let start = Point3D::new(0.0, 0.0, 0.0);
    let goal = Point3D::new(30.0, 30.0, 30.0);
    let grid_size = 0.5; // potential grid size [m]
    let robot_radius = 5.0; // robot radius [m]

    let ox = [15.0, 5.0, 20.0, 25.0]; // obstacle x position list [m]
    let oy = [25.0, 15.0, 26.0, 25.0]; // obstacle y position list [m]
    let oz = [1.0, 2.0, 3.0, 4.0]; // obstacle z position list [m]
    let obstacles = Obstacles3D::from_xyz(&ox, &oy, &oz);

    let planner = match PotentialFieldPlanner3D::new(
        obstacles.clone(),
        PotentialFieldConfig::new(grid_size, robot_radius),
    ) {
        Ok(planner) => planner,
        Err(e) => {
            error!("Invalid planner setup: {}", e);
            std::process::exit(1);
        }
    };

    let (path, grid) = match planner.plan_with_grid(start, goal) {
        Ok(result) => result,
        Err(e) => {
            error!("Cannot find path: {}", e);
            std::process::exit(1);
        }
    };

    let [xw, yw, zw] = grid.dims();
    info!(
        "Found path with {} points ({:.2} m) on a {} x {} x {} grid",
        path.len(),
        path.total_length(),
        xw,
        yw,
        zw
    );

    if show_animation || save_path.is_some() {
        let vis = plot_planning_result(&path, &obstacles, start, goal, "Potential Field Path Planning 3D");
        if let Some(file) = save_path {
            match vis.save_png(&file, 800, 600) {
                Ok(()) => info!("Plot saved to: {}", file),
                Err(e) => error!("{}", e),
            }
        }
        if show_animation {
            if let Err(e) = vis.show() {
                error!("{}", e);
            }
        }
    }

    info!("Potential Field 3D path planning finish!!");
}
