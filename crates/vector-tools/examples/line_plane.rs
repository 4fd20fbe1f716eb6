//! Walk through the basic constructions on a small scene.
//!
//! Usage:
//!   cargo run -p vector-tools --example line_plane

use vector_tools::prelude::*;

fn main() {
    let a = Vec3::new(1.0, 0.0, 0.0);
    let b = Vec3::new(0.0, 1.0, 0.0);
    let c = Vec3::new(0.0, 0.0, 1.0);
    let plane = match Plane3::from_three_points(a, b, c) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("plane: {e}");
            return;
        }
    };
    let (pa, pb, pc, pd) = plane.coefficients();
    println!("{plane}");
    println!("  {pa} x + {pb} y + {pc} z = {pd}");

    let lines = [
        Line3::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)),
        Line3::new(Vec3::zeros(), Vec3::new(1.0, -1.0, 0.0)),
        Line3::new(a, b - a),
    ];
    for line in &lines {
        match intersect_line_plane(line, &plane) {
            Ok(x) => println!("{line} meets the plane at {}", vector_tools::geom3::fmt_vec3(&x)),
            Err(e) => println!("{line}: {e}"),
        }
    }
}
