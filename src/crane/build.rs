//! Scene construction: crane, drop-off container and loads.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::scene::{LocalTransform, SceneGraph, SceneNodeId, Shape};

use super::config::{CraneConfig, CraneDimensions};
use super::load::Load;
use super::rig::{CraneNodes, CranePose, CraneRig, Finger};

/// Material colours of the crane scene.
pub mod palette {
    pub const CRANE: u32 = 0xd4af37;
    pub const CABIN: u32 = 0x628db2;
    pub const METAL: u32 = 0x9e8e8e;
    pub const DARK_METAL: u32 = 0x5e4e4e;
    pub const CONTAINER: u32 = 0x4682b4;
    pub const CONTAINER_BASE: u32 = 0x151e3d;
}

/// Thickness of the container walls and floor.
const CONTAINER_WALL: f32 = 3.0;
/// Inset keeping the container floor from z-fighting with the walls.
const CONTAINER_FLOOR_INSET: f32 = 0.1;
/// Fraction of the jib / counter-jib length where the pendants attach.
const PENDANT_REACH: f32 = 0.66;

/// A freshly built scene.
pub struct CraneScene {
    pub graph: SceneGraph,
    pub rig: CraneRig,
    pub loads: Vec<Load>,
    pub container: SceneNodeId,
}

impl CraneScene {
    /// Build the crane in its rest pose, the container and every configured load.
    pub fn build(config: &CraneConfig) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let nodes = build_crane(&mut graph, root, &config.dimensions);
        let container = build_container(&mut graph, root, &config.dimensions, config.container_position);

        let loads = config
            .loads
            .iter()
            .map(|load| {
                let rotation = Quat::from_euler(EulerRot::XYZ, load.rotation.x, load.rotation.y, load.rotation.z);
                let node = graph.add_mesh(
                    root,
                    load.name.clone(),
                    load.shape,
                    load.color,
                    LocalTransform::from_position(load.position).with_rotation(rotation),
                );
                Load {
                    name: load.name.clone(),
                    node,
                    shape: load.shape,
                    radius: load.bounding_radius(),
                }
            })
            .collect::<Vec<_>>();

        let rig = CraneRig::new(nodes, CranePose::rest(&config.dimensions), config.dimensions.cable_length);
        rig.apply(&mut graph);

        log::debug!(
            "Built crane scene: {} nodes, {} materials, {} loads",
            graph.node_count(),
            graph.materials().len(),
            loads.len()
        );

        Self { graph, rig, loads, container }
    }
}

fn build_crane(graph: &mut SceneGraph, root: SceneNodeId, dims: &CraneDimensions) -> CraneNodes {
    let crane = graph.add_group(root, "crane", Vec3::ZERO);

    let base = graph.add_mesh(
        crane,
        "base",
        Shape::Box { size: dims.base },
        palette::DARK_METAL,
        LocalTransform::from_position(Vec3::new(0.0, dims.base.y / 2.0, 0.0)),
    );
    let tower = graph.add_mesh(
        crane,
        "tower",
        Shape::Box { size: dims.tower },
        palette::CRANE,
        LocalTransform::from_position(Vec3::new(0.0, dims.base.y + dims.tower.y / 2.0, 0.0)),
    );

    let upper_section = graph.add_group(crane, "upper_section", Vec3::new(0.0, dims.upper_height(), 0.0));
    let deck = dims.cabin.y;

    let cabin = graph.add_mesh(
        upper_section,
        "cabin",
        Shape::Box { size: dims.cabin },
        palette::CABIN,
        LocalTransform::from_position(Vec3::new((dims.cabin.x - dims.tower.x) / 2.0, deck / 2.0, 0.0)),
    );
    let apex = graph.add_mesh(
        upper_section,
        "apex",
        Shape::Box { size: dims.apex },
        palette::CRANE,
        LocalTransform::from_position(Vec3::new(0.0, deck + dims.apex.y / 2.0, 0.0)),
    );
    let jib = graph.add_mesh(
        upper_section,
        "jib",
        Shape::Box { size: dims.jib },
        palette::CRANE,
        LocalTransform::from_position(Vec3::new(dims.jib_center_x(), deck + dims.jib.y / 2.0, 0.0)),
    );
    let counter_jib = graph.add_mesh(
        upper_section,
        "counter_jib",
        Shape::Box { size: dims.counter_jib },
        palette::CRANE,
        LocalTransform::from_position(Vec3::new(
            -dims.apex.x / 2.0 - dims.counter_jib.x / 2.0,
            deck + dims.counter_jib.y / 2.0,
            0.0,
        )),
    );
    let counter_weight = graph.add_mesh(
        upper_section,
        "counter_weight",
        Shape::Box { size: dims.counter_weight },
        palette::DARK_METAL,
        LocalTransform::from_position(Vec3::new(dims.counter_weight.x / 2.0 - dims.counter_jib.x, deck, 0.0)),
    );

    let apex_top = Vec2::new(0.0, deck + dims.apex.y);
    let jib_top = deck + dims.jib.y;
    let rear_pendant = add_pendant(
        graph,
        upper_section,
        "rear_pendant",
        dims.pendant_radius,
        apex_top,
        Vec2::new(-dims.apex.x / 2.0 - dims.counter_jib.x * PENDANT_REACH, jib_top),
        false,
    );
    let front_pendant = add_pendant(
        graph,
        upper_section,
        "front_pendant",
        dims.pendant_radius,
        apex_top,
        Vec2::new(dims.apex.x / 2.0 + dims.jib.x * PENDANT_REACH, jib_top),
        true,
    );

    let trolley_assembly = graph.add_group(
        upper_section,
        "trolley_assembly",
        Vec3::new(dims.trolley_start, dims.trolley_height(), 0.0),
    );
    let trolley = graph.add_mesh(
        trolley_assembly,
        "trolley",
        Shape::Box { size: dims.trolley },
        palette::DARK_METAL,
        LocalTransform::identity(),
    );
    let cable = graph.add_mesh(
        trolley_assembly,
        "cable",
        Shape::Cylinder { radius: dims.cable_radius, height: dims.cable_length },
        palette::METAL,
        LocalTransform::from_position(Vec3::new(0.0, -dims.cable_length / 2.0, 0.0)),
    );

    let claw_section = graph.add_group(
        trolley_assembly,
        "claw_section",
        Vec3::new(0.0, dims.claw_rest_height(), 0.0),
    );
    let block = graph.add_mesh(
        claw_section,
        "block",
        Shape::cube(dims.block),
        palette::DARK_METAL,
        LocalTransform::from_position(Vec3::new(0.0, dims.block / 2.0, 0.0)),
    );
    let fingers = Finger::ALL.map(|finger| {
        graph.add_mesh(
            claw_section,
            format!("{:?}_finger", finger).to_lowercase(),
            Shape::ClawFinger,
            palette::METAL,
            LocalTransform::identity()
                .with_rotation(finger.rotation(0.0))
                .with_scale(dims.claw),
        )
    });

    CraneNodes {
        crane,
        base,
        tower,
        upper_section,
        cabin,
        apex,
        jib,
        counter_jib,
        counter_weight,
        rear_pendant,
        front_pendant,
        trolley_assembly,
        trolley,
        cable,
        claw_section,
        block,
        fingers,
    }
}

/// Tie rod between two points in the upper section's XY plane.
fn add_pendant(
    graph: &mut SceneGraph,
    parent: SceneNodeId,
    name: &str,
    radius: f32,
    from: Vec2,
    to: Vec2,
    front: bool,
) -> SceneNodeId {
    let span = to - from;
    let length = span.length();
    let tilt = (span.y.abs() / span.x.abs()).atan() + FRAC_PI_2;
    let angle = if front { -tilt } else { tilt };
    let mid = (from + to) / 2.0;

    graph.add_mesh(
        parent,
        name,
        Shape::Cylinder { radius, height: length },
        palette::METAL,
        LocalTransform::from_position(Vec3::new(mid.x, mid.y, 0.0)).with_rotation(Quat::from_rotation_z(angle)),
    )
}

/// Open box sized to take the claw with room on every side.
fn build_container(graph: &mut SceneGraph, root: SceneNodeId, dims: &CraneDimensions, position: Vec3) -> SceneNodeId {
    let span = 2.0 * dims.claw.x + dims.block;
    let length = 1.5 * span;
    let width = 2.5 * span;
    let height = span;

    let container = graph.add_group(root, "container", position);
    graph.transform_mut(container).rotation = Quat::from_rotation_y(PI);

    graph.add_mesh(
        container,
        "container_floor",
        Shape::Box {
            size: Vec3::new(length - CONTAINER_FLOOR_INSET, CONTAINER_WALL, width - CONTAINER_FLOOR_INSET),
        },
        palette::CONTAINER_BASE,
        LocalTransform::from_position(Vec3::new(0.0, CONTAINER_WALL / 2.0, 0.0)),
    );

    let wall_y = height / 2.0;
    for z in [width / 2.0, -width / 2.0] {
        graph.add_mesh(
            container,
            "container_wall",
            Shape::Box { size: Vec3::new(length, height, CONTAINER_WALL) },
            palette::CONTAINER,
            LocalTransform::from_position(Vec3::new(0.0, wall_y, z)),
        );
    }
    let end_x = length / 2.0 - CONTAINER_WALL / 2.0;
    for x in [end_x, -end_x] {
        graph.add_mesh(
            container,
            "container_wall",
            Shape::Box { size: Vec3::new(width, height, CONTAINER_WALL) },
            palette::CONTAINER,
            LocalTransform::from_position(Vec3::new(x, wall_y, 0.0)).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        );
    }

    container
}
