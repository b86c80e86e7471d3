use std::error::Error;
use std::process::ExitCode;

use clip_assistant::prelude::*;
use log::{error, info};

const USAGE: &str = "usage: clip_assistant <file.obj> [distance ...]";
const START_DISTANCE: f32 = 10.0;
const ZOOM_STEPS: usize = 6;

fn print_status(scene: &Scene, controller: &ClipController) {
    if let Some(label) = controller.status_label() {
        println!("{:>7.3}  {}", scene.view_distance(0), label);
    }
}

/// Splits arguments into the OBJ path and the view distances to replay.
fn parse_args<I>(args: I) -> Result<(String, Vec<f32>), Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let path = args.next().ok_or(USAGE)?;
    let distances = args
        .map(|arg| arg.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok((path, distances))
}

fn run() -> Result<(), Box<dyn Error>> {
    let (path, distances) = parse_args(std::env::args().skip(1))?;

    let mut scene = Scene::load_obj(&path)?;
    scene.select_all();
    info!("{}: {} object(s) selected", path, scene.selected().count());

    let settings = ClipSettings::default().with_debug_output(true);
    let mut controller = ClipController::new(settings);
    controller.toggle();

    if !distances.is_empty() {
        for distance in distances {
            if let Some(viewport) = scene.viewport_mut(0) {
                viewport.set_view_distance(distance);
            }
            controller.apply(&mut scene)?;
            print_status(&scene, &controller);
        }
        return Ok(());
    }

    if let Some(viewport) = scene.viewport_mut(0) {
        viewport.set_view_distance(START_DISTANCE);
    }

    // Zoom out, then back in past the start
    let sequence = std::iter::repeat(InputKind::WheelDown)
        .take(ZOOM_STEPS)
        .chain(std::iter::repeat(InputKind::WheelUp).take(ZOOM_STEPS * 2));

    for kind in sequence {
        let event = InputEvent::new(kind);
        if let Some(viewport) = scene.viewport_mut(0) {
            viewport.zoom(&event);
        }
        controller.handle_event(&event, &mut scene)?;
        print_status(&scene, &controller);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
