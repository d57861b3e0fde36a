use player::visualizer::{Observed, Scene};
use yew::prelude::*;

use crate::{
    canvas::CanvasSurface,
    hooks::{animation::use_animation_loop, latest::Latest},
    Setup,
};

#[derive(Properties, PartialEq)]
pub struct VisualizerProps {
    /// Read every frame, changes to it never re-render the canvas.
    pub observed: Latest<Observed>,
}

#[rustfmt::skip::macros(html)]
#[function_component(Visualizer)]
pub fn visualizer(props: &VisualizerProps) -> Html {
    let setup = use_context::<Setup>().expect("no setup context found");
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let observed = props.observed.clone();
        let config = setup.config.clone();
        use_animation_loop(move || {
            let mut surface = CanvasSurface::attach(&canvas_ref)
                .map_err(|e| log::error!("No canvas to draw on: {e}"))
                .ok()?;
            let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
            let mut scene = Scene::new(config.canvas, config.visualizer, seed);
            Some(move |_: f64| {
                let observed = observed.get();
                scene.step(&observed);
                scene.paint(&mut surface, &observed);
            })
        });
    }

    html! {
        <div class={classes!("screen")}>
            <canvas ref={canvas_ref}
                    width={setup.config.canvas.width.to_string()}
                    height={setup.config.canvas.height.to_string()}
                    class={classes!("visualizer")} />
        </div>
    }
}
