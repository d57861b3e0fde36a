// Remove annoying warning from wasm_bindgen
#![allow(non_snake_case, non_upper_case_globals)]

macro_rules! click_dispatch {
    ($dispatcher:ident, $action:expr) => {{
        let dispatcher = $dispatcher.clone();
        yew::Callback::from(move |_: yew::MouseEvent| dispatcher.dispatch($action))
    }};
}

mod canvas;
mod hooks;
mod musicplayer;
mod query;
mod slider;
mod trackinfo;
mod tracklist;
mod transport;
mod visualizer;
mod volume;

use std::rc::Rc;

use musicplayer::MusicPlayer;
use player::{Config, Overrides};
use wasm_bindgen::prelude::wasm_bindgen;
use yew::prelude::*;

/// What every component can read from the context.
#[derive(Clone, PartialEq)]
pub struct Setup {
    pub config: Rc<Config>,
    pub overrides: Rc<Overrides>,
}

#[derive(Properties, PartialEq)]
struct AppProps {
    setup: Setup,
}

#[rustfmt::skip::macros(html)]
#[function_component(App)]
fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<Setup> context={props.setup.clone()}>
            <main class={classes!("page")}>
                <MusicPlayer />
            </main>
        </ContextProvider<Setup>>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    let overrides = query::overrides();
    let mut config = Config::builtin().expect("the builtin config is valid");
    if let Ok(overrides) = &overrides {
        config.apply(overrides);
    }

    wasm_logger::init(wasm_logger::Config::new(config.log_level));

    let overrides = overrides.unwrap_or_else(|e| {
        log::warn!("Ignoring the query string: {e}");
        Overrides::default()
    });
    log::debug!("Starting with {config:?} and {overrides:?}");

    let setup = Setup {
        config: Rc::new(config),
        overrides: Rc::new(overrides),
    };
    yew::Renderer::<App>::with_props(AppProps { setup }).render();
}
