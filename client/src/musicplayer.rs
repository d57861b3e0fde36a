use std::{ops::Deref, rc::Rc};

use player::{Action, PlayerState, TrackId};
use yew::prelude::*;

use crate::{
    hooks::{audio::use_audio, latest::use_latest},
    slider::Orientation,
    trackinfo::TrackInfo,
    tracklist::TrackList,
    transport::TransportBar,
    visualizer::Visualizer,
    volume::VolumeControl,
    Setup,
};

/// The player state as a yew reducer.
#[derive(Clone, PartialEq)]
pub struct Model(PlayerState);

impl Deref for Model {
    type Target = PlayerState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for Model {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        log::trace!("Applying {action:?}");
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

#[rustfmt::skip::macros(html)]
#[function_component(MusicPlayer)]
pub fn music_player() -> Html {
    let setup = use_context::<Setup>().expect("no setup context found");
    let state = {
        let setup = setup.clone();
        use_reducer_eq(move || Model(PlayerState::from_config(&setup.config, &setup.overrides)))
    };
    let dispatcher = state.dispatcher();

    let observed = use_latest(state.observed());
    let audio = use_audio(&state, observed.clone());

    let total = state.total_duration();
    let skip = setup.config.skip_seconds;

    let on_rewind = {
        let audio = audio.clone();
        let dispatcher = dispatcher.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(position) = audio.skip(-skip, total) {
                dispatcher.dispatch(Action::Seeked(position));
            }
        })
    };

    let on_forward = {
        let audio = audio.clone();
        let dispatcher = dispatcher.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(position) = audio.skip(skip, total) {
                dispatcher.dispatch(Action::Seeked(position));
            }
        })
    };

    let on_scrub = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |percent: f64| dispatcher.dispatch(Action::Scrub(percent)))
    };

    let on_commit = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |percent: f64| {
            audio.seek_percent(percent, total);
            dispatcher.dispatch(Action::CommitScrub(percent));
        })
    };

    let on_volume = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |v: u8| dispatcher.dispatch(Action::SetVolume(v)))
    };

    let on_select = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |id: TrackId| dispatcher.dispatch(Action::Select(id)))
    };

    let track = state.current_track();
    let volume = |orientation: Orientation| {
        html! {
            <VolumeControl orientation={orientation}
                           volume={state.displayed_volume()}
                           muted={state.shows_muted()}
                           step={setup.config.volume_step}
                           on_change={on_volume.clone()}
                           on_toggle_mute={click_dispatch!(dispatcher, Action::ToggleMute)} />
        }
    };

    html! {
        <div class={classes!("player")}>
            {volume(Orientation::Horizontal)}
            <Visualizer observed={observed} />
            <div class={classes!("row")}>
                <div class={classes!("main", "pad", "stacker")}>
                    <TransportBar playing={state.is_playing()}
                                  on_previous={click_dispatch!(dispatcher, Action::Previous)}
                                  on_rewind={on_rewind}
                                  on_toggle={click_dispatch!(dispatcher, Action::TogglePlay)}
                                  on_forward={on_forward}
                                  on_next={click_dispatch!(dispatcher, Action::Next)} />
                    <TrackInfo title={AttrValue::from(track.title.clone())}
                               artist={AttrValue::from(track.artist.clone())}
                               time={state.time_label()}
                               progress={state.progress()}
                               step={setup.config.seek_step}
                               on_scrub={on_scrub}
                               on_commit={on_commit} />
                    <TrackList catalog={state.catalog().clone()}
                               current={state.current_id()}
                               onclick={on_select} />
                </div>
                {volume(Orientation::Vertical)}
            </div>
        </div>
    }
}
